//! Entity Placement
//!
//! Populates a freshly carved grid: the player at the entrance, the
//! exit at the far corner, then enemies and coins via bounded-retry
//! empty-cell sampling. Placement never fails: a spawn that cannot
//! find a free cell within the attempt budget is skipped.

use crate::core::rng::DeterministicRng;
use crate::game::entity::{
    CoinData, EnemyData, EntityKind, EntityRegistry, PatrolAxis, PatrolDirection, PlayerData,
};
use crate::game::maze::{GenerationConfig, Grid, Tile};

/// Player collision radius as a fraction of the tile edge.
pub const PLAYER_RADIUS_FRAC: f32 = 0.35;
/// Exit marker radius as a fraction of the tile edge.
pub const EXIT_RADIUS_FRAC: f32 = 0.4;
/// Enemy collision radius as a fraction of the tile edge.
pub const ENEMY_RADIUS_FRAC: f32 = 0.33;
/// Coin pickup radius as a fraction of the tile edge.
pub const COIN_RADIUS_FRAC: f32 = 0.25;

/// Starting and respawn life of the player.
pub const PLAYER_MAX_LIFE: i32 = 5;
/// Player movement speed (16-px-tile units per reference frame).
pub const PLAYER_SPEED: f32 = 3.0;
/// Life removed per enemy contact frame.
const ENEMY_DAMAGE: u32 = 1;
/// Coins awarded per coin pickup.
const COIN_VALUE: u32 = 1;

/// Sampling budget per spawn before the spawn is skipped.
const PLACEMENT_ATTEMPTS: u32 = 100;

/// What placement actually produced (may be less than requested).
#[derive(Clone, Copy, Debug, Default)]
pub struct SpawnSummary {
    /// Enemies that found a free cell.
    pub enemies_placed: u32,
    /// Coins that found a free cell.
    pub coins_placed: u32,
}

/// Place all entities for a new level.
///
/// The entrance and exit cells are force-opened; the carve guarantees
/// the entrance is open already, but the far corner may not be on the
/// carve lattice for even dimensions.
pub fn populate(
    grid: &mut Grid,
    config: &GenerationConfig,
    rng: &mut DeterministicRng,
) -> (EntityRegistry, SpawnSummary) {
    let mut registry = EntityRegistry::new();
    let mut summary = SpawnSummary::default();
    let tile = grid.tile_size();

    // Player at the entrance corner.
    let player_cell = (1usize, 1usize);
    grid.set_tile(player_cell.0 as i32, player_cell.1 as i32, Tile::Open);
    let start = grid.cell_center(player_cell.0, player_cell.1);
    registry.insert(
        start,
        tile * PLAYER_RADIUS_FRAC,
        EntityKind::Player(PlayerData {
            start_position: start,
            life: PLAYER_MAX_LIFE,
            max_life: PLAYER_MAX_LIFE,
            speed: PLAYER_SPEED,
        }),
    );

    // Exit at the far corner.
    let exit_cell = (grid.cols() - 2, grid.rows() - 2);
    grid.set_tile(exit_cell.0 as i32, exit_cell.1 as i32, Tile::Open);
    registry.insert(
        grid.cell_center(exit_cell.0, exit_cell.1),
        tile * EXIT_RADIUS_FRAC,
        EntityKind::Exit,
    );

    // Enemies at sampled free cells.
    for _ in 0..config.enemy_count {
        let Some((col, row)) = find_empty_cell(grid, &registry, rng) else {
            continue;
        };

        let axis = if rng.next_bool(0.5) {
            PatrolAxis::Horizontal
        } else {
            PatrolAxis::Vertical
        };
        let direction = if rng.next_bool(0.5) {
            PatrolDirection::Positive
        } else {
            PatrolDirection::Negative
        };

        registry.insert(
            grid.cell_center(col, row),
            tile * ENEMY_RADIUS_FRAC,
            EntityKind::Enemy(EnemyData {
                alive: true,
                axis,
                direction,
                speed: rng.next_f32_range(config.min_speed, config.max_speed),
                damage: ENEMY_DAMAGE,
            }),
        );
        summary.enemies_placed += 1;
    }

    // Coins: random count in the configured range, then sampled cells.
    let coin_count = rng.next_int_range(config.min_coins as i32, config.max_coins as i32);
    for _ in 0..coin_count {
        let Some((col, row)) = find_empty_cell(grid, &registry, rng) else {
            continue;
        };
        registry.insert(
            grid.cell_center(col, row),
            tile * COIN_RADIUS_FRAC,
            EntityKind::Coin(CoinData { value: COIN_VALUE }),
        );
        summary.coins_placed += 1;
    }

    (registry, summary)
}

/// Uniformly sample interior cells until one is open and unoccupied.
///
/// Occupancy is judged by grid-cell coincidence, not exact pixel match.
/// Returns `None` when the attempt budget runs out; callers skip the
/// spawn in that case.
fn find_empty_cell(
    grid: &Grid,
    registry: &EntityRegistry,
    rng: &mut DeterministicRng,
) -> Option<(usize, usize)> {
    for _ in 0..PLACEMENT_ATTEMPTS {
        let col = rng.next_int(grid.cols() as u32 - 2) as i32 + 1;
        let row = rng.next_int(grid.rows() as u32 - 2) as i32 + 1;

        if grid.is_wall(col, row) {
            continue;
        }

        let occupied = registry
            .iter()
            .any(|e| grid.cell_of(e.position) == (col, row));
        if !occupied {
            return Some((col as usize, row as usize));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::maze;

    fn populated(seed: u64, config: &GenerationConfig) -> (Grid, EntityRegistry, SpawnSummary) {
        let mut rng = DeterministicRng::new(seed);
        let mut grid = maze::generate(config, &mut rng);
        let (registry, summary) = populate(&mut grid, config, &mut rng);
        (grid, registry, summary)
    }

    #[test]
    fn test_default_scenario_entity_counts() {
        // width=20, height=15, enemies=3: exactly player + exit, up to 3
        // enemies, and a coin count within the configured range.
        let config = GenerationConfig::default();
        let (grid, registry, summary) = populated(42, &config);

        let player = registry.player().expect("player placed");
        assert_eq!(grid.cell_of(player.position), (1, 1));

        let exit = registry.exit().expect("exit placed");
        assert_eq!(grid.cell_of(exit.position), (18, 13));

        assert!(summary.enemies_placed <= 3);
        assert!((10..=18).contains(&summary.coins_placed));
        assert_eq!(
            registry.len() as u32,
            2 + summary.enemies_placed + summary.coins_placed
        );
    }

    #[test]
    fn test_entities_on_open_interior_cells() {
        let config = GenerationConfig::default();
        let (grid, registry, _) = populated(7, &config);

        for entity in registry.iter() {
            let (col, row) = grid.cell_of(entity.position);
            assert!(!grid.is_wall(col, row), "{} placed in a wall", entity.id);
            assert!(col >= 1 && col <= grid.cols() as i32 - 2);
            assert!(row >= 1 && row <= grid.rows() as i32 - 2);
        }
    }

    #[test]
    fn test_no_two_entities_share_a_cell() {
        let config = GenerationConfig::default();
        let (grid, registry, _) = populated(99, &config);

        let mut cells: Vec<_> = registry.iter().map(|e| grid.cell_of(e.position)).collect();
        cells.sort();
        let before = cells.len();
        cells.dedup();
        assert_eq!(cells.len(), before);
    }

    #[test]
    fn test_enemy_tuning_within_config() {
        let config = GenerationConfig::default();
        let (_, registry, _) = populated(5, &config);

        for enemy in registry.iter().filter_map(|e| e.as_enemy()) {
            assert!(enemy.alive);
            assert!(enemy.speed >= config.min_speed && enemy.speed < config.max_speed);
            assert_eq!(enemy.damage, 1);
        }
    }

    #[test]
    fn test_exhausted_budget_skips_spawns() {
        // A 5x5 maze has a handful of open cells; asking for 100 enemies
        // must place only what fits and never error.
        let config = GenerationConfig {
            width: 5,
            height: 5,
            enemy_count: 100,
            ..GenerationConfig::default()
        };
        let (_, registry, summary) = populated(3, &config);

        assert!(summary.enemies_placed < 100);
        assert_eq!(
            registry.len() as u32,
            2 + summary.enemies_placed + summary.coins_placed
        );
    }

    #[test]
    fn test_exit_reachable_from_entrance() {
        // Flood fill over open cells from the entrance; the force-opened
        // exit cell must be reached on every seed.
        let config = GenerationConfig::default();
        for seed in [1u64, 2, 3, 77, 1234, 99999] {
            let (grid, _, _) = populated(seed, &config);

            let cols = grid.cols() as i32;
            let mut reached = vec![false; grid.cols() * grid.rows()];
            let mut queue = vec![(1i32, 1i32)];
            reached[(cols + 1) as usize] = true;
            while let Some((x, y)) = queue.pop() {
                for (dx, dy) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
                    let (nx, ny) = (x + dx, y + dy);
                    if !grid.is_wall(nx, ny) && !reached[(ny * cols + nx) as usize] {
                        reached[(ny * cols + nx) as usize] = true;
                        queue.push((nx, ny));
                    }
                }
            }

            let exit = (grid.cols() as i32 - 2, grid.rows() as i32 - 2);
            assert!(
                reached[(exit.1 * cols + exit.0) as usize],
                "exit unreachable for seed {seed}"
            );
        }
    }

    #[test]
    fn test_placement_determinism() {
        let config = GenerationConfig::default();
        let (_, reg_a, _) = populated(1234, &config);
        let (_, reg_b, _) = populated(1234, &config);

        assert_eq!(reg_a.len(), reg_b.len());
        for (a, b) in reg_a.iter().zip(reg_b.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.position, b.position);
        }
    }
}
