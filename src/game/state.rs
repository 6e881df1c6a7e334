//! Level State
//!
//! One owned struct holds everything a level's simulation mutates: the
//! grid, the entity registry, the active projectiles, the session
//! counters and the RNG. Every core operation takes it explicitly
//! (there are no ambient globals), and it is fully replaced whenever a
//! new maze is generated.

use serde::{Deserialize, Serialize};

use crate::core::hash::{compute_state_hash, StateHash, StateHasher};
use crate::core::rng::DeterministicRng;
use crate::game::entity::{Entity, EntityKind, EntityRegistry, PatrolAxis, PatrolDirection};
use crate::game::events::GameEvent;
use crate::game::maze::{self, GenerationConfig, GenerationError, Grid};
use crate::game::projectile::Projectile;
use crate::game::spawn;

/// Session phase. `Running` is entered by explicit start or resume;
/// `Paused` by explicit pause or by winning. No step processing happens
/// outside `Running`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    /// Generated but not yet started.
    #[default]
    Idle,
    /// Stepping normally.
    Running,
    /// Frozen; entities and projectiles hold position.
    Paused,
}

/// Complete state of one level.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LevelState {
    /// Generation parameters, retained for restarts.
    pub config: GenerationConfig,

    /// Seed this level was generated from (for verification).
    pub seed: u64,

    /// Deterministic RNG; owns all randomness after generation too.
    #[serde(skip)]
    pub rng: DeterministicRng,

    /// The walled grid.
    pub grid: Grid,

    /// All entities for this level.
    pub registry: EntityRegistry,

    /// Active projectiles. Contains only `alive` projectiles between
    /// steps; dead ones are purged at the end of each advance pass.
    pub projectiles: Vec<Projectile>,

    /// Seconds until the next shot is allowed.
    pub fire_cooldown: f32,

    /// Whether the fire action is currently allowed.
    pub can_fire: bool,

    /// Coins collected this session.
    pub coins: u32,

    /// Simulated whole seconds since the level started.
    pub elapsed_seconds: u32,

    /// Sub-second accumulator feeding `elapsed_seconds`.
    pub second_accumulator: f32,

    /// Steps executed since generation. Stamped on events.
    pub frame: u64,

    /// Session phase.
    pub phase: LevelPhase,

    /// Events generated since the last drain.
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl LevelState {
    /// Generate a new level from a config and seed.
    ///
    /// The only validated precondition is the grid shape; every other
    /// config oddity degrades gracefully during placement. The new
    /// level is `Idle` and carries a `MazeGenerated` event.
    pub fn generate(config: GenerationConfig, seed: u64) -> Result<Self, GenerationError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    /// Build a level from an already-validated config.
    fn build(config: GenerationConfig, seed: u64) -> Self {
        let mut rng = DeterministicRng::new(seed);
        let mut grid = maze::generate(&config, &mut rng);
        let (registry, summary) = spawn::populate(&mut grid, &config, &mut rng);

        let mut state = Self {
            config,
            seed,
            rng,
            grid,
            registry,
            projectiles: Vec::new(),
            fire_cooldown: 0.0,
            can_fire: true,
            coins: 0,
            elapsed_seconds: 0,
            second_accumulator: 0.0,
            frame: 0,
            phase: LevelPhase::Idle,
            pending_events: Vec::new(),
        };

        state.push_event(GameEvent::maze_generated(
            state.grid.cols(),
            state.grid.rows(),
            summary.enemies_placed,
            summary.coins_placed,
        ));
        state
    }

    /// Start or resume the session.
    pub fn start(&mut self) {
        self.phase = LevelPhase::Running;
    }

    /// Pause the session. A step already in progress completes normally;
    /// the next step is a no-op.
    pub fn pause(&mut self) {
        if self.phase == LevelPhase::Running {
            self.phase = LevelPhase::Paused;
        }
    }

    /// True while the session is stepping.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == LevelPhase::Running
    }

    /// Replace the maze and reset the session without starting it
    /// (the "new map" menu action). The fresh seed is drawn from this
    /// state's RNG, so a whole session stays a function of the first seed.
    pub fn regenerate(&mut self) {
        let seed = self.rng.next_u64();
        *self = Self::build(self.config.clone(), seed);
    }

    /// Regenerate and immediately start (the "restart" menu action).
    pub fn restart(&mut self) {
        self.regenerate();
        self.start();
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Compute hash of current state for replay verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.frame, self.seed, |hasher| {
            // Grid
            hasher.update_u64(self.grid.cols() as u64);
            hasher.update_u64(self.grid.rows() as u64);
            hasher.update_f32(self.grid.tile_size());
            for tile in self.grid.cells() {
                hasher.update_u8(matches!(tile, maze::Tile::Open) as u8);
            }

            // Entities in registry order
            for entity in self.registry.iter() {
                hash_entity(hasher, entity);
            }

            // Projectiles in flight order
            for projectile in &self.projectiles {
                hasher.update_vec2(projectile.position);
                hasher.update_vec2(projectile.direction);
                hasher.update_f32(projectile.speed);
                hasher.update_f32(projectile.lifetime);
                hasher.update_bool(projectile.alive);
            }

            // Session counters
            hasher.update_u32(self.coins);
            hasher.update_u32(self.elapsed_seconds);
            hasher.update_f32(self.second_accumulator);
            hasher.update_f32(self.fire_cooldown);
            hasher.update_bool(self.can_fire);
            hasher.update_u8(match self.phase {
                LevelPhase::Idle => 0,
                LevelPhase::Running => 1,
                LevelPhase::Paused => 2,
            });
        })
    }
}

/// Hash one entity, tag first, payload fields in declaration order.
fn hash_entity(hasher: &mut StateHasher, entity: &Entity) {
    hasher.update_u32(entity.id.0);
    hasher.update_vec2(entity.position);
    hasher.update_f32(entity.radius);

    match &entity.kind {
        EntityKind::Player(data) => {
            hasher.update_u8(0);
            hasher.update_vec2(data.start_position);
            hasher.update_i32(data.life);
            hasher.update_i32(data.max_life);
            hasher.update_f32(data.speed);
        }
        EntityKind::Enemy(data) => {
            hasher.update_u8(1);
            hasher.update_bool(data.alive);
            hasher.update_u8(matches!(data.axis, PatrolAxis::Vertical) as u8);
            hasher.update_u8(matches!(data.direction, PatrolDirection::Positive) as u8);
            hasher.update_f32(data.speed);
            hasher.update_u32(data.damage);
        }
        EntityKind::Coin(data) => {
            hasher.update_u8(2);
            hasher.update_u32(data.value);
        }
        EntityKind::Exit => {
            hasher.update_u8(3);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::events::GameEventData;

    fn default_level(seed: u64) -> LevelState {
        LevelState::generate(GenerationConfig::default(), seed).unwrap()
    }

    #[test]
    fn test_generate_rejects_degenerate_dimensions() {
        let config = GenerationConfig {
            width: 2,
            height: 2,
            ..GenerationConfig::default()
        };
        assert!(matches!(
            LevelState::generate(config, 1),
            Err(GenerationError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_generate_emits_maze_event_and_idles() {
        let mut state = default_level(42);
        assert_eq!(state.phase, LevelPhase::Idle);
        assert!(state.can_fire);
        assert_eq!(state.coins, 0);

        let events = state.take_events();
        assert!(matches!(
            events[0].data,
            GameEventData::MazeGenerated { cols: 20, rows: 15, .. }
        ));
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_phase_machine() {
        let mut state = default_level(1);

        // Pause from Idle is a no-op.
        state.pause();
        assert_eq!(state.phase, LevelPhase::Idle);

        state.start();
        assert!(state.is_running());

        state.pause();
        assert_eq!(state.phase, LevelPhase::Paused);

        // Resume.
        state.start();
        assert!(state.is_running());
    }

    #[test]
    fn test_regenerate_resets_session() {
        let mut state = default_level(7);
        state.start();
        state.coins = 9;
        state.elapsed_seconds = 30;
        state.frame = 120;

        let old_cells = state.grid.cells().to_vec();
        state.regenerate();

        assert_eq!(state.phase, LevelPhase::Idle);
        assert_eq!(state.coins, 0);
        assert_eq!(state.elapsed_seconds, 0);
        assert_eq!(state.frame, 0);
        assert!(state.projectiles.is_empty());
        assert_ne!(state.grid.cells(), old_cells.as_slice());
    }

    #[test]
    fn test_restart_starts_running() {
        let mut state = default_level(7);
        state.restart();
        assert!(state.is_running());
    }

    #[test]
    fn test_regeneration_chain_is_deterministic() {
        let mut a = default_level(1234);
        let mut b = default_level(1234);
        a.regenerate();
        b.regenerate();

        assert_eq!(a.seed, b.seed);
        assert_eq!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn test_hash_distinguishes_seeds_and_counters() {
        let a = default_level(1);
        let b = default_level(2);
        assert_ne!(a.compute_hash(), b.compute_hash());

        let mut c = default_level(1);
        assert_eq!(a.compute_hash(), c.compute_hash());
        c.coins = 1;
        assert_ne!(a.compute_hash(), c.compute_hash());
    }

    #[test]
    fn test_level_has_player_and_exit() {
        let state = default_level(55);
        assert!(state.registry.player().is_some());
        assert!(state.registry.exit().is_some());
    }
}
