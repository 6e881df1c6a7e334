//! Presentation Snapshot
//!
//! The read-only view a presentation layer consumes once per frame:
//! grid geometry, entity and projectile views, and the HUD counters.
//! The snapshot is plain data with JSON and binary codecs, so a
//! renderer can live in-process, across an FFI boundary, or behind a
//! pipe without touching simulation internals.

use serde::{Deserialize, Serialize};

use crate::game::entity::{EntityKind, PatrolAxis, PatrolDirection};
use crate::game::maze::Tile;
use crate::game::state::LevelState;

/// Per-entity view with tag-specific fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EntityView {
    /// The player avatar.
    Player {
        /// Registry id.
        id: u32,
        /// Center x in pixels.
        x: f32,
        /// Center y in pixels.
        y: f32,
        /// Radius in pixels.
        radius: f32,
        /// Current life.
        life: i32,
        /// Life ceiling.
        max_life: i32,
    },
    /// A patrolling enemy.
    Enemy {
        /// Registry id.
        id: u32,
        /// Center x in pixels.
        x: f32,
        /// Center y in pixels.
        y: f32,
        /// Radius in pixels.
        radius: f32,
        /// False only transiently; dead enemies leave the registry.
        alive: bool,
        /// Patrol axis (for sprite facing).
        axis: PatrolAxis,
        /// Travel direction (for sprite mirroring).
        direction: PatrolDirection,
    },
    /// A coin pickup.
    Coin {
        /// Registry id.
        id: u32,
        /// Center x in pixels.
        x: f32,
        /// Center y in pixels.
        y: f32,
        /// Radius in pixels.
        radius: f32,
        /// Coins awarded on pickup.
        value: u32,
    },
    /// The exit marker.
    Exit {
        /// Registry id.
        id: u32,
        /// Center x in pixels.
        x: f32,
        /// Center y in pixels.
        y: f32,
        /// Radius in pixels.
        radius: f32,
    },
}

/// Per-projectile view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    /// Center x in pixels.
    pub x: f32,
    /// Center y in pixels.
    pub y: f32,
    /// Radius in pixels.
    pub radius: f32,
    /// Unit direction x (for trails).
    pub dx: f32,
    /// Unit direction y (for trails).
    pub dy: f32,
}

/// HUD counters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HudView {
    /// Coins collected this session.
    pub coins: u32,
    /// Simulated whole seconds elapsed.
    pub elapsed_seconds: u32,
    /// True while the session is stepping.
    pub running: bool,
    /// Whether the fire action is currently allowed.
    pub can_fire: bool,
    /// Seconds until the next shot is allowed.
    pub fire_cooldown: f32,
    /// Player life, 0 when no player exists.
    pub life: i32,
    /// Player life ceiling, 0 when no player exists.
    pub max_life: i32,
}

/// Complete per-frame view of a level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    /// Grid width in cells.
    pub cols: usize,
    /// Grid height in cells.
    pub rows: usize,
    /// Pixel edge length of one tile.
    pub tile_size: f32,
    /// Row-major cell states: 1 = wall, 0 = open.
    pub tiles: Vec<u8>,
    /// Entity views in registry order.
    pub entities: Vec<EntityView>,
    /// Active projectile views.
    pub projectiles: Vec<ProjectileView>,
    /// HUD counters.
    pub hud: HudView,
}

impl LevelSnapshot {
    /// Capture the current state of a level.
    pub fn capture(state: &LevelState) -> Self {
        let tiles = state
            .grid
            .cells()
            .iter()
            .map(|tile| matches!(tile, Tile::Wall) as u8)
            .collect();

        let entities = state
            .registry
            .iter()
            .map(|entity| match &entity.kind {
                EntityKind::Player(data) => EntityView::Player {
                    id: entity.id.0,
                    x: entity.position.x,
                    y: entity.position.y,
                    radius: entity.radius,
                    life: data.life,
                    max_life: data.max_life,
                },
                EntityKind::Enemy(data) => EntityView::Enemy {
                    id: entity.id.0,
                    x: entity.position.x,
                    y: entity.position.y,
                    radius: entity.radius,
                    alive: data.alive,
                    axis: data.axis,
                    direction: data.direction,
                },
                EntityKind::Coin(data) => EntityView::Coin {
                    id: entity.id.0,
                    x: entity.position.x,
                    y: entity.position.y,
                    radius: entity.radius,
                    value: data.value,
                },
                EntityKind::Exit => EntityView::Exit {
                    id: entity.id.0,
                    x: entity.position.x,
                    y: entity.position.y,
                    radius: entity.radius,
                },
            })
            .collect();

        let projectiles = state
            .projectiles
            .iter()
            .map(|p| ProjectileView {
                x: p.position.x,
                y: p.position.y,
                radius: p.radius,
                dx: p.direction.x,
                dy: p.direction.y,
            })
            .collect();

        let (life, max_life) = match state.registry.player().map(|e| &e.kind) {
            Some(EntityKind::Player(data)) => (data.life, data.max_life),
            _ => (0, 0),
        };

        Self {
            cols: state.grid.cols(),
            rows: state.grid.rows(),
            tile_size: state.grid.tile_size(),
            tiles,
            entities,
            projectiles,
            hud: HudView {
                coins: state.coins,
                elapsed_seconds: state.elapsed_seconds,
                running: state.is_running(),
                can_fire: state.can_fire,
                fire_cooldown: state.fire_cooldown,
                life,
                max_life,
            },
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Serialize to binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserialize from binary.
    pub fn from_bytes(data: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::maze::GenerationConfig;

    fn captured(seed: u64) -> LevelSnapshot {
        let state = LevelState::generate(GenerationConfig::default(), seed).unwrap();
        LevelSnapshot::capture(&state)
    }

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = LevelState::generate(GenerationConfig::default(), 42).unwrap();
        state.start();
        state.coins = 5;

        let snapshot = LevelSnapshot::capture(&state);
        assert_eq!(snapshot.cols, 20);
        assert_eq!(snapshot.rows, 15);
        assert_eq!(snapshot.tile_size, 32.0);
        assert_eq!(snapshot.tiles.len(), 20 * 15);
        assert_eq!(snapshot.entities.len(), state.registry.len());
        assert!(snapshot.hud.running);
        assert_eq!(snapshot.hud.coins, 5);
        assert_eq!(snapshot.hud.life, 5);
        assert!(snapshot.hud.can_fire);
    }

    #[test]
    fn test_capture_has_one_player_one_exit() {
        let snapshot = captured(7);
        let players = snapshot
            .entities
            .iter()
            .filter(|e| matches!(e, EntityView::Player { .. }))
            .count();
        let exits = snapshot
            .entities
            .iter()
            .filter(|e| matches!(e, EntityView::Exit { .. }))
            .count();
        assert_eq!(players, 1);
        assert_eq!(exits, 1);
    }

    #[test]
    fn test_border_tiles_marked_walls() {
        let snapshot = captured(3);
        for col in 0..snapshot.cols {
            assert_eq!(snapshot.tiles[col], 1);
            assert_eq!(snapshot.tiles[(snapshot.rows - 1) * snapshot.cols + col], 1);
        }
    }

    #[test]
    fn test_json_round_trip() {
        let snapshot = captured(1234);
        let json = snapshot.to_json().unwrap();
        let back = LevelSnapshot::from_json(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_binary_round_trip() {
        let snapshot = captured(1234);
        let bytes = snapshot.to_bytes().unwrap();
        let back = LevelSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(back, snapshot);
    }
}
