//! Game Logic Module
//!
//! All simulation code. Single-threaded and deterministic.
//!
//! ## Module Structure
//!
//! - `input`: per-frame movement intent
//! - `maze`: grid and randomized maze generation
//! - `collision`: wall sampling and circle overlap tests
//! - `entity`: entity sum type and registry
//! - `spawn`: entity placement on a fresh grid
//! - `projectile`: fire action and projectile lifecycle
//! - `enemy`: patrol AI
//! - `state`: the owned level state and session phases
//! - `step`: the per-frame simulation step and replay harness
//! - `events`: game events for presentation/logging
//! - `snapshot`: read-only presentation view

pub mod collision;
pub mod enemy;
pub mod entity;
pub mod events;
pub mod input;
pub mod maze;
pub mod projectile;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod step;

// Re-export key types
pub use entity::{Entity, EntityId, EntityKind, EntityRegistry};
pub use events::{GameEvent, GameEventData};
pub use input::MoveIntent;
pub use maze::{GenerationConfig, GenerationError, Grid, Tile};
pub use snapshot::LevelSnapshot;
pub use state::{LevelPhase, LevelState};
pub use step::StepResult;
