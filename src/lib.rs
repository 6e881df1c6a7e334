//! # Gridfire Simulation Core
//!
//! Deterministic simulation core for Gridfire, a real-time top-down
//! maze shooter: a player navigates a procedurally generated maze,
//! shoots patrolling enemies, collects coins and races to the exit.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      GRIDFIRE CORE                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Deterministic primitives                 │
//! │  ├── vec2.rs      - f32 2D vector (pixel space, y-down)      │
//! │  ├── rng.rs       - Seeded Xorshift128+ PRNG                 │
//! │  └── hash.rs      - State hashing for replay verification    │
//! │                                                              │
//! │  game/            - Simulation (deterministic)               │
//! │  ├── input.rs     - Per-frame movement intent                │
//! │  ├── maze.rs      - Grid + randomized-DFS maze generation    │
//! │  ├── collision.rs - Wall sampling, circle overlap            │
//! │  ├── entity.rs    - Entity sum type + registry               │
//! │  ├── spawn.rs     - Entity placement (empty-cell sampling)   │
//! │  ├── projectile.rs- Fire action + projectile lifecycle       │
//! │  ├── enemy.rs     - Patrol AI                                │
//! │  ├── state.rs     - Owned level state + session phases       │
//! │  ├── step.rs      - Per-frame simulation step + replay       │
//! │  ├── events.rs    - Events for presentation/logging          │
//! │  └── snapshot.rs  - Read-only presentation view              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Execution Model
//!
//! The core is driven from outside: a presentation layer owns the frame
//! loop, feeds each frame's elapsed time into [`game::step::step`], and
//! reads a [`game::snapshot::LevelSnapshot`] back to render. Menu-style
//! commands (generate, start, pause, restart, fire) are plain
//! synchronous calls between steps. The core performs no I/O, spawns no
//! threads and never blocks.
//!
//! ## Determinism Guarantee
//!
//! Given the same seed and the same per-frame inputs, a level replays
//! to an identical state hash:
//! - all randomness flows through one seeded Xorshift128+ instance
//! - iteration orders are insertion orders, never hash orders
//! - state fingerprints hash f32 bit patterns, not rounded values

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::rng::{derive_level_seed, DeterministicRng};
pub use crate::core::vec2::Vec2;
pub use game::input::MoveIntent;
pub use game::maze::{GenerationConfig, GenerationError};
pub use game::snapshot::LevelSnapshot;
pub use game::state::{LevelPhase, LevelState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reference frame cadence baked into walker speed units.
///
/// Player and enemy speeds are expressed as "pixels per 16-px tile per
/// reference frame"; positions advance by
/// `speed * tile_size / SPEED_TILE_DIVISOR * REFERENCE_FPS * dt`.
/// The constants are part of the game's balance and must not be
/// reinterpreted as tiles-per-second.
pub const REFERENCE_FPS: f32 = 60.0;

/// Reference tile edge the speed unit is calibrated against.
pub const SPEED_TILE_DIVISOR: f32 = 16.0;
