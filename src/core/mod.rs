//! Core deterministic primitives.
//!
//! All types in this module are designed for reproducible simulation:
//! the same seed must replay to the same state hash on every run.

pub mod hash;
pub mod rng;
pub mod vec2;

// Re-export core types
pub use hash::{compute_state_hash, StateHash};
pub use rng::DeterministicRng;
pub use vec2::Vec2;
