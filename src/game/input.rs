//! Movement Intent
//!
//! The per-frame input the simulation step consumes. The presentation
//! layer resolves whatever raw input it has (held keys, virtual stick)
//! into an axis-aligned sign pair before each step; the core never sees
//! key codes or pointer events. The fire action is a separate command
//! (`projectile::fire_at`) because it is edge-triggered, not held.

use serde::{Deserialize, Serialize};

/// Held-direction state for one frame.
///
/// Each axis is a sign: -1, 0 or +1. `left_right = -1` means left,
/// `up_down = -1` means up (screen coordinates, +y down). Values outside
/// that range are clamped on construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    /// Horizontal axis sign: -1 left, 0 idle, +1 right
    pub left_right: i8,
    /// Vertical axis sign: -1 up, 0 idle, +1 down
    pub up_down: i8,
}

impl MoveIntent {
    /// No movement.
    pub const IDLE: Self = Self {
        left_right: 0,
        up_down: 0,
    };

    /// Create an intent from raw axis values, clamping each to its sign.
    pub fn new(left_right: i8, up_down: i8) -> Self {
        Self {
            left_right: left_right.signum(),
            up_down: up_down.signum(),
        }
    }

    /// Build an intent from four held-direction flags, opposite keys
    /// cancelling the way a keyboard handler resolves them.
    pub fn from_held(up: bool, down: bool, left: bool, right: bool) -> Self {
        let left_right = (right as i8) - (left as i8);
        let up_down = (down as i8) - (up as i8);
        Self {
            left_right,
            up_down,
        }
    }

    /// Horizontal sign as f32 for position integration.
    #[inline]
    pub fn dx(&self) -> f32 {
        self.left_right as f32
    }

    /// Vertical sign as f32 for position integration.
    #[inline]
    pub fn dy(&self) -> f32 {
        self.up_down as f32
    }

    /// Check if this is an idle frame (no held direction).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.left_right == 0 && self.up_down == 0
    }
}
