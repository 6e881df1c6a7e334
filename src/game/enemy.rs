//! Patrol AI
//!
//! Enemies walk a straight line along one axis and turn around at
//! walls. No pathfinding, no player awareness. The resulting
//! deterministic oscillation is the intended behavior, not a
//! placeholder for something smarter.

use crate::core::vec2::Vec2;
use crate::game::collision;
use crate::game::entity::{EnemyData, PatrolAxis};
use crate::game::maze::Grid;
use crate::{REFERENCE_FPS, SPEED_TILE_DIVISOR};

/// Advance one enemy's patrol by `dt`.
///
/// Computes the tentative next position along the current direction;
/// if it would touch a wall the direction flips and the enemy holds
/// position for this frame, otherwise the move commits. Returns the
/// (possibly unchanged) position.
pub fn patrol_step(
    grid: &Grid,
    position: Vec2,
    radius: f32,
    data: &mut EnemyData,
    dt: f32,
) -> Vec2 {
    let step = data.speed * grid.tile_size() / SPEED_TILE_DIVISOR * REFERENCE_FPS * dt;

    let mut next = position;
    match data.axis {
        PatrolAxis::Horizontal => next.x += data.direction.sign() * step,
        PatrolAxis::Vertical => next.y += data.direction.sign() * step,
    }

    if collision::is_wall_at(grid, next.x, next.y, radius) {
        data.direction = data.direction.flipped();
        position
    } else {
        next
    }
}
