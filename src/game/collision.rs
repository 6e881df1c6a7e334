//! Collision Detection
//!
//! Point-vs-grid and circle-vs-circle tests shared by every moving
//! entity. Both tests are pure functions of their arguments.

use crate::core::vec2::Vec2;
use crate::game::maze::Grid;

/// Check whether a circle at `(x, y)` with `radius` touches a wall.
///
/// Samples the four cardinal points at `radius` distance (left, right,
/// up, down); any sample outside the grid or on a wall cell blocks.
/// Corner penetration is intentionally not checked: a circle can clip
/// diagonally past a wall corner. Gameplay tuning depends on that
/// looseness, so it is a documented limitation, not a bug.
pub fn is_wall_at(grid: &Grid, x: f32, y: f32, radius: f32) -> bool {
    let samples = [
        (x - radius, y),
        (x + radius, y),
        (x, y - radius),
        (x, y + radius),
    ];

    for (sx, sy) in samples {
        let (col, row) = grid.cell_of(Vec2::new(sx, sy));
        if grid.is_wall(col, row) {
            return true;
        }
    }

    false
}

/// Check if two circles overlap.
///
/// Strict inequality: tangent circles do not count as colliding.
#[inline]
pub fn circles_overlap(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    let combined = radius_a + radius_b;
    pos_a.distance_squared(pos_b) < combined * combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::maze::Tile;
    use proptest::prelude::*;

    /// 5x5 grid, walls on the border only, 10 px tiles.
    fn open_room() -> Grid {
        let mut grid = Grid::filled(5, 5, 10.0, Tile::Open);
        grid.seal_border();
        grid
    }

    #[test]
    fn test_center_of_room_is_clear() {
        let grid = open_room();
        assert!(!is_wall_at(&grid, 25.0, 25.0, 3.0));
    }

    #[test]
    fn test_sample_reaching_wall_blocks() {
        let grid = open_room();
        // Left sample at x = 12 - 3 = 9 lands in the border column.
        assert!(is_wall_at(&grid, 12.0, 25.0, 3.0));
        // Same center with a smaller radius stays clear.
        assert!(!is_wall_at(&grid, 12.0, 25.0, 1.0));
    }

    #[test]
    fn test_outside_grid_blocks() {
        let grid = open_room();
        assert!(is_wall_at(&grid, -5.0, 25.0, 1.0));
        assert!(is_wall_at(&grid, 25.0, 500.0, 1.0));
    }

    #[test]
    fn test_is_wall_at_idempotent() {
        let grid = open_room();
        let first = is_wall_at(&grid, 14.0, 14.0, 4.0);
        for _ in 0..10 {
            assert_eq!(is_wall_at(&grid, 14.0, 14.0, 4.0), first);
        }
    }

    #[test]
    fn test_corner_clipping_permitted() {
        // A lone wall cell at (2,2); a circle centered diagonally off its
        // corner overlaps the corner but none of the four samples land in
        // the wall. Documented approximation, asserted so nobody "fixes" it.
        let mut grid = Grid::filled(5, 5, 10.0, Tile::Open);
        grid.set_tile(2, 2, Tile::Wall);
        assert!(!is_wall_at(&grid, 16.0, 16.0, 6.0));
    }

    #[test]
    fn test_circles_overlap_strict() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);

        // Tangent: combined radius exactly 10 -> no collision.
        assert!(!circles_overlap(a, 5.0, b, 5.0));
        // Any penetration collides.
        assert!(circles_overlap(a, 5.1, b, 5.0));
        // Far apart.
        assert!(!circles_overlap(a, 2.0, b, 2.0));
    }

    proptest! {
        #[test]
        fn prop_circles_overlap_commutative(
            ax in -1000.0f32..1000.0,
            ay in -1000.0f32..1000.0,
            bx in -1000.0f32..1000.0,
            by in -1000.0f32..1000.0,
            ra in 0.0f32..100.0,
            rb in 0.0f32..100.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(
                circles_overlap(a, ra, b, rb),
                circles_overlap(b, rb, a, ra)
            );
        }
    }
}
