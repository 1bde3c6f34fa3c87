//! Collision detection for the side-scrolling playfield
//!
//! Everything that moves is treated as a circle; the light wall is a
//! full-height vertical slab that pushes the ship back to the side it came
//! from.

use glam::Vec2;

use crate::consts::*;

/// Whether two circles overlap
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_squared(b) < r * r
}

/// Whether a point lies inside an axis-aligned box centred on `center`
#[inline]
pub fn point_in_box(point: Vec2, center: Vec2, half_extents: Vec2) -> bool {
    let d = (point - center).abs();
    d.x <= half_extents.x && d.y <= half_extents.y
}

/// Keep the ship sprite fully inside the playfield
pub fn clamp_to_world(pos: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.clamp(SHIP_HALF_WIDTH, WORLD_WIDTH - SHIP_HALF_WIDTH),
        pos.y.clamp(SHIP_HALF_HEIGHT, WORLD_HEIGHT - SHIP_HALF_HEIGHT),
    )
}

/// Resolve the ship against a vertical wall slab centred on `wall_x`
///
/// `prev` is the ship position before this tick's movement; the ship is
/// pushed back out on the side it started from.
pub fn block_by_wall(prev: Vec2, next: Vec2, wall_x: f32) -> Vec2 {
    let half = WALL_WIDTH / 2.0 + SHIP_HALF_WIDTH;
    let left = wall_x - half;
    let right = wall_x + half;

    if next.x <= left || next.x >= right {
        return next;
    }

    let x = if prev.x <= wall_x { left } else { right };
    Vec2::new(x, next.y)
}

/// Whether an entity has scrolled past the left edge
#[inline]
pub fn is_offscreen_left(pos: Vec2) -> bool {
    pos.x < -DESPAWN_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 10.0, Vec2::new(15.0, 0.0), 10.0));
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(25.0, 0.0), 10.0));
    }

    #[test]
    fn test_point_in_box() {
        let half = Vec2::new(MIRROR_HALF_WIDTH, MIRROR_HALF_HEIGHT);
        let center = Vec2::new(100.0, 100.0);
        assert!(point_in_box(Vec2::new(105.0, 112.0), center, half));
        assert!(!point_in_box(Vec2::new(110.0, 100.0), center, half));
    }

    #[test]
    fn test_clamp_to_world() {
        let p = clamp_to_world(Vec2::new(-50.0, 700.0));
        assert_eq!(p, Vec2::new(SHIP_HALF_WIDTH, WORLD_HEIGHT - SHIP_HALF_HEIGHT));
    }

    #[test]
    fn test_wall_blocks_from_left() {
        let wall_x = 600.0;
        let prev = Vec2::new(560.0, 300.0);
        let next = Vec2::new(595.0, 300.0);
        let resolved = block_by_wall(prev, next, wall_x);
        assert!(resolved.x < wall_x - WALL_WIDTH / 2.0);
        assert_eq!(resolved.y, 300.0);
    }

    #[test]
    fn test_wall_blocks_from_right() {
        let wall_x = 600.0;
        let resolved = block_by_wall(Vec2::new(650.0, 100.0), Vec2::new(610.0, 100.0), wall_x);
        assert!(resolved.x > wall_x + WALL_WIDTH / 2.0);
    }

    #[test]
    fn test_wall_ignores_distant_ship() {
        let next = Vec2::new(300.0, 300.0);
        assert_eq!(block_by_wall(Vec2::new(290.0, 300.0), next, 600.0), next);
    }
}
