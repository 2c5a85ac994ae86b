//! Collision tests and toroidal wrapping
//!
//! Everything is treated as a circle: asteroid silhouettes are jagged, but
//! hits are decided on the nominal radius.

use glam::Vec2;

/// Two circles overlap when their centres are closer than the sum of radii
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance_squared(b) < (a_radius + b_radius) * (a_radius + b_radius)
}

/// A point lies strictly inside a circle
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) < radius * radius
}

/// Wrap one coordinate. Once the entity is fully past an edge (by its own
/// radius) it reappears just outside the opposite edge.
#[inline]
pub fn wrap_axis(value: f32, radius: f32, extent: f32) -> f32 {
    if value < -radius {
        extent + radius
    } else if value > extent + radius {
        -radius
    } else {
        value
    }
}

/// Wrap a position on a `field`-sized torus
#[inline]
pub fn wrap_position(pos: Vec2, radius: f32, field: Vec2) -> Vec2 {
    Vec2::new(
        wrap_axis(pos.x, radius, field.x),
        wrap_axis(pos.y, radius, field.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 10.0, Vec2::new(15.0, 0.0), 10.0));
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(20.0, 0.0), 10.0));
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(30.0, 0.0), 10.0));
    }

    #[test]
    fn test_point_in_circle() {
        assert!(point_in_circle(Vec2::new(3.0, 4.0), Vec2::ZERO, 5.5));
        // Boundary is a miss
        assert!(!point_in_circle(Vec2::new(3.0, 4.0), Vec2::ZERO, 5.0));
    }

    #[test]
    fn test_wrap_each_edge() {
        let field = Vec2::new(800.0, 600.0);
        let r = 10.0;
        assert_eq!(wrap_position(Vec2::new(-10.5, 300.0), r, field), Vec2::new(810.0, 300.0));
        assert_eq!(wrap_position(Vec2::new(810.5, 300.0), r, field), Vec2::new(-10.0, 300.0));
        assert_eq!(wrap_position(Vec2::new(400.0, -11.0), r, field), Vec2::new(400.0, 610.0));
        assert_eq!(wrap_position(Vec2::new(400.0, 611.0), r, field), Vec2::new(400.0, -10.0));
    }

    #[test]
    fn test_wrap_point_entity() {
        let field = Vec2::new(800.0, 600.0);
        assert_eq!(wrap_position(Vec2::new(-0.1, 601.0), 0.0, field), Vec2::new(800.0, 0.0));
    }

    #[test]
    fn test_no_wrap_inside_margin() {
        let field = Vec2::new(800.0, 600.0);
        let pos = Vec2::new(-5.0, 605.0);
        assert_eq!(wrap_position(pos, 10.0, field), pos);
    }

    proptest! {
        #[test]
        fn prop_wrapped_position_stays_in_band(
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
            r in 0.0f32..60.0,
        ) {
            let field = Vec2::new(800.0, 600.0);
            let wrapped = wrap_position(Vec2::new(x, y), r, field);
            if (-r..=field.x + r).contains(&x) {
                prop_assert_eq!(wrapped.x, x);
            } else {
                prop_assert!(wrapped.x == -r || wrapped.x == field.x + r);
            }
            if (-r..=field.y + r).contains(&y) {
                prop_assert_eq!(wrapped.y, y);
            } else {
                prop_assert!(wrapped.y == -r || wrapped.y == field.y + r);
            }
        }

        #[test]
        fn prop_overlap_is_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            ar in 0.0f32..50.0, br in 0.0f32..50.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(circles_overlap(a, ar, b, br), circles_overlap(b, br, a, ar));
        }
    }
}
