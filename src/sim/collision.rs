//! Collision detection and response
//!
//! Two kinds of contact exist: a ball against a spinning ring arc, and a
//! ball against another ball. Neither resolves penetration; responses only
//! change velocities.

use glam::Vec2;

use super::arc::Ring;
use super::state::Ball;
use crate::heading_degrees;

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n, with `normal` normalized first.
/// A zero normal leaves the velocity unchanged.
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    let n = normal.normalize_or_zero();
    velocity - 2.0 * velocity.dot(n) * n
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Check whether a ball centered at `pos` overlaps a ring's solid arc
///
/// The radial band test rejects `d < inner - r + w` and `d > outer + r - w`
/// where `w = outer - inner`. With the usual inverted defaults (outer <
/// inner) this accepts `outer - r <= d <= inner + r`.
pub fn arc_hit(pos: Vec2, radius: f32, ring: &Ring) -> bool {
    let to_ball = pos - ring.center;
    let dist = to_ball.length();
    let width = ring.width();

    if dist < ring.inner_radius - radius + width || dist > ring.outer_radius + radius - width {
        return false;
    }

    ring.contains_angle(heading_degrees(to_ball))
}

/// [`arc_hit`] for an existing ball
#[inline]
pub fn ball_arc_hit(ball: &Ball, ring: &Ring) -> bool {
    arc_hit(ball.pos, ball.radius, ring)
}

/// Circle-circle overlap, touching counts
#[inline]
pub fn circles_overlap(a: &Ball, b: &Ball) -> bool {
    distance(a.pos, b.pos) <= a.radius + b.radius
}

/// Mass-weighted elastic exchange along the line of centers
///
/// Returns the new velocities, or `None` when the centers coincide (the line
/// of centers is undefined) or the combined mass is not positive.
pub fn elastic_response(
    x1: Vec2,
    v1: Vec2,
    m1: f32,
    x2: Vec2,
    v2: Vec2,
    m2: f32,
) -> Option<(Vec2, Vec2)> {
    let delta_pos = x1 - x2;
    let dist_squared = delta_pos.dot(delta_pos);
    let total_mass = m1 + m2;
    if dist_squared == 0.0 || !(total_mass.is_finite() && total_mass > 0.0) {
        return None;
    }

    let factor1 = (2.0 * m2 / total_mass) * ((v1 - v2).dot(delta_pos) / dist_squared);
    let new_v1 = v1 - delta_pos * factor1;

    let delta_pos = x2 - x1;
    let factor2 = (2.0 * m1 / total_mass) * ((v2 - v1).dot(delta_pos) / dist_squared);
    let new_v2 = v2 - delta_pos * factor2;

    Some((new_v1, new_v2))
}

/// Apply [`elastic_response`] to a pair of balls in place
///
/// Positions are not touched, so overlapping balls stay overlapped and are
/// resolved again next tick. Returns whether velocities changed hands.
pub fn elastic_collision(a: &mut Ball, b: &mut Ball) -> bool {
    match elastic_response(a.pos, a.vel, a.mass, b.pos, b.vel, b.mass) {
        Some((va, vb)) => {
            a.vel = va;
            b.vel = vb;
            true
        }
        None => {
            log::trace!("Skipping degenerate pair {} and {}", a.id, b.id);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar_to_cartesian;
    use crate::sim::state::Color;
    use proptest::prelude::*;

    fn ring(inner: f32, outer: f32, start: f32, end: f32) -> Ring {
        Ring::new(1, Vec2::ZERO, inner, outer, start, end, 0.0)
    }

    fn ball(pos: Vec2, vel: Vec2, radius: f32, mass: f32) -> Ball {
        Ball::new(1, pos, vel, radius, mass, Color::new(0, 0, 0, 255))
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let reflected = reflect_velocity(Vec2::new(100.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);

        // Normal need not be unit length
        let reflected = reflect_velocity(Vec2::new(100.0, 0.0), Vec2::new(-5.0, 0.0));
        assert!((reflected.x - (-100.0)).abs() < 0.001);
    }

    #[test]
    fn test_reflect_off_zero_normal_is_identity() {
        let v = Vec2::new(3.0, -4.0);
        assert_eq!(reflect_velocity(v, Vec2::ZERO), v);
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_arc_hit_inverted_band() {
        // inner 70, outer 65, r 8 => accepted radial range is [57, 78]
        let r = ring(70.0, 65.0, 0.0, 330.0);
        assert!(arc_hit(polar_to_cartesian(Vec2::ZERO, 60.0, 45.0), 8.0, &r));
        assert!(arc_hit(polar_to_cartesian(Vec2::ZERO, 77.0, 45.0), 8.0, &r));
        assert!(!arc_hit(polar_to_cartesian(Vec2::ZERO, 50.0, 45.0), 8.0, &r));
        assert!(!arc_hit(polar_to_cartesian(Vec2::ZERO, 90.0, 45.0), 8.0, &r));
    }

    #[test]
    fn test_arc_hit_conventional_band_is_narrowed() {
        // inner 100, outer 120, r 8 => rejects below 112 and above 108: never hits
        let r = ring(100.0, 120.0, 0.0, 359.0);
        for d in [95.0, 100.0, 110.0, 120.0, 125.0] {
            assert!(!arc_hit(polar_to_cartesian(Vec2::ZERO, d, 10.0), 8.0, &r));
        }
    }

    #[test]
    fn test_arc_hit_gap() {
        // Solid from 0..330, gap 330..360
        let r = ring(70.0, 65.0, 0.0, 330.0);
        assert!(!arc_hit(polar_to_cartesian(Vec2::ZERO, 65.0, 345.0), 8.0, &r));
        assert!(arc_hit(polar_to_cartesian(Vec2::ZERO, 65.0, 300.0), 8.0, &r));
    }

    #[test]
    fn test_arc_hit_uses_ring_center() {
        let center = Vec2::new(400.0, 400.0);
        let r = Ring::new(1, center, 70.0, 65.0, 0.0, 330.0, 0.0);
        assert!(arc_hit(polar_to_cartesian(center, 65.0, 90.0), 8.0, &r));
        assert!(!arc_hit(polar_to_cartesian(Vec2::ZERO, 65.0, 90.0), 8.0, &r));
    }

    #[test]
    fn test_degenerate_band_ball_at_center() {
        // Band width -5; center distance 0 < 70 - 8 - 5 = 57, rejected radially
        let r = ring(70.0, 65.0, 0.0, 330.0);
        let b = ball(Vec2::ZERO, Vec2::ZERO, 8.0, 10.0);
        assert!(!ball_arc_hit(&b, &r));
    }

    #[test]
    fn test_circles_overlap_touching() {
        let a = ball(Vec2::ZERO, Vec2::ZERO, 5.0, 1.0);
        let b = ball(Vec2::new(10.0, 0.0), Vec2::ZERO, 5.0, 1.0);
        let c = ball(Vec2::new(10.1, 0.0), Vec2::ZERO, 5.0, 1.0);
        assert!(circles_overlap(&a, &b));
        assert!(!circles_overlap(&a, &c));
    }

    #[test]
    fn test_head_on_equal_mass_swaps_velocities() {
        let mut a = ball(Vec2::new(-4.0, 0.0), Vec2::new(10.0, 0.0), 5.0, 2.0);
        let mut b = ball(Vec2::new(4.0, 0.0), Vec2::new(-6.0, 0.0), 5.0, 2.0);
        assert!(elastic_collision(&mut a, &mut b));
        assert!((a.vel - Vec2::new(-6.0, 0.0)).length() < 1e-4);
        assert!((b.vel - Vec2::new(10.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_coincident_centers_are_skipped() {
        let mut a = ball(Vec2::ONE, Vec2::new(1.0, 0.0), 5.0, 1.0);
        let mut b = ball(Vec2::ONE, Vec2::new(-1.0, 0.0), 5.0, 1.0);
        assert!(!elastic_collision(&mut a, &mut b));
        assert_eq!(a.vel, Vec2::new(1.0, 0.0));
        assert_eq!(b.vel, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_massless_pair_is_skipped() {
        let mut a = ball(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), 5.0, 0.0);
        let mut b = ball(Vec2::new(3.0, 0.0), Vec2::new(-1.0, 0.0), 5.0, 0.0);
        assert!(!elastic_collision(&mut a, &mut b));
        assert_eq!(a.vel, Vec2::new(1.0, 0.0));
        assert_eq!(b.vel, Vec2::new(-1.0, 0.0));
        assert!(elastic_response(Vec2::ZERO, Vec2::X, 1.0, Vec2::ONE, Vec2::ZERO, -1.0).is_none());
    }

    #[test]
    fn test_positions_untouched() {
        let mut a = ball(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), 5.0, 1.0);
        let mut b = ball(Vec2::new(3.0, 0.0), Vec2::new(-1.0, 0.0), 5.0, 1.0);
        elastic_collision(&mut a, &mut b);
        assert_eq!(a.pos, Vec2::new(0.0, 0.0));
        assert_eq!(b.pos, Vec2::new(3.0, 0.0));
    }

    proptest! {
        #[test]
        fn arc_hit_absorbs_full_turns(
            start in -720i32..720,
            span in 0i32..360,
            laps in -3i32..3,
            dist in 40.0f32..100.0,
            heading in 0.0f32..360.0,
        ) {
            let start = start as f32;
            let end = start + span as f32;
            let turn = 360.0 * laps as f32;
            let pos = polar_to_cartesian(Vec2::ZERO, dist, heading);

            let base = ring(70.0, 65.0, start, end);
            let start_shifted = ring(70.0, 65.0, start + turn, end);
            let end_shifted = ring(70.0, 65.0, start, end + turn);

            let hit = arc_hit(pos, 8.0, &base);
            prop_assert_eq!(hit, arc_hit(pos, 8.0, &start_shifted));
            prop_assert_eq!(hit, arc_hit(pos, 8.0, &end_shifted));
        }

        #[test]
        fn elastic_conserves_momentum_and_energy(
            x1 in (-50.0f32..50.0, -50.0f32..50.0),
            x2 in (-50.0f32..50.0, -50.0f32..50.0),
            v1 in (-100.0f32..100.0, -100.0f32..100.0),
            v2 in (-100.0f32..100.0, -100.0f32..100.0),
            m1 in 0.5f32..50.0,
            m2 in 0.5f32..50.0,
        ) {
            let x1 = Vec2::new(x1.0, x1.1);
            let x2 = Vec2::new(x2.0, x2.1);
            prop_assume!((x1 - x2).length() > 1.0);
            let v1 = Vec2::new(v1.0, v1.1);
            let v2 = Vec2::new(v2.0, v2.1);

            let (n1, n2) = elastic_response(x1, v1, m1, x2, v2, m2).expect("distinct centers");

            let p_before = v1 * m1 + v2 * m2;
            let p_after = n1 * m1 + n2 * m2;
            let scale = p_before.length().max(1.0) + (v1 - v2).length() * (m1 + m2);
            prop_assert!((p_before - p_after).length() <= scale * 1e-4);

            let e_before = 0.5 * m1 * v1.length_squared() + 0.5 * m2 * v2.length_squared();
            let e_after = 0.5 * m1 * n1.length_squared() + 0.5 * m2 * n2.length_squared();
            prop_assert!((e_before - e_after).abs() <= e_before.max(1.0) * 1e-3);
        }
    }
}
