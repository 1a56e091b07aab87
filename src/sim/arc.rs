//! Ring geometry: rotating partial annuli around the arena center
//!
//! A ring is defined by:
//! - inner_radius, outer_radius: radial band (fixed at creation)
//! - start_angle, end_angle: angular extent in degrees (spins every tick)
//! - angular_velocity: degrees per second
//!
//! Angles are stored unbounded and only folded into [0, 360) when queried.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::normalize_degrees;
use crate::settings::Settings;

/// A spinning arc segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub id: u32,
    /// Start angle (degrees, unbounded)
    pub start_angle: f32,
    /// End angle (degrees, unbounded)
    pub end_angle: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Shared arena center
    pub center: Vec2,
    /// Spin rate (degrees/s)
    pub angular_velocity: f32,
}

impl Ring {
    pub fn new(
        id: u32,
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        start_angle: f32,
        end_angle: f32,
        angular_velocity: f32,
    ) -> Self {
        Self {
            id,
            start_angle,
            end_angle,
            inner_radius,
            outer_radius,
            center,
            angular_velocity,
        }
    }

    /// Radial width of the band (negative when outer < inner)
    #[inline]
    pub fn width(&self) -> f32 {
        self.outer_radius - self.inner_radius
    }

    /// Start angle folded into [0, 360)
    #[inline]
    pub fn normalized_start(&self) -> f32 {
        normalize_degrees(self.start_angle)
    }

    /// End angle folded into [0, 360)
    #[inline]
    pub fn normalized_end(&self) -> f32 {
        normalize_degrees(self.end_angle)
    }

    /// Check if a heading (degrees, [0, 360)) falls on the solid arc.
    ///
    /// Equal normalized endpoints take the wraparound branch, so a full lap
    /// only matches `angle >= start`.
    pub fn contains_angle(&self, angle: f32) -> bool {
        let start = self.normalized_start();
        let end = self.normalized_end();

        if start < end {
            angle >= start && angle <= end
        } else {
            // Wraparound case (e.g., start=300°, end=30°)
            angle >= start || angle <= end
        }
    }

    /// Advance the arc by its spin rate
    pub fn spin(&mut self, dt: f32) {
        let delta = self.angular_velocity * dt;
        self.start_angle += delta;
        self.end_angle += delta;
    }
}

/// Build the initial nest of rings, innermost first.
///
/// Ring `i` gets radii offset by `i * ring_radius_step` and spins at
/// `ring_angular_velocity + i * ring_angular_velocity_step`.
pub fn generate_rings(settings: &Settings, mut next_id: impl FnMut() -> u32) -> Vec<Ring> {
    let mut rings = Vec::with_capacity(settings.ring_count);
    let mut inner_r = settings.ring_inner_radius;
    let mut outer_r = settings.ring_outer_radius;

    for i in 0..settings.ring_count {
        let angular_velocity =
            settings.ring_angular_velocity + settings.ring_angular_velocity_step * i as f32;
        rings.push(Ring::new(
            next_id(),
            settings.center,
            inner_r,
            outer_r,
            settings.ring_start_angle,
            settings.ring_end_angle,
            angular_velocity,
        ));
        inner_r += settings.ring_radius_step;
        outer_r += settings.ring_radius_step;
    }

    rings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(start: f32, end: f32) -> Ring {
        Ring::new(1, Vec2::ZERO, 100.0, 120.0, start, end, 0.0)
    }

    #[test]
    fn test_contains_angle_no_wrap() {
        let r = ring(0.0, 90.0);
        assert!(r.contains_angle(0.0));
        assert!(r.contains_angle(45.0));
        assert!(r.contains_angle(90.0));
        assert!(!r.contains_angle(180.0));
        assert!(!r.contains_angle(270.0));
    }

    #[test]
    fn test_contains_angle_wraparound() {
        let r = ring(300.0, 30.0);
        assert!(r.contains_angle(350.0));
        assert!(r.contains_angle(0.0));
        assert!(r.contains_angle(30.0));
        assert!(!r.contains_angle(90.0));
        assert!(!r.contains_angle(299.0));
    }

    #[test]
    fn test_contains_angle_after_spinning_past_a_lap() {
        // 330..660 folds to 330..300, a wraparound arc missing 300..330
        let r = ring(330.0, 660.0);
        assert!(r.contains_angle(0.0));
        assert!(r.contains_angle(200.0));
        assert!(!r.contains_angle(315.0));
    }

    #[test]
    fn test_full_lap_takes_wraparound_branch() {
        // start == end after folding: `angle >= start || angle <= end` covers everything
        let r = ring(90.0, 450.0);
        assert_eq!(r.normalized_start(), r.normalized_end());
        for angle in [0.0, 45.0, 90.0, 200.0, 359.9] {
            assert!(r.contains_angle(angle), "angle {angle}");
        }
    }

    #[test]
    fn test_spin_keeps_span_and_is_unbounded() {
        let mut r = Ring::new(1, Vec2::ZERO, 70.0, 65.0, 0.0, 330.0, 90.0);
        for _ in 0..10 {
            r.spin(1.0);
        }
        assert_eq!(r.start_angle, 900.0);
        assert_eq!(r.end_angle, 1230.0);
        assert_eq!(r.normalized_start(), 180.0);
        assert_eq!(r.normalized_end(), 150.0);
    }

    #[test]
    fn test_generate_rings_layout() {
        let settings = Settings::default();
        let mut id = 0;
        let rings = generate_rings(&settings, || {
            id += 1;
            id
        });
        assert_eq!(rings.len(), 9);
        assert_eq!(rings[0].inner_radius, 70.0);
        assert_eq!(rings[0].outer_radius, 65.0);
        assert_eq!(rings[0].angular_velocity, 10.0);
        assert_eq!(rings[8].inner_radius, 70.0 + 8.0 * 40.0);
        assert_eq!(rings[8].angular_velocity, 90.0);
        assert!(rings.windows(2).all(|w| w[0].inner_radius < w[1].inner_radius));
        assert!(rings.iter().all(|r| r.center == settings.center));
        assert_eq!(rings.iter().map(|r| r.id).collect::<Vec<_>>(), (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn test_generate_zero_rings() {
        let settings = Settings {
            ring_count: 0,
            ..Default::default()
        };
        assert!(generate_rings(&settings, || 0).is_empty());
    }
}
