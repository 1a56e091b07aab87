//! Centrifuge - spinning rings, splitting balls
//!
//! Core modules:
//! - `sim`: Simulation engine (ring geometry, ball integration, population growth)
//! - `renderer`: Read-only snapshots and draw sinks for a front end
//! - `settings`: Overridable simulation constants
//! - `error`: Settings loading/validation errors

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use settings::Settings;

use glam::Vec2;

/// Simulation default constants
pub mod consts {
    /// Side length of the square arena (pixels)
    pub const ARENA_SIZE: f32 = 800.0;
    /// Point every ring spins around and every ball escapes from
    pub const CENTER: (f32, f32) = (ARENA_SIZE / 2.0, ARENA_SIZE / 2.0);
    /// Constant downward pull (pixels/s²), screen coordinates (y grows down)
    pub const GRAVITY: (f32, f32) = (0.0, 150.0);

    /// Nominal frame time used by headless runs
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Full simulation steps per frame
    pub const SUBSTEPS: u32 = 1;

    /// Ring defaults
    pub const RING_COUNT: usize = 9;
    pub const RING_START_ANGLE: f32 = 0.0;
    pub const RING_END_ANGLE: f32 = 330.0;
    /// Innermost ring band. Outer is smaller than inner on purpose: the
    /// band test widens by the (negative) width on both sides.
    pub const RING_INNER_RADIUS: f32 = 70.0;
    pub const RING_OUTER_RADIUS: f32 = 65.0;
    /// Radius added per ring, moving outward
    pub const RING_RADIUS_STEP: f32 = 40.0;
    /// Angular velocity of the innermost ring (degrees/s)
    pub const RING_ANGULAR_VELOCITY: f32 = 10.0;
    /// Angular velocity added per ring index (degrees/s)
    pub const RING_ANGULAR_VELOCITY_STEP: f32 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_MASS: f32 = 10.0;
    pub const BALL_VELOCITY: (f32, f32) = (10.0, 10.0);
    pub const BALL_COLOR: [u8; 4] = [0, 10, 20, 255];
    /// The first ball starts immune as well
    pub const BALL_INITIAL_IMMUNITY: f32 = 1.0;

    /// Escaping ball radius multiplier
    pub const GROWTH_FACTOR: f32 = 1.2;
    /// Escaping ball velocity multiplier
    pub const SPEED_BOOST: f32 = 1.1;
    /// Seconds a fresh clone is ignored by ball-ball collisions
    pub const SPAWN_IMMUNITY: f32 = 1.0;
    /// Clone position offset range, inclusive on both ends (pixels)
    pub const SPAWN_JITTER: i32 = 10;
    /// Historical speed cap (disabled unless set in settings)
    pub const SPEED_LIMIT: f32 = 100.0;
}

/// Normalize an angle in degrees to [0, 360)
///
/// Uses truncated remainder then shifts negatives up, so values that are
/// whole laps apart land on the same result.
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let mut a = angle % 360.0;
    if a < 0.0 {
        a += 360.0;
    }
    a
}

/// Direction of `offset` in degrees, in [0, 360)
#[inline]
pub fn heading_degrees(offset: Vec2) -> f32 {
    let mut angle = offset.y.atan2(offset.x).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }
    angle
}

/// Convert polar (r, degrees) around `center` to cartesian
#[inline]
pub fn polar_to_cartesian(center: Vec2, r: f32, degrees: f32) -> Vec2 {
    let theta = degrees.to_radians();
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}
