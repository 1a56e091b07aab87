//! Simulation settings
//!
//! Every tunable constant lives here so a front end (or a JSON file) can
//! override any subset. Missing keys fall back to [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Simulation settings, held by [`crate::sim::SimState`] for its whole life
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    /// Point rings spin around and balls escape from
    pub center: Vec2,
    /// Constant acceleration applied to every ball (pixels/s²)
    pub gravity: Vec2,
    /// Full simulation steps per frame (elapsed time is split evenly)
    pub substeps: u32,
    /// Optional cap on ball speed after gravity is applied
    pub speed_limit: Option<f32>,

    // === Rings ===
    pub ring_count: usize,
    /// Arc span at creation (degrees)
    pub ring_start_angle: f32,
    pub ring_end_angle: f32,
    /// Innermost ring radii; each further ring adds `ring_radius_step`
    pub ring_inner_radius: f32,
    pub ring_outer_radius: f32,
    pub ring_radius_step: f32,
    /// Innermost ring spin (degrees/s)
    pub ring_angular_velocity: f32,
    /// Spin added per ring index (degrees/s)
    pub ring_angular_velocity_step: f32,

    // === Balls ===
    pub ball_radius: f32,
    pub ball_mass: f32,
    pub ball_velocity: Vec2,
    pub ball_color: [u8; 4],
    pub ball_initial_immunity: f32,

    // === Population growth ===
    pub growth_factor: f32,
    pub speed_boost: f32,
    pub spawn_immunity: f32,
    pub spawn_jitter: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            center: Vec2::new(CENTER.0, CENTER.1),
            gravity: Vec2::new(GRAVITY.0, GRAVITY.1),
            substeps: SUBSTEPS,
            speed_limit: None,

            ring_count: RING_COUNT,
            ring_start_angle: RING_START_ANGLE,
            ring_end_angle: RING_END_ANGLE,
            ring_inner_radius: RING_INNER_RADIUS,
            ring_outer_radius: RING_OUTER_RADIUS,
            ring_radius_step: RING_RADIUS_STEP,
            ring_angular_velocity: RING_ANGULAR_VELOCITY,
            ring_angular_velocity_step: RING_ANGULAR_VELOCITY_STEP,

            ball_radius: BALL_RADIUS,
            ball_mass: BALL_MASS,
            ball_velocity: Vec2::new(BALL_VELOCITY.0, BALL_VELOCITY.1),
            ball_color: BALL_COLOR,
            ball_initial_immunity: BALL_INITIAL_IMMUNITY,

            growth_factor: GROWTH_FACTOR,
            speed_boost: SPEED_BOOST,
            spawn_immunity: SPAWN_IMMUNITY,
            spawn_jitter: SPAWN_JITTER,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Enable the historical speed cap
    pub fn with_speed_limit(mut self, limit: f32) -> Self {
        self.speed_limit = Some(limit);
        self
    }

    /// Reject values the simulation cannot run with.
    ///
    /// Ring radii are deliberately not ordered-checked: the default band has
    /// outer < inner and the collision test is defined for that case.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let finite = [
            ("center.x", self.center.x),
            ("center.y", self.center.y),
            ("gravity.x", self.gravity.x),
            ("gravity.y", self.gravity.y),
            ("ring_start_angle", self.ring_start_angle),
            ("ring_end_angle", self.ring_end_angle),
            ("ring_inner_radius", self.ring_inner_radius),
            ("ring_outer_radius", self.ring_outer_radius),
            ("ring_radius_step", self.ring_radius_step),
            ("ring_angular_velocity", self.ring_angular_velocity),
            ("ring_angular_velocity_step", self.ring_angular_velocity_step),
            ("ball_velocity.x", self.ball_velocity.x),
            ("ball_velocity.y", self.ball_velocity.y),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(SettingsError::invalid(name, value, "must be finite"));
            }
        }

        let positive = [
            ("ball_radius", self.ball_radius),
            ("ball_mass", self.ball_mass),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::invalid(name, value, "must be positive"));
            }
        }

        let amplifying = [
            ("growth_factor", self.growth_factor),
            ("speed_boost", self.speed_boost),
        ];
        for (name, value) in amplifying {
            if !(value.is_finite() && value > 1.0) {
                return Err(SettingsError::invalid(name, value, "must be greater than 1"));
            }
        }

        let timers = [
            ("ball_initial_immunity", self.ball_initial_immunity),
            ("spawn_immunity", self.spawn_immunity),
        ];
        for (name, value) in timers {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::invalid(name, value, "must be non-negative"));
            }
        }

        if self.spawn_jitter < 0 {
            return Err(SettingsError::invalid(
                "spawn_jitter",
                self.spawn_jitter,
                "must be non-negative",
            ));
        }

        if self.substeps == 0 {
            return Err(SettingsError::invalid(
                "substeps",
                self.substeps,
                "must be at least 1",
            ));
        }

        if let Some(limit) = self.speed_limit {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(SettingsError::invalid(
                    "speed_limit",
                    limit,
                    "must be positive",
                ));
            }
        }

        Ok(())
    }
}
