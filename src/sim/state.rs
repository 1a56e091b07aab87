//! Simulation state and entity types
//!
//! The state exclusively owns both arenas: rings (innermost first) and balls
//! (spawn order). Nothing outside holds references into them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arc::{Ring, generate_rings};
use super::rng::Entropy;
use crate::settings::Settings;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }

    /// Normalized [r, g, b, a] for shaders
    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub color: Color,
    /// Set when this tick's integration ended in a ring bounce
    pub just_bounced: bool,
    /// Seconds left before ball-ball collisions apply to this ball
    pub immunity: f32,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, mass: f32, color: Color) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            mass,
            color,
            just_bounced: false,
            immunity: 0.0,
        }
    }

    /// Whether the immunity window is still open
    #[inline]
    pub fn is_immune(&self) -> bool {
        self.immunity > 0.0
    }

    /// Count the immunity window down, stopping at zero
    pub fn cool_down(&mut self, dt: f32) {
        if self.immunity > 0.0 {
            self.immunity = (self.immunity - dt).max(0.0);
        }
    }

    /// Pick a fresh random color (alpha untouched)
    pub fn recolor(&mut self, entropy: &mut impl Entropy) {
        self.color.r = entropy.random_byte();
        self.color.g = entropy.random_byte();
        self.color.b = entropy.random_byte();
    }

    /// Copy of this ball with a new id, an open immunity window and a small
    /// position offset
    pub fn spawn_clone(&self, id: u32, immunity: f32, offset: Vec2) -> Self {
        Self {
            id,
            pos: self.pos + offset,
            immunity,
            ..self.clone()
        }
    }

    /// Grow after escaping a ring
    pub fn grow(&mut self, growth_factor: f32, speed_boost: f32) {
        self.radius *= growth_factor;
        self.vel *= speed_boost;
    }
}

/// Something that happened during a tick, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// Ball reflected off a ring
    Bounced { ball: u32, ring: u32 },
    /// Two balls exchanged velocity
    BallsCollided { a: u32, b: u32 },
    /// Innermost ring removed because `ball` escaped it
    RingConsumed { ring: u32, ball: u32 },
    /// A clone of `parent` was appended
    BallSpawned { parent: u32, child: u32 },
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub settings: Settings,
    /// Active rings, innermost first
    pub rings: Vec<Ring>,
    /// Active balls, in spawn order
    pub balls: Vec<Ball>,
    /// Steps taken so far
    pub time_ticks: u64,
    /// Simulated seconds so far
    pub elapsed: f64,
    /// Next entity ID
    next_id: u32,
}

impl SimState {
    /// Create the starting layout: a full nest of rings and one ball at the
    /// center
    ///
    /// Settings that fail [`Settings::validate`] are accepted but logged; the
    /// collision response refuses pairs whose mass would divide by zero.
    pub fn new(settings: Settings) -> Self {
        if let Err(err) = settings.validate() {
            log::warn!("Starting with unvalidated settings: {err}");
        }

        let mut next_id = 1;
        let rings = generate_rings(&settings, || {
            let id = next_id;
            next_id += 1;
            id
        });

        let mut state = Self {
            settings,
            rings,
            balls: Vec::new(),
            time_ticks: 0,
            elapsed: 0.0,
            next_id,
        };

        let id = state.next_entity_id();
        let s = &state.settings;
        let mut ball = Ball::new(
            id,
            s.center,
            s.ball_velocity,
            s.ball_radius,
            s.ball_mass,
            Color::from_array(s.ball_color),
        );
        ball.immunity = s.ball_initial_immunity;
        state.balls.push(ball);

        if let Some(innermost) = state.rings.first() {
            if innermost.width() < 0.0 {
                log::debug!(
                    "Ring band inverted (inner {} > outer {}), band test widens outward",
                    innermost.inner_radius,
                    innermost.outer_radius
                );
            }
        }
        log::info!(
            "Simulation ready: {} rings, {} ball",
            state.rings.len(),
            state.balls.len()
        );

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace the ball list (tests and scripted scenarios)
    pub fn with_balls(mut self, balls: Vec<Ball>) -> Self {
        if let Some(max_id) = balls.iter().map(|b| b.id).max() {
            self.next_id = self.next_id.max(max_id + 1);
        }
        self.balls = balls;
        self
    }

    /// Replace the ring list (tests and scripted scenarios)
    pub fn with_rings(mut self, rings: Vec<Ring>) -> Self {
        if let Some(max_id) = rings.iter().map(|r| r.id).max() {
            self.next_id = self.next_id.max(max_id + 1);
        }
        self.rings = rings;
        self
    }

    /// Whether every ring has been consumed
    pub fn rings_exhausted(&self) -> bool {
        self.rings.is_empty()
    }
}
