//! Read-only views of the simulation for drawing
//!
//! A front end never touches `SimState` directly: it either takes a
//! [`Snapshot`] after a step or implements [`DrawSink`] and lets [`render`]
//! walk the state.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Ball, Color, Ring, SimState};

/// What a front end needs to draw one ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RingView {
    pub center: Vec2,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Degrees, in [0, 360)
    pub start_angle: f32,
    /// Degrees, in [0, 360)
    pub end_angle: f32,
}

impl From<&Ring> for RingView {
    fn from(ring: &Ring) -> Self {
        Self {
            center: ring.center,
            inner_radius: ring.inner_radius,
            outer_radius: ring.outer_radius,
            start_angle: ring.normalized_start(),
            end_angle: ring.normalized_end(),
        }
    }
}

/// What a front end needs to draw one ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl From<&Ball> for BallView {
    fn from(ball: &Ball) -> Self {
        Self {
            pos: ball.pos,
            radius: ball.radius,
            color: ball.color,
        }
    }
}

/// Everything drawable after a step
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    /// Innermost first
    pub rings: Vec<RingView>,
    /// Spawn order
    pub balls: Vec<BallView>,
}

impl Snapshot {
    pub fn capture(state: &SimState) -> Self {
        Self {
            rings: state.rings.iter().map(RingView::from).collect(),
            balls: state.balls.iter().map(BallView::from).collect(),
        }
    }
}

/// Receives draw calls, one per entity
pub trait DrawSink {
    fn draw_ring(&mut self, ring: &RingView);
    fn draw_ball(&mut self, ball: &BallView);
}

/// Feed every ball, then every ring, to `sink`
pub fn render(state: &SimState, sink: &mut impl DrawSink) {
    for ball in &state.balls {
        sink.draw_ball(&BallView::from(ball));
    }
    for ring in &state.rings {
        sink.draw_ring(&RingView::from(ring));
    }
}
