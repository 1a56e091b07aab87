//! GPU-ready instance data for rings and balls

use bytemuck::{Pod, Zeroable};

use super::snapshot::{BallView, DrawSink, RingView};

/// One ring arc: center, radii and normalized span in degrees
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RingInstance {
    pub center: [f32; 2],
    /// [inner, outer]
    pub radii: [f32; 2],
    /// [start, end] in degrees
    pub angles: [f32; 2],
    pub color: [f32; 4],
}

impl RingInstance {
    pub fn new(ring: &RingView, color: [f32; 4]) -> Self {
        Self {
            center: ring.center.to_array(),
            radii: [ring.inner_radius, ring.outer_radius],
            angles: [ring.start_angle, ring.end_angle],
            color,
        }
    }
}

/// One filled circle
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BallInstance {
    pub position: [f32; 2],
    pub radius: f32,
    pub _pad: f32,
    pub color: [f32; 4],
}

impl From<&BallView> for BallInstance {
    fn from(ball: &BallView) -> Self {
        Self {
            position: ball.pos.to_array(),
            radius: ball.radius,
            _pad: 0.0,
            color: ball.color.to_f32_array(),
        }
    }
}

/// Colors for simulation elements
pub mod colors {
    pub const RING: [f32; 4] = [0.51, 0.51, 0.51, 1.0];
}

/// Collects one frame of instances, ready to upload
#[derive(Debug, Default)]
pub struct FrameBuffer {
    pub rings: Vec<RingInstance>,
    pub balls: Vec<BallInstance>,
}

impl FrameBuffer {
    pub fn clear(&mut self) {
        self.rings.clear();
        self.balls.clear();
    }

    pub fn ring_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.rings)
    }

    pub fn ball_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.balls)
    }
}

impl DrawSink for FrameBuffer {
    fn draw_ring(&mut self, ring: &RingView) {
        self.rings.push(RingInstance::new(ring, colors::RING));
    }

    fn draw_ball(&mut self, ball: &BallView) {
        self.balls.push(BallInstance::from(ball));
    }
}
