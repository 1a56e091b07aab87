//! Rendering boundary
//!
//! The simulation draws nothing itself. It hands out snapshots and drives a
//! [`DrawSink`]; [`FrameBuffer`] packs those calls into GPU instance data.

pub mod instance;
pub mod snapshot;

pub use instance::{BallInstance, FrameBuffer, RingInstance};
pub use snapshot::{BallView, DrawSink, RingView, Snapshot, render};
