//! Simulation engine
//!
//! All physics lives here. This module is pure and single-threaded:
//! - Elapsed time and randomness come in as explicit inputs
//! - Seeded RNG gives reproducible runs
//! - Stable iteration order (rings innermost first, balls in spawn order)
//! - No rendering or platform dependencies

pub mod arc;
pub mod collision;
pub mod rng;
pub mod state;
pub mod tick;

pub use arc::{Ring, generate_rings};
pub use collision::{arc_hit, ball_arc_hit, circles_overlap, distance, elastic_collision, reflect_velocity};
pub use rng::{Entropy, SimRng};
pub use state::{Ball, Color, SimEvent, SimState};
pub use tick::{advance, grow_population, resolve_pairs, spin_rings, step_ball, tick};
