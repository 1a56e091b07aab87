//! Centrifuge entry point
//!
//! Runs the simulation headless at a fixed frame time and logs how the
//! population grows. A windowed front end drives the same `advance` +
//! `render` pair once per frame.
//!
//! Environment:
//! - `CENTRIFUGE_SETTINGS`: path to a JSON settings file
//! - `CENTRIFUGE_SEED`: RNG seed (default 0)
//! - `RUST_LOG`: log filter (default `info`)

use centrifuge::Settings;
use centrifuge::consts::FRAME_DT;
use centrifuge::renderer::{FrameBuffer, render};
use centrifuge::sim::{SimEvent, SimRng, SimState, advance};

/// Simulated seconds per headless run
const RUN_SECONDS: f32 = 120.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Centrifuge (headless) starting...");

    let settings = match std::env::var("CENTRIFUGE_SETTINGS") {
        Ok(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("{err}");
                std::process::exit(1);
            }
        },
        Err(_) => Settings::default(),
    };

    let seed = match std::env::var("CENTRIFUGE_SEED") {
        Ok(raw) => raw.parse::<u64>().unwrap_or_else(|err| {
            log::warn!("Ignoring CENTRIFUGE_SEED={raw:?} ({err}), using seed 0");
            0
        }),
        Err(_) => 0,
    };

    let mut state = SimState::new(settings);
    let mut rng = SimRng::new(seed);
    let mut frame = FrameBuffer::default();
    let frames = (RUN_SECONDS / FRAME_DT).round() as u64;

    let mut bounces = 0u64;
    let mut collisions = 0u64;

    let mut exhausted_at = None;

    for _ in 0..frames {
        for event in advance(&mut state, &mut rng, FRAME_DT) {
            match event {
                SimEvent::Bounced { .. } => bounces += 1,
                SimEvent::BallsCollided { .. } => collisions += 1,
                SimEvent::RingConsumed { .. } | SimEvent::BallSpawned { .. } => {}
            }
        }

        if exhausted_at.is_none() && state.rings_exhausted() {
            exhausted_at = Some(state.elapsed);
        }

        frame.clear();
        render(&state, &mut frame);
    }

    match exhausted_at {
        Some(t) => log::info!("Every ring consumed after {t:.2}s"),
        None => log::info!("{} rings survived the run", state.rings.len()),
    }

    log::info!(
        "Seed {}: {:.1}s simulated, {} ticks, {} rings left, {} balls, {} bounces, {} ball collisions",
        rng.seed(),
        state.elapsed,
        state.time_ticks,
        state.rings.len(),
        state.balls.len(),
        bounces,
        collisions
    );
    log::info!(
        "Last frame: {} ring bytes, {} ball bytes",
        frame.ring_bytes().len(),
        frame.ball_bytes().len()
    );
}
