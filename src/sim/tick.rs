//! Simulation step
//!
//! One step runs five phases in a fixed order, each observing what the
//! previous ones changed:
//! 1. immunity countdown
//! 2. ball-ball collisions
//! 3. population growth (ring consumption + cloning)
//! 4. per-ball integration and ring bounce
//! 5. ring spin

use glam::Vec2;

use super::arc::Ring;
use super::collision::{arc_hit, circles_overlap, distance, elastic_collision, reflect_velocity};
use super::rng::Entropy;
use super::state::{Ball, SimEvent, SimState};
use crate::settings::Settings;

/// Advance the simulation by one step of `dt` seconds
///
/// Negative or non-finite elapsed times are treated as zero.
pub fn tick(state: &mut SimState, entropy: &mut impl Entropy, dt: f32) -> Vec<SimEvent> {
    let dt = sanitize_dt(dt);
    let mut events = Vec::new();

    state.time_ticks += 1;
    state.elapsed += dt as f64;

    for ball in &mut state.balls {
        ball.cool_down(dt);
    }

    resolve_pairs(&mut state.balls, &mut events);

    grow_population(state, entropy, &mut events);

    for ball in &mut state.balls {
        if let Some(ring) = step_ball(ball, &state.rings, &state.settings, dt, entropy) {
            log::trace!("Ball {} bounced off ring {}", ball.id, ring);
            events.push(SimEvent::Bounced {
                ball: ball.id,
                ring,
            });
        }
    }

    spin_rings(&mut state.rings, dt);

    events
}

/// Run one frame: `settings.substeps` equal ticks covering `frame_dt`
pub fn advance(state: &mut SimState, entropy: &mut impl Entropy, frame_dt: f32) -> Vec<SimEvent> {
    let substeps = state.settings.substeps.max(1);
    let sub_dt = sanitize_dt(frame_dt) / substeps as f32;

    let mut events = Vec::new();
    for _ in 0..substeps {
        events.extend(tick(state, entropy, sub_dt));
    }
    events
}

fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        log::warn!("Ignoring invalid elapsed time {dt}, stepping with 0");
        0.0
    }
}

/// Elastic exchange for every overlapping pair where neither ball is immune
///
/// Overlapping balls are not pushed apart, so a pair that stays overlapped
/// is resolved again on the next tick.
pub fn resolve_pairs(balls: &mut [Ball], events: &mut Vec<SimEvent>) {
    for i in 0..balls.len() {
        let (head, tail) = balls.split_at_mut(i + 1);
        let a = &mut head[i];

        for b in tail.iter_mut() {
            if a.is_immune() || b.is_immune() {
                continue;
            }
            if circles_overlap(a, b) && elastic_collision(a, b) {
                events.push(SimEvent::BallsCollided { a: a.id, b: b.id });
            }
        }
    }
}

/// Consume the innermost ring for every ball that has escaped it
///
/// A ball escapes when its distance from the center exceeds the innermost
/// ring's inner radius minus its own radius. Each escape removes ring 0,
/// appends a jittered immune clone of the ball (taken before growth), then
/// grows the ball and speeds it up. The same ball is re-tested against the
/// new innermost ring, so one ball can eat several rings in a single sweep.
/// Clones appended during the sweep are not visited until the next one.
pub fn grow_population(
    state: &mut SimState,
    entropy: &mut impl Entropy,
    events: &mut Vec<SimEvent>,
) {
    let center = state.settings.center;
    let sweep_len = state.balls.len();

    for j in 0..sweep_len {
        while let Some(innermost) = state.rings.first() {
            let ball = &state.balls[j];
            if distance(ball.pos, center) <= innermost.inner_radius - ball.radius {
                break;
            }

            let ring = state.rings.remove(0);
            let child_id = state.next_entity_id();
            let jitter = state.settings.spawn_jitter;
            let offset = Vec2::new(
                entropy.random_jitter(jitter) as f32,
                entropy.random_jitter(jitter) as f32,
            );

            let child = state.balls[j].spawn_clone(child_id, state.settings.spawn_immunity, offset);
            state.balls.push(child);

            let parent = &mut state.balls[j];
            parent.grow(state.settings.growth_factor, state.settings.speed_boost);
            let parent_id = parent.id;
            log::debug!(
                "Ball {} grew to r={:.2}, speed {:.1}",
                parent_id,
                parent.radius,
                parent.vel.length()
            );

            log::info!(
                "Ball {} escaped ring {} (r={}), spawned ball {}: {} rings, {} balls",
                parent_id,
                ring.id,
                ring.inner_radius,
                child_id,
                state.rings.len(),
                state.balls.len()
            );

            events.push(SimEvent::RingConsumed {
                ring: ring.id,
                ball: parent_id,
            });
            events.push(SimEvent::BallSpawned {
                parent: parent_id,
                child: child_id,
            });

            if state.rings.is_empty() {
                log::info!("All rings consumed");
            }
        }
    }
}

/// Integrate one ball and bounce it off the first ring its next position hits
///
/// Gravity is applied first. The next position is tested against rings
/// innermost first; on the first hit the velocity is reflected about the
/// direction from the ring center to the ball's current position, the ball
/// is recolored and it stays where it is this tick. Returns the id of the
/// ring that was hit.
pub fn step_ball(
    ball: &mut Ball,
    rings: &[Ring],
    settings: &Settings,
    dt: f32,
    entropy: &mut impl Entropy,
) -> Option<u32> {
    ball.just_bounced = false;
    ball.vel += settings.gravity * dt;
    if let Some(limit) = settings.speed_limit {
        ball.vel = ball.vel.clamp_length_max(limit);
    }

    let next_pos = ball.pos + ball.vel * dt;

    for ring in rings {
        if arc_hit(next_pos, ball.radius, ring) {
            let normal = (ball.pos - ring.center).normalize_or_zero();
            ball.vel = reflect_velocity(ball.vel, normal);
            ball.recolor(entropy);
            ball.just_bounced = true;
            return Some(ring.id);
        }
    }

    ball.pos = next_pos;
    None
}

/// Advance every ring by its own spin rate
pub fn spin_rings(rings: &mut [Ring], dt: f32) {
    for ring in rings {
        ring.spin(dt);
    }
}
