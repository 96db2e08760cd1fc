//! Fixed-step explicit Euler integration for the N-body system
//!
//! One tick is two phases:
//! 1. force pass: every unordered pair `(i, j)`, `i < j`, in ascending order
//! 2. drift: `x += v * dt` for every body, then publish the new position
//!
//! The force pass finishes before any position moves, so every pair sees the
//! positions from the start of the tick.

use tracing::{trace, warn};

use super::forces::PairInteraction;
use super::scenario::Scenario;
use super::states::{NVec3, System};

/// Receiver for per-tick position updates (the renderer side).
/// Publication is fire-and-forget: a sink has no way to fail the tick.
pub trait PositionSink {
    fn publish(&mut self, body_id: usize, position: &NVec3);
}

/// Sink that drops every update
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PositionSink for NullSink {
    fn publish(&mut self, _body_id: usize, _position: &NVec3) {}
}

/// Sink that emits every update as a `trace` event
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl PositionSink for LogSink {
    fn publish(&mut self, body_id: usize, position: &NVec3) {
        trace!(body_id, x = position.x, y = position.y, z = position.z, "position");
    }
}

/// Advance `sys` by `dt` with an already-scaled step.
pub fn euler_step<F, S>(sys: &mut System, forces: &F, dt: f64, sink: &mut S)
where
    F: PairInteraction + ?Sized,
    S: PositionSink + ?Sized,
{
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    // Force pass over (i, j), i < j, in ascending order.
    // Split after i so body i and every later body j can be borrowed together
    for i in 0..n - 1 {
        let (left, right) = sys.bodies.split_at_mut(i + 1);
        let bi = &mut left[i];
        for bj in right.iter_mut() {
            forces.interact(bi, bj, dt);
        }
    }

    // Drift: x_n+1 = x_n + dt * v_n+1
    for (i, b) in sys.bodies.iter_mut().enumerate() {
        b.x += dt * b.v;
        sink.publish(i, &b.x);
    }

    sys.t += dt;
}

/// Run one tick of `scenario` for `raw_dt` seconds of clock time.
///
/// The time scale is read once, so a concurrent change applies from the next
/// tick on. Negative or non-finite clock input, or a scaled step that
/// overflows, leaves the state untouched.
pub fn step<S>(scenario: &mut Scenario, raw_dt: f64, sink: &mut S)
where
    S: PositionSink + ?Sized,
{
    if !(raw_dt.is_finite() && raw_dt >= 0.0) {
        warn!(raw_dt, "ignoring invalid clock delta");
        return;
    }

    let time_scale = scenario.time_scale.get();
    let dt = raw_dt * time_scale;
    if !dt.is_finite() {
        warn!(raw_dt, time_scale, "scaled step overflows, tick skipped");
        return;
    }

    let Scenario { system, forces, .. } = scenario;
    euler_step(system, &*forces, dt, sink);
}
