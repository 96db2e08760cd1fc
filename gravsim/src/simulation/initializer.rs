//! Random initial conditions
//!
//! Draws `count` bodies with:
//! - mass picked uniformly from a small discrete set
//! - each position component uniform in `[min, max]`
//! - each velocity component uniform in `[-v, v]`
//!
//! The draw is a pure function of the rng state, so a fixed seed reproduces
//! the same bodies.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{ensure_positive, SimError, SimResult};
use crate::simulation::states::{Body, NVec3};

/// Seeded generator used for initial conditions.
/// Without an explicit seed a fresh one is drawn; it is returned so it can be
/// logged and the run reproduced.
pub fn seeded_rng(seed: Option<u64>) -> (ChaCha8Rng, u64) {
    let seed = seed.unwrap_or_else(rand::random);
    (ChaCha8Rng::seed_from_u64(seed), seed)
}

/// Check the arguments of [`initialize`] without drawing anything.
///
/// Besides the per-value checks, the sampled spans `max - min` and `2 * v`
/// must themselves be finite: the uniform sampler cannot handle a wider range.
pub fn check_draw_bounds(
    count: usize,
    mass_choices: &[f64],
    position_bounds: (f64, f64),
    velocity_range: f64,
) -> SimResult<()> {
    if count == 0 {
        return Err(SimError::invalid("body_count", count, "must be > 0"));
    }
    if mass_choices.is_empty() {
        return Err(SimError::invalid("mass_choices", "[]", "must not be empty"));
    }
    for &m in mass_choices {
        ensure_positive("mass_choices", m)?;
    }
    let (lo, hi) = position_bounds;
    if !(lo.is_finite() && hi.is_finite() && lo <= hi && (hi - lo).is_finite()) {
        return Err(SimError::invalid(
            "spatial_bounds",
            format!("[{lo}, {hi}]"),
            "must be finite with min <= max and a finite span",
        ));
    }
    if !(velocity_range.is_finite() && velocity_range >= 0.0 && (2.0 * velocity_range).is_finite()) {
        return Err(SimError::invalid(
            "initial_velocity_range",
            velocity_range,
            "must be >= 0 with a finite span [-v, v]",
        ));
    }
    Ok(())
}

pub fn initialize<R: Rng>(
    count: usize,
    mass_choices: &[f64],
    position_bounds: (f64, f64),
    velocity_range: f64,
    rng: &mut R,
) -> SimResult<Vec<Body>> {
    check_draw_bounds(count, mass_choices, position_bounds, velocity_range)?;
    let (lo, hi) = position_bounds;

    let mut bodies = Vec::with_capacity(count);
    for _ in 0..count {
        let m = *mass_choices
            .choose(rng)
            .ok_or_else(|| SimError::invalid("mass_choices", "[]", "must not be empty"))?;

        let x = NVec3::new(
            rng.gen_range(lo..=hi),
            rng.gen_range(lo..=hi),
            rng.gen_range(lo..=hi),
        );
        let v = NVec3::new(
            rng.gen_range(-velocity_range..=velocity_range),
            rng.gen_range(-velocity_range..=velocity_range),
            rng.gen_range(-velocity_range..=velocity_range),
        );

        bodies.push(Body::new(x, v, m)?);
    }
    Ok(bodies)
}
