//! Pairwise interaction laws for the n-body engine
//!
//! A [`PairInteraction`] updates the velocities of two bodies for one time
//! step. [`NewtonianGravity`] is the inverse-square law with the separation
//! clamped to a floor so close encounters do not blow up.

use tracing::trace;

use crate::simulation::params::Parameters;
use crate::simulation::states::Body;

/// Trait for interactions evaluated once per unordered pair per tick.
/// Implementations may only touch `a.v` and `b.v`.
pub trait PairInteraction {
    fn interact(&self, a: &mut Body, b: &mut Body, dt: f64);
}

/// Newtonian gravity with a minimum-separation clamp
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonianGravity {
    pub g: f64,              // gravitational constant
    pub min_separation: f64, // distance floor, twice the body radius
}

impl NewtonianGravity {
    pub fn from_params(p: &Parameters) -> Self {
        Self {
            g: p.g,
            min_separation: p.min_separation(),
        }
    }

    pub fn force_magnitude(&self, ma: f64, mb: f64, raw_dist: f64) -> f64 {
        clamped_force(self.g, ma, mb, raw_dist, self.min_separation)
    }
}

impl PairInteraction for NewtonianGravity {
    fn interact(&self, a: &mut Body, b: &mut Body, dt: f64) {
        apply_gravity(a, b, self.g, dt, self.min_separation);
    }
}

/// |F| = G * ma * mb / d^2 with d = max(raw_dist, min_separation)
pub fn clamped_force(g: f64, ma: f64, mb: f64, raw_dist: f64, min_separation: f64) -> f64 {
    let dist = raw_dist.max(min_separation);
    g * (ma * mb) / (dist * dist)
}

/// Apply one gravitational impulse between `a` and `b`.
///
/// Both bodies are pulled along the line joining them, `a` towards `b` and
/// `b` towards `a`, with equal and opposite momentum change. Positions are
/// not touched. Coincident bodies have no defined direction; the pair is
/// skipped for this step.
pub fn apply_gravity(a: &mut Body, b: &mut Body, g: f64, dt: f64, min_separation: f64) {
    // delta points from a to b
    let delta = b.x - a.x;
    let raw_dist = delta.norm();

    if raw_dist == 0.0 {
        trace!("coincident bodies, pair skipped");
        return;
    }

    let direction = delta / raw_dist;

    let (ma, mb) = (a.mass(), b.mass());
    let force = clamped_force(g, ma, mb, raw_dist, min_separation);

    let accel_a = force / ma;
    let accel_b = force / mb;

    a.v += direction * (accel_a * dt);
    b.v -= direction * (accel_b * dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::NVec3;

    fn body(x: [f64; 3], m: f64) -> Body {
        Body::new(NVec3::from(x), NVec3::zeros(), m).unwrap()
    }

    #[test]
    fn clamped_plateau_is_exact() {
        let grav = NewtonianGravity { g: 1.0, min_separation: 0.4 };
        let at_floor = grav.force_magnitude(2.0, 3.0, 0.4);
        let inside = grav.force_magnitude(2.0, 3.0, 0.01 * 0.4);
        assert_eq!(at_floor, inside);
    }

    #[test]
    fn impulse_matches_force_magnitude_inside_clamp() {
        let grav = NewtonianGravity { g: 1.0, min_separation: 0.4 };
        let dt = 0.25;
        for raw in [0.004, 0.4] {
            let mut a = body([0.0, 0.0, 0.0], 2.0);
            let mut b = body([raw, 0.0, 0.0], 5.0);
            grav.interact(&mut a, &mut b, dt);
            assert_eq!(a.v.x * 2.0 / dt, grav.force_magnitude(2.0, 5.0, raw));
        }
    }

    #[test]
    fn coincident_bodies_are_left_alone() {
        let mut a = body([1.0, 1.0, 1.0], 1.0);
        let mut b = body([1.0, 1.0, 1.0], 2.0);
        apply_gravity(&mut a, &mut b, 1.0, 1.0, 0.4);
        assert_eq!(a.v, NVec3::zeros());
        assert_eq!(b.v, NVec3::zeros());
    }

    #[test]
    fn positions_untouched() {
        let mut a = body([0.0, 0.0, 0.0], 1.0);
        let mut b = body([3.0, 4.0, 0.0], 1.0);
        apply_gravity(&mut a, &mut b, 1.0, 0.5, 0.4);
        assert_eq!(a.x, NVec3::zeros());
        assert_eq!(b.x, NVec3::new(3.0, 4.0, 0.0));
        // pulled along (3,4,0)/5
        assert!((a.v.x / a.v.y - 0.75).abs() < 1e-12);
    }

    #[test]
    fn inverse_square() {
        let grav = NewtonianGravity { g: 1.0, min_separation: 0.4 };
        let ratio = grav.force_magnitude(1.0, 1.0, 1.0) / grav.force_magnitude(1.0, 1.0, 2.0);
        assert!((ratio - 4.0).abs() < 1e-12);
    }
}
