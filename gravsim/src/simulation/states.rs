//! Core state types for the N-body simulation.
//!
//! - `Body`   a point mass with position and velocity (`NVec3`)
//! - `System` the fixed, ordered list of bodies plus the simulated time `t`
//!
//! Bodies are pure data. Rendering handles live with the rendering sink,
//! keyed by body index.

use nalgebra::Vector3;

use crate::error::{ensure_positive, SimResult};

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    m: f64,       // mass, fixed at creation
}

impl Body {
    /// Build a body, rejecting non-finite or non-positive masses
    pub fn new(x: NVec3, v: NVec3, m: f64) -> SimResult<Self> {
        let m = ensure_positive("mass", m)?;
        Ok(Self { x, v, m })
    }

    pub fn mass(&self) -> f64 {
        self.m
    }

    pub fn momentum(&self) -> NVec3 {
        self.m * self.v
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // collection of bodies, length fixed for the run
    pub t: f64,            // simulated time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    /// Sum of `m * v` over all bodies
    pub fn total_momentum(&self) -> NVec3 {
        self.bodies
            .iter()
            .fold(NVec3::zeros(), |acc, b| acc + b.momentum())
    }

    /// Sum of `0.5 * m * |v|^2` over all bodies
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| 0.5 * b.m * b.v.norm_squared())
            .sum()
    }

    /// Pairwise `-G * mi * mj / max(r, min_separation)`, matching the clamped force law
    pub fn potential_energy(&self, g: f64, min_separation: f64) -> f64 {
        let n = self.bodies.len();
        let mut u = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let (bi, bj) = (&self.bodies[i], &self.bodies[j]);
                let dist = (bj.x - bi.x).norm().max(min_separation);
                u -= g * bi.m * bj.m / dist;
            }
        }
        u
    }
}
