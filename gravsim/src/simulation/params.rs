//! Physical parameters for the simulation
//!
//! `Parameters` holds the run-constant settings:
//! - gravitational constant `g`
//! - body radius, from which the minimum separation is derived

use crate::error::{ensure_positive, SimResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub g: f64,           // gravitational constant
    pub body_radius: f64, // physical radius shared by every body
}

impl Parameters {
    pub fn new(g: f64, body_radius: f64) -> SimResult<Self> {
        Ok(Self {
            g: ensure_positive("gravitational_constant", g)?,
            body_radius: ensure_positive("body_radius", body_radius)?,
        })
    }

    /// Distance floor for the force law: two touching bodies
    pub fn min_separation(&self) -> f64 {
        2.0 * self.body_radius
    }
}
