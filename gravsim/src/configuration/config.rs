//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`ParametersConfig`]  – physical constants and the starting time scale
//! - [`InitialConfig`]     – how to draw random initial bodies
//! - [`BodyConfig`]        – optional explicit initial state, replacing the random draw
//! - [`ScenarioConfig`]    – top-level wrapper used to load a scenario from YAML
//!
//! Every field has a default, so an empty document is a valid scenario.
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   gravitational_constant: 1.0
//!   body_radius: 0.2          # min separation = 2 * body_radius
//!   time_scale: 4.0
//!
//! initial:
//!   body_count: 12
//!   mass_choices: [1.0, 2.0, 3.0, 4.0, 5.0]
//!   spatial_bounds: [-50.0, 50.0]
//!   initial_velocity_range: 0.7
//!   seed: 42                  # omit for a fresh random seed
//!
//! # optional: replaces the random draw
//! bodies:
//!   - x: [0.0, 0.0, 0.0]
//!     v: [0.0, 0.0, 0.0]
//!     m: 2.0
//! ```

use serde::Deserialize;

use crate::error::{ensure_positive, SimError, SimResult};
use crate::simulation::initializer::check_draw_bounds;

pub const DEFAULT_GRAVITATIONAL_CONSTANT: f64 = 1.0;
pub const DEFAULT_BODY_COUNT: usize = 12;
pub const DEFAULT_BODY_RADIUS: f64 = 0.2;
pub const DEFAULT_SPATIAL_BOUNDS: (f64, f64) = (-50.0, 50.0);
pub const DEFAULT_INITIAL_VELOCITY_RANGE: f64 = 0.7;
pub const DEFAULT_TIME_SCALE: f64 = 4.0;
pub const DEFAULT_MASS_CHOICES: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

/// Global physical parameters for a scenario
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParametersConfig {
    pub gravitational_constant: f64,
    pub body_radius: f64, // physical radius, also sets the force clamp distance
    pub time_scale: f64,  // starting multiplier on clock time
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: DEFAULT_GRAVITATIONAL_CONSTANT,
            body_radius: DEFAULT_BODY_RADIUS,
            time_scale: DEFAULT_TIME_SCALE,
        }
    }
}

/// Bounds for the random initial draw
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InitialConfig {
    pub body_count: usize,
    pub mass_choices: Vec<f64>,       // discrete set masses are drawn from
    pub spatial_bounds: (f64, f64),   // (min, max) per position axis
    pub initial_velocity_range: f64,  // each velocity axis in [-v, v]
    pub seed: Option<u64>,            // deterministic seed to make runs reproducible
}

impl Default for InitialConfig {
    fn default() -> Self {
        Self {
            body_count: DEFAULT_BODY_COUNT,
            mass_choices: DEFAULT_MASS_CHOICES.to_vec(),
            spatial_bounds: DEFAULT_SPATIAL_BOUNDS,
            initial_velocity_range: DEFAULT_INITIAL_VELOCITY_RANGE,
            seed: None,
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub x: Vec<f64>, // initial position
    pub v: Vec<f64>, // initial velocity
    pub m: f64,      // mass
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig,
    pub initial: InitialConfig,
    pub bodies: Option<Vec<BodyConfig>>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not a mapping
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(s)
    }

    /// Check every value the runtime relies on, before anything is built.
    pub fn validate(&self) -> SimResult<()> {
        let p = &self.parameters;
        ensure_positive("gravitational_constant", p.gravitational_constant)?;
        ensure_positive("body_radius", p.body_radius)?;
        ensure_positive("time_scale", p.time_scale)?;

        match &self.bodies {
            Some(bodies) => {
                if bodies.is_empty() {
                    return Err(SimError::invalid("bodies", "[]", "must not be empty"));
                }
                for b in bodies {
                    check_vec3("bodies.x", &b.x)?;
                    check_vec3("bodies.v", &b.v)?;
                    ensure_positive("bodies.m", b.m)?;
                }
            }
            None => {
                let init = &self.initial;
                check_draw_bounds(
                    init.body_count,
                    &init.mass_choices,
                    init.spatial_bounds,
                    init.initial_velocity_range,
                )?;
            }
        }
        Ok(())
    }
}

fn check_vec3(name: &'static str, v: &[f64]) -> SimResult<()> {
    if v.len() != 3 {
        return Err(SimError::invalid(name, format!("{v:?}"), "must have exactly 3 components"));
    }
    if v.iter().any(|c| !c.is_finite()) {
        return Err(SimError::invalid(name, format!("{v:?}"), "components must be finite"));
    }
    Ok(())
}
