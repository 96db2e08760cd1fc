//! Build a fully-initialized simulation scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle:
//! - physical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//! - the pairwise force law (`NewtonianGravity`)
//! - the shared time multiplier (`TimeScale`)
//!
//! The scenario is inserted into Bevy as a `Resource` by the viewer, or
//! driven directly by the headless runner.

use bevy::prelude::Resource;
use tracing::debug;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::SimResult;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::initializer::{initialize, seeded_rng};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3, System};
use crate::simulation::time_scale::TimeScale;

/// Runtime bundle for one simulation run
#[derive(Resource, Debug, Clone)]
pub struct Scenario {
    pub parameters: Parameters,
    pub system: System,
    pub forces: NewtonianGravity,
    pub time_scale: TimeScale,
    pub seed: Option<u64>, // seed used for the random draw, if one happened
}

impl Scenario {
    pub fn build_scenario(cfg: &ScenarioConfig) -> SimResult<Self> {
        cfg.validate()?;

        let p_cfg = &cfg.parameters;
        let parameters = Parameters::new(p_cfg.gravitational_constant, p_cfg.body_radius)?;
        let time_scale = TimeScale::new(p_cfg.time_scale)?;

        // Bodies: explicit list if given, random draw otherwise
        let (bodies, seed) = match &cfg.bodies {
            Some(list) => (bodies_from_config(list)?, None),
            None => {
                let init = &cfg.initial;
                let (mut rng, seed) = seeded_rng(init.seed);
                let bodies = initialize(
                    init.body_count,
                    &init.mass_choices,
                    init.spatial_bounds,
                    init.initial_velocity_range,
                    &mut rng,
                )?;
                (bodies, Some(seed))
            }
        };

        debug!(
            bodies = bodies.len(),
            seed = ?seed,
            g = parameters.g,
            min_separation = parameters.min_separation(),
            time_scale = time_scale.get(),
            "scenario built"
        );

        let forces = NewtonianGravity::from_params(&parameters);

        Ok(Self {
            parameters,
            system: System::new(bodies),
            forces,
            time_scale,
            seed,
        })
    }
}

fn bodies_from_config(list: &[BodyConfig]) -> SimResult<Vec<Body>> {
    list.iter()
        .map(|bc| {
            Body::new(
                NVec3::new(bc.x[0], bc.x[1], bc.x[2]),
                NVec3::new(bc.v[0], bc.v[1], bc.v[2]),
                bc.m,
            )
        })
        .collect()
}
