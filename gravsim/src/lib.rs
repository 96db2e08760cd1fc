pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod control;
pub mod error;

pub use simulation::states::{Body, System, NVec3};
pub use simulation::params::Parameters;
pub use simulation::time_scale::TimeScale;
pub use simulation::initializer::{initialize, seeded_rng};
pub use simulation::forces::{apply_gravity, NewtonianGravity, PairInteraction};
pub use simulation::integrator::{euler_step, step, LogSink, NullSink, PositionSink};
pub use simulation::scenario::Scenario;

pub use configuration::config::{BodyConfig, InitialConfig, ParametersConfig, ScenarioConfig};

pub use error::{SimError, SimResult};

pub use visualization::viewer::run_3d;
