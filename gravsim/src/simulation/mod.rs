pub mod states;
pub mod params;
pub mod time_scale;
pub mod initializer;
pub mod forces;
pub mod integrator;
pub mod scenario;
