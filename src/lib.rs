pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body, Body2, Body3, NVec2, NVec3};
pub use simulation::error::{SimError, Result};
pub use simulation::forces::{NetForces, NewtonianGravity};
pub use simulation::integrator::euler_step;
pub use simulation::engine::{Simulator, Simulator2, Simulator3};
pub use simulation::params::{CoincidencePolicy, Parameters};
pub use simulation::scenario::{preset, Scenario, ScenarioRun, PRESETS};
pub use simulation::units;

pub use configuration::config::{EngineConfig, ParametersConfig, BodyConfig, OrbitCheckConfig, ScenarioConfig, CoincidenceConfig, ConfigError};

pub use benchmark::benchmark::{bench_forces, bench_steps_curve};
