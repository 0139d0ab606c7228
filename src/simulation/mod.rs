pub mod units;
pub mod error;
pub mod states;
pub mod params;
pub mod forces;
pub mod integrator;
pub mod engine;
pub mod scenario;
