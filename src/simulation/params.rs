//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed step size and number of steps,
//! - gravitational constant `gravitation`,
//! - how coincident bodies are handled,
//! - whether force accumulation runs on the rayon pool,
//! - trajectory sampling stride used when building frame tables

use crate::configuration::config::CoincidenceConfig;

use super::units::GRAVITATION;

/// What to do when two bodies share a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoincidencePolicy {
    /// Reject the step with `DegenerateGeometry`
    #[default]
    Fail,
    /// Skip the pair (zero force) and log a warning
    ZeroForce,
}

impl From<CoincidenceConfig> for CoincidencePolicy {
    fn from(cfg: CoincidenceConfig) -> Self {
        match cfg {
            CoincidenceConfig::Fail => CoincidencePolicy::Fail,
            CoincidenceConfig::ZeroForce => CoincidencePolicy::ZeroForce,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64, // step size (s)
    pub steps: usize, // number of steps for a full run
    pub gravitation: f64, // gravitational constant
    pub coincidence: CoincidencePolicy,
    pub parallel: bool, // accumulate forces on the rayon pool
    pub sample_stride: usize, // trajectory sampling for frame tables
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dt: 1.0,
            steps: 1,
            gravitation: GRAVITATION,
            coincidence: CoincidencePolicy::Fail,
            parallel: false,
            sample_stride: 1,
        }
    }
}
