//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - numerical parameters (`Parameters`)
//! - a `Simulator` with bodies at t = 0, in 2D or 3D
//! - the body pairs whose orbital speed is reported before the run
//!
//! Also provides the built-in presets (trinary star, Polaris, Earth–Moon).

use crate::configuration::config::{
    BodyConfig, EngineConfig, OrbitCheckConfig, ParametersConfig, ScenarioConfig,
};

use super::engine::Simulator;
use super::error::{Result, SimError};
use super::params::Parameters;
use super::states::Body;
use super::units::GRAVITATION;

/// Solar mass used by the star presets (kg)
pub const SOLAR_MASS: f64 = 2.0e30;

/// Runtime bundle for one dimension
#[derive(Debug, Clone)]
pub struct ScenarioRun<const D: usize> {
    pub parameters: Parameters,
    pub simulator: Simulator<D>,
    pub orbits: Vec<(usize, usize)>, // (body, around)
}

/// A scenario in the dimension its configuration asked for
#[derive(Debug, Clone)]
pub enum Scenario {
    Planar(ScenarioRun<2>),
    Spatial(ScenarioRun<3>),
}

impl Scenario {
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self> {
        match cfg.engine.dimension {
            2 => Ok(Scenario::Planar(ScenarioRun::build(cfg)?)),
            3 => Ok(Scenario::Spatial(ScenarioRun::build(cfg)?)),
            d => Err(SimError::invalid(None, format!("unsupported dimension {}, expected 2 or 3", d))),
        }
    }

    pub fn dimension(&self) -> usize {
        match self {
            Scenario::Planar(_) => 2,
            Scenario::Spatial(_) => 3,
        }
    }

    pub fn parameters(&self) -> &Parameters {
        match self {
            Scenario::Planar(run) => &run.parameters,
            Scenario::Spatial(run) => &run.parameters,
        }
    }

    pub fn parameters_mut(&mut self) -> &mut Parameters {
        match self {
            Scenario::Planar(run) => &mut run.parameters,
            Scenario::Spatial(run) => &mut run.parameters,
        }
    }

    /// Report orbital speeds, then run the configured number of steps
    pub fn run(&mut self) -> Result<()> {
        match self {
            Scenario::Planar(run) => run.run(),
            Scenario::Spatial(run) => run.run(),
        }
    }
}

impl<const D: usize> ScenarioRun<D> {
    pub fn build(cfg: &ScenarioConfig) -> Result<Self> {
        // Parameters (runtime) from ParametersConfig + EngineConfig
        let p_cfg = &cfg.parameters;
        let parameters = Parameters {
            dt: p_cfg.dt,
            steps: p_cfg.steps,
            gravitation: p_cfg.gravitation.unwrap_or(GRAVITATION),
            coincidence: cfg.engine.coincidence.into(),
            parallel: cfg.engine.parallel,
            sample_stride: p_cfg.sample_stride.unwrap_or(1),
        };
        if !(parameters.dt.is_finite() && parameters.dt > 0.0) {
            return Err(SimError::invalid(None, format!("time step must be positive, got {}", parameters.dt)));
        }

        // Bodies: BodyConfig -> runtime Body, validating mass and dimension
        let bodies = cfg
            .bodies
            .iter()
            .map(|bc: &BodyConfig| Body::<D>::new(bc.mass, &bc.position, &bc.velocity, bc.name.clone()))
            .collect::<Result<Vec<_>>>()?;

        let simulator = Simulator::with_parameters(bodies, &parameters)?;

        let orbits = cfg
            .orbits
            .iter()
            .map(|o: &OrbitCheckConfig| -> Result<(usize, usize)> {
                let lookup = |name: &str| {
                    simulator
                        .find(name)
                        .ok_or_else(|| SimError::invalid(Some(name), "no body with this name in the scenario"))
                };
                Ok((lookup(o.body.as_str())?, lookup(o.around.as_str())?))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            parameters,
            simulator,
            orbits,
        })
    }

    /// Apply the current parameters to the simulator, report orbital speeds,
    /// then run `parameters.steps` steps of `parameters.dt`
    pub fn run(&mut self) -> Result<()> {
        self.simulator.set_gravitation(self.parameters.gravitation)?;
        self.simulator.set_parallel(self.parameters.parallel);
        self.simulator.set_coincidence_policy(self.parameters.coincidence);

        for &(a, b) in &self.orbits {
            self.simulator.estimate_circular_orbital_speed(a, b)?;
        }

        self.simulator.run(self.parameters.steps, self.parameters.dt)
    }

    /// Frame table sampled at the configured stride
    pub fn frames(&self) -> Vec<(usize, Vec<f64>)> {
        self.simulator.frames(self.parameters.sample_stride)
    }
}

// =========================================================================================
// presets
// =========================================================================================

pub const PRESETS: [&str; 3] = ["trinary", "polaris", "earth-moon"];

/// Look up a built-in scenario by name
pub fn preset(name: &str) -> Option<ScenarioConfig> {
    match name {
        "trinary" => Some(trinary()),
        "polaris" => Some(polaris()),
        "earth-moon" => Some(earth_moon()),
        _ => None,
    }
}

fn body(name: &str, mass: f64, position: &[f64], velocity: &[f64]) -> BodyConfig {
    BodyConfig {
        name: name.to_owned(),
        mass,
        position: position.to_vec(),
        velocity: velocity.to_vec(),
    }
}

fn orbit(body: &str, around: &str) -> OrbitCheckConfig {
    OrbitCheckConfig {
        body: body.to_owned(),
        around: around.to_owned(),
    }
}

/// 2D three-star system, 5000 steps of 20 s
pub fn trinary() -> ScenarioConfig {
    ScenarioConfig {
        engine: EngineConfig {
            dimension: 2,
            coincidence: Default::default(),
            parallel: false,
        },
        parameters: ParametersConfig {
            dt: 20.0,
            steps: 5000,
            gravitation: None,
            sample_stride: None,
        },
        bodies: vec![
            body("Sun", SOLAR_MASS, &[0.0, 0.0], &[0.0, 0.0]),
            body("Proxima", 0.1 * SOLAR_MASS, &[5000.0, 0.0], &[0.0, -51.66]),
            body("Alpha Centauri A", 0.05 * SOLAR_MASS, &[0.0, 10000.0], &[-25.83, 0.0]),
        ],
        orbits: vec![orbit("Sun", "Proxima"), orbit("Sun", "Alpha Centauri A")],
    }
}

/// 3D Polaris triple star, 60000 steps of 1000 s sampled every 100 steps
pub fn polaris() -> ScenarioConfig {
    ScenarioConfig {
        engine: EngineConfig {
            dimension: 3,
            coincidence: Default::default(),
            parallel: false,
        },
        parameters: ParametersConfig {
            dt: 1000.0,
            steps: 60000,
            gravitation: None,
            sample_stride: Some(100),
        },
        bodies: vec![
            body("Polaris Aa", 5.13 * SOLAR_MASS, &[0.0, 0.0, 0.0], &[0.0, 0.0, 0.0]),
            body("Polaris Ab", 1.31 * SOLAR_MASS, &[-100000.0, 0.0, -5000.0], &[0.0, 82.0, 1.0]),
            body("Polaris B", 1.39 * SOLAR_MASS, &[0.0, 200000.0, 150000.0], &[45.0, 0.0, -10.0]),
        ],
        orbits: vec![orbit("Polaris Ab", "Polaris Aa"), orbit("Polaris B", "Polaris Aa")],
    }
}

/// Earth and Moon released from rest 384 Mm apart
pub fn earth_moon() -> ScenarioConfig {
    ScenarioConfig {
        engine: EngineConfig {
            dimension: 2,
            coincidence: Default::default(),
            parallel: false,
        },
        parameters: ParametersConfig {
            dt: 3.6,
            steps: 3650,
            gravitation: None,
            sample_stride: None,
        },
        bodies: vec![
            body("Earth", 5.972e24, &[0.0, 0.0], &[0.0, 0.0]),
            body("Moon", 7.34e22, &[384.0, 0.0], &[0.0, 0.0]),
        ],
        orbits: vec![orbit("Moon", "Earth")],
    }
}
