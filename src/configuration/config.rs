//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – dimension, coincidence policy, parallel force pass
//! - [`ParametersConfig`] – step size, step count and physical constants
//! - [`BodyConfig`]       – initial state for each body
//! - [`OrbitCheckConfig`] – body pairs whose circular orbital speed is reported
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! Units are kg, Mm (1000 km), km/s and seconds:
//!
//! ```yaml
//! engine:
//!   dimension: 2            # 2 or 3
//!   coincidence: "fail"     # or "zero_force"
//!   parallel: false
//!
//! parameters:
//!   dt: 20.0                # step size (s)
//!   steps: 5000
//!   gravitation: 6.674e-11  # optional, this is the default
//!   sample_stride: 1        # optional
//!
//! bodies:
//!   - name: "Sun"
//!     mass: 2.0e30
//!     position: [0.0, 0.0]
//!     velocity: [0.0, 0.0]
//!   - name: "Proxima"
//!     mass: 0.2e30
//!     position: [5000.0, 0.0]
//!     velocity: [0.0, -51.66]
//!
//! orbits:
//!   - body: "Proxima"
//!     around: "Sun"
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Failure to read or parse a scenario file
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: Option<PathBuf>, source: serde_yaml::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => write!(f, "failed to open {}: {}", path.display(), source),
            ConfigError::Parse { path: Some(path), source } => {
                write!(f, "failed to parse scenario {}: {}", path.display(), source)
            }
            ConfigError::Parse { path: None, source } => write!(f, "failed to parse scenario YAML: {}", source),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

/// Handling of bodies that share a position
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoincidenceConfig {
    #[serde(rename = "fail")] // reject the step
    #[default]
    Fail,

    #[serde(rename = "zero_force")] // drop the pair and warn
    ZeroForce,
}

/// Engine-level options
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub dimension: usize, // 2 or 3, must match every body vector
    #[serde(default)]
    pub coincidence: CoincidenceConfig,
    #[serde(default)]
    pub parallel: bool, // accumulate forces on the rayon pool
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub dt: f64, // time step (s)
    pub steps: usize, // number of steps for a full run
    #[serde(default)]
    pub gravitation: Option<f64>, // defaults to 6.674e-11
    #[serde(default)]
    pub sample_stride: Option<usize>, // trajectory sampling for frame tables
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    #[serde(default)]
    pub name: String,
    pub mass: f64, // kg
    pub position: Vec<f64>, // Mm
    pub velocity: Vec<f64>, // km/s
}

/// Report the circular orbital speed of `body` around `around` before running
#[derive(Deserialize, Debug, Clone)]
pub struct OrbitCheckConfig {
    pub body: String,
    pub around: String,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub orbits: Vec<OrbitCheckConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|source| ConfigError::Parse { path: None, source })
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })
    }
}
