//! Error type shared by body construction, force evaluation and stepping

use std::fmt;

/// Structured failure reported by the simulation core.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A body, simulator or step was configured with an out-of-range value.
    /// `body` names the offending body (label or `#index`) when there is one.
    InvalidParameter {
        body: Option<String>,
        reason: String,
    },
    /// Bodies `a` and `b` (indices into the simulator) sit on the same point,
    /// or their interaction produced a non-finite force.
    DegenerateGeometry { a: usize, b: usize },
}

impl SimError {
    pub(crate) fn invalid(body: Option<&str>, reason: impl Into<String>) -> Self {
        SimError::InvalidParameter {
            body: body.filter(|b| !b.is_empty()).map(str::to_owned),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidParameter { body: Some(name), reason } => {
                write!(f, "invalid parameter for body '{}': {}", name, reason)
            }
            SimError::InvalidParameter { body: None, reason } => {
                write!(f, "invalid parameter: {}", reason)
            }
            SimError::DegenerateGeometry { a, b } => {
                write!(f, "degenerate geometry: bodies {} and {} have zero separation", a, b)
            }
        }
    }
}

impl std::error::Error for SimError {}

pub type Result<T> = std::result::Result<T, SimError>;
