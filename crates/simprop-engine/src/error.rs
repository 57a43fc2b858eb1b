//! Errors returned by [`PropagationEngine`](crate::engine::PropagationEngine).

use std::error::Error;
use std::fmt;
use std::io;

use simprop_core::{ModelError, Particle};

/// Failure of a propagation step or run.
///
/// Under [`ViolationPolicy::Quarantine`](crate::config::ViolationPolicy)
/// only `Output` and `IterationBudgetExhausted` reach the caller; model
/// errors and invariant violations are absorbed per particle.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineError {
    /// A loss or interaction model failed.
    Model(ModelError),
    /// A step quantity left its admissible range.
    InvariantViolation {
        /// State of the particle when the violation was detected.
        particle: Particle,
        /// Which invariant failed, with the offending value.
        reason: String,
    },
    /// The output sink failed to record a state.
    Output {
        /// The I/O error message.
        reason: String,
    },
    /// The run hit `EngineConfig::max_iterations`.
    IterationBudgetExhausted {
        /// The configured limit.
        limit: u64,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model(e) => write!(f, "model: {e}"),
            Self::InvariantViolation { particle, reason } => {
                write!(f, "invariant violated for [{particle}]: {reason}")
            }
            Self::Output { reason } => write!(f, "output: {reason}"),
            Self::IterationBudgetExhausted { limit } => {
                write!(f, "iteration budget of {limit} exhausted")
            }
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Model(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ModelError> for EngineError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}

impl From<io::Error> for EngineError {
    fn from(e: io::Error) -> Self {
        Self::Output {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simprop_core::{NumericError, Pid};

    #[test]
    fn model_error_is_source() {
        let e: EngineError = ModelError::from(NumericError::NoConvergence {
            iterations: 100,
            reason: "no sign change".into(),
        })
        .into();
        assert!(e.source().is_some());
        assert!(e.to_string().contains("no sign change"));
    }

    #[test]
    fn violation_display_includes_particle() {
        let e = EngineError::InvariantViolation {
            particle: Particle::new(Pid::PROTON, 0.5, 1e9),
            reason: "dz_s = -1".into(),
        };
        let s = e.to_string();
        assert!(s.contains("1000010010"), "{s}");
        assert!(s.contains("dz_s = -1"));
    }

    #[test]
    fn io_error_converts() {
        let e: EngineError = io::Error::other("disk full").into();
        assert_eq!(
            e,
            EngineError::Output {
                reason: "disk full".into()
            }
        );
    }
}
