//! Error types for the SimProp propagation framework.
//!
//! Organized by subsystem: numeric routines (quadrature, root finding,
//! tables) and physics models (continuous losses, interactions).
//! Engine-level errors live in `simprop-engine`.

use std::error::Error;
use std::fmt;

/// Errors from the numeric routines.
///
/// Neither variant is transient: both signal malformed input or a
/// violated mathematical precondition, so callers must not retry.
#[derive(Clone, Debug, PartialEq)]
pub enum NumericError {
    /// Malformed bounds, node count, or tolerance.
    InvalidArgument {
        /// Human-readable description of the bad argument.
        reason: String,
    },
    /// The root finder found no bracketed sign change, hit a non-finite
    /// evaluation, or exhausted its iteration budget.
    NoConvergence {
        /// Iterations performed before giving up.
        iterations: u32,
        /// Description of the failure.
        reason: String,
    },
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::NoConvergence { iterations, reason } => {
                write!(f, "no convergence after {iterations} iterations: {reason}")
            }
        }
    }
}

impl Error for NumericError {}

/// Errors from loss and interaction models.
///
/// Returned by `ContinuousLoss::dln_gamma_dt`, `Interaction::rate` and
/// `Interaction::final_state`, and by model builders.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelError {
    /// A numeric routine inside the model failed.
    Numeric(NumericError),
    /// The model was configured or queried with values it cannot handle.
    InvalidModel {
        /// Description of the problem.
        reason: String,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(e) => write!(f, "numeric: {e}"),
            Self::InvalidModel { reason } => write!(f, "invalid model: {reason}"),
        }
    }
}

impl Error for ModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Numeric(e) => Some(e),
            Self::InvalidModel { .. } => None,
        }
    }
}

impl From<NumericError> for ModelError {
    fn from(e: NumericError) -> Self {
        Self::Numeric(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_reason() {
        let e = NumericError::InvalidArgument {
            reason: "n must be even, got 3".into(),
        };
        assert_eq!(e.to_string(), "invalid argument: n must be even, got 3");
    }

    #[test]
    fn model_error_chains_numeric_source() {
        let inner = NumericError::NoConvergence {
            iterations: 100,
            reason: "budget exhausted".into(),
        };
        let e: ModelError = inner.clone().into();
        assert_eq!(e, ModelError::Numeric(inner));
        assert!(e.source().is_some());
        assert!(e.to_string().contains("100 iterations"));
    }
}
