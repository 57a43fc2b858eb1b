//! Engine configuration, validation, and error types.
//!
//! [`EngineConfig`] carries the step-control and termination parameters.
//! [`validate()`](EngineConfig::validate) checks them at engine
//! construction; [`ConfigError`] also covers structural problems found
//! while wiring models into a
//! [`PropagationEngine`](crate::engine::PropagationEngine).

use std::error::Error;
use std::fmt;

// ── ViolationPolicy ────────────────────────────────────────────────

/// What the engine does when a particle breaks a step invariant
/// (`dz_s ≤ 0`, `dz_c ∉ (0, z]`, a failed model evaluation).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViolationPolicy {
    /// Stop the run and return
    /// [`EngineError::InvariantViolation`](crate::error::EngineError::InvariantViolation)
    /// or the underlying model error.
    Abort,
    /// Mark the offending particle inactive, record it with
    /// [`EventKind::Quarantined`](crate::output::EventKind::Quarantined),
    /// and keep propagating the rest of the stack.
    #[default]
    Quarantine,
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EngineConfig::validate()`] and engine
/// construction.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `critical_fraction` is NaN, infinite, or outside `(0, 1)`.
    InvalidCriticalFraction {
        /// The invalid value.
        value: f64,
    },
    /// An activity threshold is NaN, infinite, or negative.
    InvalidThreshold {
        /// Which threshold.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// `root_max_iter` is zero.
    RootBudgetZero,
    /// `root_tolerance` is NaN, infinite, zero, or negative.
    InvalidTolerance {
        /// The invalid value.
        value: f64,
    },
    /// `max_iterations` is `Some(0)`.
    IterationBudgetZero,
    /// No cosmology was supplied.
    MissingCosmology,
    /// No interaction model was supplied.
    MissingInteraction,
    /// Two continuous losses report the same name.
    DuplicateLoss {
        /// The repeated name.
        name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCriticalFraction { value } => {
                write!(f, "critical_fraction must lie in (0, 1), got {value}")
            }
            Self::InvalidThreshold { name, value } => {
                write!(f, "{name} must be finite and >= 0, got {value}")
            }
            Self::RootBudgetZero => write!(f, "root_max_iter must be at least 1"),
            Self::InvalidTolerance { value } => {
                write!(f, "root_tolerance must be finite and positive, got {value}")
            }
            Self::IterationBudgetZero => write!(f, "max_iterations must be at least 1"),
            Self::MissingCosmology => write!(f, "no cosmology configured"),
            Self::MissingInteraction => write!(f, "no interaction model configured"),
            Self::DuplicateLoss { name } => {
                write!(f, "continuous loss '{name}' registered twice")
            }
        }
    }
}

impl Error for ConfigError {}

// ── EngineConfig ───────────────────────────────────────────────────

/// Step-control and termination parameters for a propagation run.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Largest fractional Lorentz-factor loss allowed in one continuous
    /// step. Default: 0.1.
    pub critical_fraction: f64,
    /// Particles at or below this Lorentz factor are inactive. Default: 1e7.
    pub min_gamma: f64,
    /// Particles at or below this redshift are inactive. Default: 1e-20.
    pub min_redshift: f64,
    /// Bisection budget for the continuous step size. Default: 100.
    pub root_max_iter: u32,
    /// Bracket width, relative to the current redshift, at which bisection
    /// stops. Default: 1e-5.
    pub root_tolerance: f64,
    /// Upper bound on engine iterations per run. `None` = unbounded.
    pub max_iterations: Option<u64>,
    /// Handling of per-particle invariant violations. Default: quarantine.
    pub violation_policy: ViolationPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            critical_fraction: 0.1,
            min_gamma: 1e7,
            min_redshift: 1e-20,
            root_max_iter: 100,
            root_tolerance: 1e-5,
            max_iterations: None,
            violation_policy: ViolationPolicy::Quarantine,
        }
    }
}

impl EngineConfig {
    /// Check all scalar invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = self.critical_fraction;
        if !(c.is_finite() && c > 0.0 && c < 1.0) {
            return Err(ConfigError::InvalidCriticalFraction { value: c });
        }
        for (name, value) in [
            ("min_gamma", self.min_gamma),
            ("min_redshift", self.min_redshift),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        if self.root_max_iter == 0 {
            return Err(ConfigError::RootBudgetZero);
        }
        let tol = self.root_tolerance;
        if !(tol.is_finite() && tol > 0.0) {
            return Err(ConfigError::InvalidTolerance { value: tol });
        }
        if self.max_iterations == Some(0) {
            return Err(ConfigError::IterationBudgetZero);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = EngineConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.critical_fraction, 0.1);
        assert_eq!(cfg.min_gamma, 1e7);
        assert_eq!(cfg.min_redshift, 1e-20);
        assert_eq!(cfg.root_max_iter, 100);
        assert_eq!(cfg.violation_policy, ViolationPolicy::Quarantine);
        assert!(cfg.max_iterations.is_none());
    }

    #[test]
    fn critical_fraction_out_of_range() {
        for value in [0.0, 1.0, -0.1, f64::NAN] {
            let cfg = EngineConfig {
                critical_fraction: value,
                ..EngineConfig::default()
            };
            assert!(matches!(
                cfg.validate(),
                Err(ConfigError::InvalidCriticalFraction { .. })
            ));
        }
    }

    #[test]
    fn negative_threshold_names_field() {
        let cfg = EngineConfig {
            min_redshift: -1.0,
            ..EngineConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidThreshold {
                name: "min_redshift",
                value: -1.0
            })
        );
    }

    #[test]
    fn zero_budgets_rejected() {
        let cfg = EngineConfig {
            root_max_iter: 0,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::RootBudgetZero));

        let cfg = EngineConfig {
            max_iterations: Some(0),
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::IterationBudgetZero));
    }

    #[test]
    fn tolerance_must_be_positive() {
        let cfg = EngineConfig {
            root_tolerance: 0.0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidTolerance { .. })
        ));
    }

    #[test]
    fn display_mentions_field() {
        let e = ConfigError::DuplicateLoss {
            name: "adiabatic".into(),
        };
        assert!(e.to_string().contains("adiabatic"));
    }
}
