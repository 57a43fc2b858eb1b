//! Reusable loss and interaction fixtures.
//!
//! - [`ConstantLoss`]: species- and energy-independent loss rate.
//! - [`FailingLoss`]: fails deterministically after N calls.
//! - [`NegativeLoss`]: ignores the non-negativity contract.
//! - [`FixedRateInteraction`]: constant rate with a fixed energy split.

use std::sync::atomic::{AtomicUsize, Ordering};

use simprop_core::{Daughters, ModelError, NumericError, Particle, Pid, RandomSource};
use simprop_losses::{ContinuousLoss, Interaction};

/// Continuous loss with a constant `dlnΓ/dt` for every nucleus.
pub struct ConstantLoss {
    pub name: String,
    pub rate: f64,
}

impl ConstantLoss {
    pub fn new(name: impl Into<String>, rate: f64) -> Self {
        Self {
            name: name.into(),
            rate,
        }
    }
}

impl ContinuousLoss for ConstantLoss {
    fn name(&self) -> &str {
        &self.name
    }

    fn dln_gamma_dt(&self, pid: Pid, _gamma: f64, _z: f64) -> Result<f64, ModelError> {
        Ok(if pid.is_nucleus() { self.rate } else { 0.0 })
    }
}

/// Continuous loss returning a negative rate, for invariant checks.
pub struct NegativeLoss;

impl ContinuousLoss for NegativeLoss {
    fn name(&self) -> &str {
        "negative"
    }

    fn dln_gamma_dt(&self, _pid: Pid, _gamma: f64, _z: f64) -> Result<f64, ModelError> {
        Ok(-1.0)
    }
}

/// Continuous loss that succeeds `succeed_count` times, then reports
/// [`NumericError::NoConvergence`] on every later call.
pub struct FailingLoss {
    pub rate: f64,
    succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingLoss {
    pub fn new(rate: f64, succeed_count: usize) -> Self {
        Self {
            rate,
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl ContinuousLoss for FailingLoss {
    fn name(&self) -> &str {
        "failing"
    }

    fn dln_gamma_dt(&self, _pid: Pid, _gamma: f64, _z: f64) -> Result<f64, ModelError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(NumericError::NoConvergence {
                iterations: 0,
                reason: format!("failing loss exhausted after {n} calls"),
            }
            .into());
        }
        Ok(self.rate)
    }
}

/// Interaction with a constant rate for nucleons, splitting the parent
/// into `multiplicity` copies of itself, each carrying `fraction` of its
/// Lorentz factor.
pub struct FixedRateInteraction {
    pub rate: f64,
    pub fraction: f64,
    pub multiplicity: usize,
}

impl FixedRateInteraction {
    pub fn new(rate: f64, fraction: f64) -> Self {
        Self {
            rate,
            fraction,
            multiplicity: 1,
        }
    }

    /// An interaction channel that never fires.
    pub fn disabled() -> Self {
        Self::new(0.0, 1.0)
    }

    pub fn with_multiplicity(mut self, multiplicity: usize) -> Self {
        self.multiplicity = multiplicity;
        self
    }
}

impl Interaction for FixedRateInteraction {
    fn name(&self) -> &str {
        "fixed_rate"
    }

    fn rate(&self, pid: Pid, _gamma: f64, _z: f64) -> Result<f64, ModelError> {
        Ok(if pid.is_nucleon() { self.rate } else { 0.0 })
    }

    fn final_state(
        &self,
        particle: &Particle,
        z: f64,
        _rng: &mut dyn RandomSource,
    ) -> Result<Daughters, ModelError> {
        let daughter = Particle::new(particle.pid, z, particle.gamma * self.fraction);
        Ok(std::iter::repeat_n(daughter, self.multiplicity).collect())
    }
}
