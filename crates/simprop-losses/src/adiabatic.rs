//! Adiabatic losses from cosmic expansion.

use std::sync::Arc;

use simprop_core::{Cosmology, ModelError, Pid};

use crate::continuous::ContinuousLoss;

/// Energy loss induced purely by the expansion of the universe.
///
/// `dlnΓ/dt = H(z)`, independent of species, Lorentz factor, and photon
/// fields.
#[derive(Clone)]
pub struct AdiabaticLoss {
    cosmology: Arc<dyn Cosmology>,
}

impl AdiabaticLoss {
    /// Adiabatic losses for the given expansion history.
    pub fn new(cosmology: Arc<dyn Cosmology>) -> Self {
        Self { cosmology }
    }
}

impl ContinuousLoss for AdiabaticLoss {
    fn name(&self) -> &str {
        "adiabatic"
    }

    fn dln_gamma_dt(&self, _pid: Pid, _gamma: f64, z: f64) -> Result<f64, ModelError> {
        Ok(self.cosmology.hubble_rate(z).max(0.0))
    }
}
