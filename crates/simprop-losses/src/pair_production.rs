//! Bethe–Heitler pair production on background photons.
//!
//! The loss rate of a nucleus with Lorentz factor `Γ` follows Blumenthal
//! (1970) with the Chodorowski et al. (1992) fits to the kernel `φ(k)`,
//! where `k = 2Γε / mₑc²` is the photon energy in units of the electron
//! rest energy as seen by the nucleus:
//!
//! ```text
//! −dlnΓ/dt = α r_e² c mₑc² (mₑ/m_p) / Γ · Σ_fields ∫ dln k · φ(k)/k · n(k mₑc² / 2Γ)
//! ```
//!
//! Redshift enters as `(1+z)³ b(Γ(1+z))` and the nuclear charge and mass
//! as `Z²/A`.

use std::f64::consts::PI;
use std::sync::Arc;

use simprop_core::units::{
    ALPHA, C_LIGHT, ELECTRON_MASS, ELECTRON_MASS_C2, ELECTRON_RADIUS, PROTON_MASS,
};
use simprop_core::{ModelError, NumericError, PhotonField, Pid};

use crate::continuous::ContinuousLoss;

/// Default Simpson subinterval count for the `ln k` integral.
pub const DEFAULT_NODES: usize = 200;

/// Near-threshold fit coefficients, `k ∈ [2, 25)`.
const C: [f64; 4] = [0.8048, 0.1459, 1.137e-3, -3.879e-6];
/// Asymptotic numerator coefficients, `k ≥ 25`.
const D: [f64; 4] = [-86.07, 50.96, -14.45, 8.0 / 3.0];
/// Asymptotic denominator coefficients, `k ≥ 25`.
const F: [f64; 3] = [2.910, 78.35, 1837.0];

/// `α r_e² c mₑc² (mₑ/m_p)`.
const RATE_FACTOR: f64 = ALPHA
    * ELECTRON_RADIUS
    * ELECTRON_RADIUS
    * C_LIGHT
    * ELECTRON_MASS_C2
    * (ELECTRON_MASS / PROTON_MASS);

/// Pair-production kernel `φ(k)`: zero below threshold `k = 2`.
pub fn phi(k: f64) -> f64 {
    if k < 2.0 {
        0.0
    } else if k < 25.0 {
        let x = k - 2.0;
        let sum_c: f64 = C
            .iter()
            .enumerate()
            .map(|(i, c)| c * x.powi(i as i32 + 1))
            .sum();
        PI / 12.0 * x.powi(4) / (1.0 + sum_c)
    } else {
        let ln_k = k.ln();
        let sum_d: f64 = D
            .iter()
            .enumerate()
            .map(|(i, d)| d * ln_k.powi(i as i32))
            .sum();
        let sum_f: f64 = F
            .iter()
            .enumerate()
            .map(|(i, f)| f / k.powi(i as i32 + 1))
            .sum();
        k * sum_d / (1.0 - sum_f)
    }
}

/// Pair-production losses summed over one or more photon fields.
///
/// Constructed via [`PairProductionLoss::new`] (default node count) or
/// the builder pattern: [`PairProductionLoss::builder`].
#[derive(Clone)]
pub struct PairProductionLoss {
    fields: Vec<Arc<dyn PhotonField>>,
    nodes: usize,
}

/// Builder for [`PairProductionLoss`].
///
/// Required: at least one photon field.
pub struct PairProductionLossBuilder {
    fields: Vec<Arc<dyn PhotonField>>,
    nodes: usize,
}

impl PairProductionLoss {
    /// Pair-production losses on `fields` with [`DEFAULT_NODES`] nodes.
    pub fn new(fields: Vec<Arc<dyn PhotonField>>) -> Self {
        Self {
            fields,
            nodes: DEFAULT_NODES,
        }
    }

    /// Create a new builder.
    pub fn builder() -> PairProductionLossBuilder {
        PairProductionLossBuilder {
            fields: Vec::new(),
            nodes: DEFAULT_NODES,
        }
    }

    /// Comoving (`z = 0`) fractional loss rate at Lorentz factor `gamma`,
    /// before the `Z²/A` scaling and the zero floor.
    pub fn dot_gamma(&self, gamma: f64) -> Result<f64, NumericError> {
        let two_gamma_mec2 = 2.0 * gamma / ELECTRON_MASS_C2;
        let mut integral = 0.0;
        for field in &self.fields {
            let ln_k_min = (two_gamma_mec2 * field.min_energy()).ln();
            let ln_k_max = (two_gamma_mec2 * field.max_energy()).ln();
            integral += simprop_numeric::integrate(
                |ln_k| {
                    let k = ln_k.exp();
                    phi(k) / k * field.density(k / two_gamma_mec2)
                },
                ln_k_min,
                ln_k_max,
                self.nodes,
            )?;
        }
        Ok(RATE_FACTOR * integral / gamma)
    }
}

impl PairProductionLossBuilder {
    /// Add a photon field. Fields contribute additively.
    pub fn field(mut self, field: Arc<dyn PhotonField>) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the Simpson subinterval count (default: 200). Must be even and >= 2.
    pub fn nodes(mut self, nodes: usize) -> Self {
        self.nodes = nodes;
        self
    }

    /// Build the loss model, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if no field was added, if `nodes` is odd or below 2,
    /// or if a field's energy support is empty or non-positive.
    pub fn build(self) -> Result<PairProductionLoss, String> {
        if self.fields.is_empty() {
            return Err("at least one photon field is required".to_string());
        }
        if self.nodes < 2 || self.nodes % 2 != 0 {
            return Err(format!(
                "nodes must be even and >= 2, got {}",
                self.nodes
            ));
        }
        if let Some(field) = self
            .fields
            .iter()
            .find(|f| !(f.min_energy() > 0.0 && f.max_energy() >= f.min_energy()))
        {
            return Err(format!(
                "photon field '{}' has invalid energy range [{}, {}]",
                field.name(),
                field.min_energy(),
                field.max_energy()
            ));
        }
        Ok(PairProductionLoss {
            fields: self.fields,
            nodes: self.nodes,
        })
    }
}

impl ContinuousLoss for PairProductionLoss {
    fn name(&self) -> &str {
        "pair_production"
    }

    fn dln_gamma_dt(&self, pid: Pid, gamma: f64, z: f64) -> Result<f64, ModelError> {
        if !pid.is_nucleus() {
            return Ok(0.0);
        }
        let zp1 = 1.0 + z;
        let mut b = zp1.powi(3) * self.dot_gamma(gamma * zp1)?;
        let charge = f64::from(pid.charge());
        let mass_number = f64::from(pid.mass_number());
        b *= charge * charge / mass_number;
        Ok(b.max(0.0))
    }
}
