//! Photopion production on a background photon field.
//!
//! The comoving interaction rate of a nucleon with Lorentz factor `Γ` is
//!
//! ```text
//! R(Γ) = c / (2Γ²) ∫ dε' ε' σ(ε') ∫_{ε'/2Γ}^{ε_max} dε n(ε) / ε²
//! ```
//!
//! with `ε'` the photon energy in the nucleon rest frame. Both integrals
//! run over log-spaced Simpson grids. At redshift `z` the rate is
//! `(1+z)³ R(Γ(1+z))`.
//!
//! Final states keep only the leading nucleon: its rest-frame photon
//! energy is drawn from the rate integrand, the inelasticity follows
//! single-pion kinematics, and isospin picks the π⁰ channel (nucleon keeps
//! its identity) with probability 2/3 and the charged-pion channel
//! (p ↔ n) otherwise.

use std::sync::Arc;

use smallvec::smallvec;

use simprop_core::units::{C_LIGHT, PION_MASS_C2, PROTON_MASS_C2};
use simprop_core::{
    CrossSection, Daughters, ModelError, NumericError, Particle, PhotonField, Pid, RandomSource,
};

use crate::interaction::Interaction;

/// Default Simpson subinterval count for both integrals.
pub const DEFAULT_NODES: usize = 64;

/// Probability of the π⁰ channel, in which the nucleon keeps its identity.
const NEUTRAL_PION_FRACTION: f64 = 2.0 / 3.0;

/// Photopion production of single nucleons on one photon field.
///
/// Constructed via [`PhotoPionProduction::new`] (default node counts) or
/// the builder pattern: [`PhotoPionProduction::builder`].
#[derive(Clone)]
pub struct PhotoPionProduction {
    xsec: Arc<dyn CrossSection>,
    field: Arc<dyn PhotonField>,
    outer_nodes: usize,
    inner_nodes: usize,
}

/// Builder for [`PhotoPionProduction`].
///
/// Required fields: `xsec`, `field`.
pub struct PhotoPionProductionBuilder {
    xsec: Option<Arc<dyn CrossSection>>,
    field: Option<Arc<dyn PhotonField>>,
    outer_nodes: usize,
    inner_nodes: usize,
}

/// Rest-frame photon energies and the rate integrand evaluated on them.
struct IntegrandGrid {
    energies: Vec<f64>,
    weighted: Vec<f64>,
}

impl PhotoPionProduction {
    /// Photopion production with [`DEFAULT_NODES`] for both integrals.
    pub fn new(xsec: Arc<dyn CrossSection>, field: Arc<dyn PhotonField>) -> Self {
        Self {
            xsec,
            field,
            outer_nodes: DEFAULT_NODES,
            inner_nodes: DEFAULT_NODES,
        }
    }

    /// Create a new builder.
    pub fn builder() -> PhotoPionProductionBuilder {
        PhotoPionProductionBuilder {
            xsec: None,
            field: None,
            outer_nodes: DEFAULT_NODES,
            inner_nodes: DEFAULT_NODES,
        }
    }

    /// Comoving (`z = 0`) interaction rate at Lorentz factor `gamma`.
    pub fn comoving_rate(&self, gamma: f64) -> Result<f64, NumericError> {
        Ok(match self.integrand_grid(gamma)? {
            Some(grid) => C_LIGHT / (2.0 * gamma * gamma) * grid.weighted.iter().sum::<f64>(),
            None => 0.0,
        })
    }

    /// `∫_{x}^{ε_max} dε n(ε)/ε²`, integrated in `ln ε`.
    fn photon_integral(&self, x: f64) -> Result<f64, NumericError> {
        let lo = x.max(self.field.min_energy());
        let hi = self.field.max_energy();
        if lo >= hi {
            return Ok(0.0);
        }
        simprop_numeric::integrate(
            |ln_e| {
                let e = ln_e.exp();
                self.field.density(e) / e
            },
            lo.ln(),
            hi.ln(),
            self.inner_nodes,
        )
    }

    /// Outer integrand `h · w_i · ε'² σ(ε') I(ε'/2Γ)` on the rest-frame
    /// grid, or `None` when the kinematic range is empty.
    fn integrand_grid(&self, gamma: f64) -> Result<Option<IntegrandGrid>, NumericError> {
        let lo = self.xsec.threshold();
        let hi = self
            .xsec
            .max_energy()
            .min(2.0 * gamma * self.field.max_energy());
        if !(hi > lo) {
            return Ok(None);
        }
        let (ln_lo, ln_hi) = (lo.ln(), hi.ln());
        let h = (ln_hi - ln_lo) / self.outer_nodes as f64;
        let weights = simprop_numeric::simpson_weights(self.outer_nodes)?;
        let mut energies = Vec::with_capacity(weights.len());
        let mut weighted = Vec::with_capacity(weights.len());
        for (i, w) in weights.iter().enumerate() {
            let eps = (ln_lo + i as f64 * h).exp();
            let sigma = self.xsec.cross_section(eps);
            let value = if sigma > 0.0 {
                eps.powi(2) * sigma * self.photon_integral(eps / (2.0 * gamma))?
            } else {
                0.0
            };
            energies.push(eps);
            weighted.push(h * w * value);
        }
        Ok(Some(IntegrandGrid { energies, weighted }))
    }

    /// Fraction of the nucleon energy carried away by the pion for a
    /// rest-frame photon energy `eps`.
    pub fn inelasticity(eps: f64) -> f64 {
        let s = PROTON_MASS_C2 * PROTON_MASS_C2 + 2.0 * PROTON_MASS_C2 * eps;
        (2.0 * PROTON_MASS_C2 * eps + PION_MASS_C2 * PION_MASS_C2) / (2.0 * s)
    }
}

impl PhotoPionProductionBuilder {
    /// Set the cross-section table.
    pub fn xsec(mut self, xsec: Arc<dyn CrossSection>) -> Self {
        self.xsec = Some(xsec);
        self
    }

    /// Set the target photon field.
    pub fn field(mut self, field: Arc<dyn PhotonField>) -> Self {
        self.field = Some(field);
        self
    }

    /// Set the rest-frame (outer) node count (default: 64).
    pub fn outer_nodes(mut self, n: usize) -> Self {
        self.outer_nodes = n;
        self
    }

    /// Set the photon-energy (inner) node count (default: 64).
    pub fn inner_nodes(mut self, n: usize) -> Self {
        self.inner_nodes = n;
        self
    }

    /// Build the interaction, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `xsec` or `field` is not set, or if either node
    /// count is odd or below 2.
    pub fn build(self) -> Result<PhotoPionProduction, String> {
        let xsec = self.xsec.ok_or_else(|| "xsec is required".to_string())?;
        let field = self.field.ok_or_else(|| "field is required".to_string())?;
        for (label, n) in [("outer_nodes", self.outer_nodes), ("inner_nodes", self.inner_nodes)] {
            if n < 2 || n % 2 != 0 {
                return Err(format!("{label} must be even and >= 2, got {n}"));
            }
        }
        Ok(PhotoPionProduction {
            xsec,
            field,
            outer_nodes: self.outer_nodes,
            inner_nodes: self.inner_nodes,
        })
    }
}

impl Interaction for PhotoPionProduction {
    fn name(&self) -> &str {
        "photopion"
    }

    fn rate(&self, pid: Pid, gamma: f64, z: f64) -> Result<f64, ModelError> {
        if !pid.is_nucleon() {
            return Ok(0.0);
        }
        let zp1 = 1.0 + z;
        Ok(zp1.powi(3) * self.comoving_rate(gamma * zp1)?)
    }

    fn final_state(
        &self,
        particle: &Particle,
        z: f64,
        rng: &mut dyn RandomSource,
    ) -> Result<Daughters, ModelError> {
        if !particle.pid.is_nucleon() {
            return Err(ModelError::InvalidModel {
                reason: format!("photopion final state needs a nucleon, got pid {}", particle.pid),
            });
        }
        let grid = self
            .integrand_grid(particle.gamma * (1.0 + z))?
            .ok_or_else(|| ModelError::InvalidModel {
                reason: format!("no photopion phase space at gamma {:e}", particle.gamma),
            })?;
        let total: f64 = grid.weighted.iter().sum();
        if !(total > 0.0) {
            return Err(ModelError::InvalidModel {
                reason: format!("photopion integrand vanishes at gamma {:e}", particle.gamma),
            });
        }

        let target = rng.uniform() * total;
        let mut cumulative = 0.0;
        let mut eps = grid.energies[grid.energies.len() - 1];
        for (e, w) in grid.energies.iter().zip(&grid.weighted) {
            cumulative += w;
            if *w > 0.0 && cumulative >= target {
                eps = *e;
                break;
            }
        }

        let pid = if rng.uniform() < NEUTRAL_PION_FRACTION {
            particle.pid
        } else if particle.pid == Pid::PROTON {
            Pid::NEUTRON
        } else {
            Pid::PROTON
        };
        let gamma = particle.gamma * (1.0 - Self::inelasticity(eps));
        Ok(smallvec![Particle::new(pid, z, gamma)])
    }
}
