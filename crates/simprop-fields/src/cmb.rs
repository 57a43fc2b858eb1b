//! Cosmic microwave background.

use std::f64::consts::PI;

use simprop_core::units::{eV, H_BAR_C, K_BOLTZMANN};
use simprop_core::{NumericError, PhotonField};

/// Present-day CMB temperature (K), FIRAS.
pub const CMB_TEMPERATURE: f64 = 2.7255;

/// Blackbody photon field at the present-day CMB temperature.
///
/// `dn/dε = ε² / (π² (ħc)³ (exp(ε/kT) − 1))`, supported on
/// `[1e-6 eV, 1e-2 eV]`, which covers the spectrum to well below
/// `1e-15` of its peak.
#[derive(Clone, Debug)]
pub struct Cmb {
    kt: f64,
    min_energy: f64,
    max_energy: f64,
}

impl Cmb {
    /// CMB at [`CMB_TEMPERATURE`].
    pub fn new() -> Self {
        Self::with_temperature(CMB_TEMPERATURE)
    }

    /// Blackbody at an arbitrary temperature (K), same energy support.
    pub fn with_temperature(temperature: f64) -> Self {
        Self {
            kt: K_BOLTZMANN * temperature,
            min_energy: 1e-6 * eV,
            max_energy: 1e-2 * eV,
        }
    }

    /// Total photon number density (1/m³), integrated over the support.
    pub fn number_density(&self) -> Result<f64, NumericError> {
        simprop_numeric::integrate(
            |ln_e| {
                let e = ln_e.exp();
                e * self.density(e)
            },
            self.min_energy.ln(),
            self.max_energy.ln(),
            1000,
        )
    }
}

impl Default for Cmb {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotonField for Cmb {
    fn name(&self) -> &str {
        "CMB"
    }

    fn density(&self, energy: f64) -> f64 {
        if !(energy >= self.min_energy && energy <= self.max_energy) {
            return 0.0;
        }
        let x = energy / self.kt;
        if x > 700.0 {
            return 0.0;
        }
        energy.powi(2) / (PI * PI * H_BAR_C.powi(3)) / x.exp_m1()
    }

    fn min_energy(&self) -> f64 {
        self.min_energy
    }

    fn max_energy(&self) -> f64 {
        self.max_energy
    }
}
