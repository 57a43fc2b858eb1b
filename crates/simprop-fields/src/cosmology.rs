//! Flat ΛCDM cosmology.

use simprop_core::units::{kilometer, megaparsec, second};
use simprop_core::Cosmology;

/// Flat ΛCDM expansion history (radiation neglected).
///
/// `H(z) = H₀ √(Ω_m (1+z)³ + Ω_Λ)` and `|dt/dz| = 1 / ((1+z) H(z))`.
#[derive(Clone, Debug, PartialEq)]
pub struct LambdaCdm {
    h0: f64,
    omega_m: f64,
    omega_lambda: f64,
}

impl LambdaCdm {
    /// Build a cosmology from `H₀` in km/s/Mpc and the density parameters.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `H₀` is not finite and positive, or if either
    /// density parameter is negative or both vanish.
    pub fn new(h0_km_s_mpc: f64, omega_m: f64, omega_lambda: f64) -> Result<Self, String> {
        if !(h0_km_s_mpc.is_finite() && h0_km_s_mpc > 0.0) {
            return Err(format!("H0 must be finite and > 0, got {h0_km_s_mpc}"));
        }
        if !(omega_m >= 0.0 && omega_lambda >= 0.0 && omega_m + omega_lambda > 0.0) {
            return Err(format!(
                "density parameters must be >= 0 and not both zero, got Ωm={omega_m}, ΩΛ={omega_lambda}"
            ));
        }
        Ok(Self {
            h0: h0_km_s_mpc * kilometer / second / megaparsec,
            omega_m,
            omega_lambda,
        })
    }

    /// Planck 2018 (TT,TE,EE+lowE+lensing+BAO) parameters:
    /// `H₀ = 67.4`, `Ω_m = 0.315`, `Ω_Λ = 0.685`.
    pub fn planck2018() -> Self {
        Self {
            h0: 67.4 * kilometer / second / megaparsec,
            omega_m: 0.315,
            omega_lambda: 0.685,
        }
    }

    /// Present-day Hubble rate `H₀` in `1/s`.
    pub fn h0(&self) -> f64 {
        self.h0
    }

    fn e(&self, z: f64) -> f64 {
        let zp1 = 1.0 + z;
        (self.omega_m * zp1 * zp1 * zp1 + self.omega_lambda).sqrt()
    }
}

impl Default for LambdaCdm {
    fn default() -> Self {
        Self::planck2018()
    }
}

impl Cosmology for LambdaCdm {
    fn dtdz(&self, z: f64) -> f64 {
        1.0 / ((1.0 + z) * self.hubble_rate(z))
    }

    fn hubble_rate(&self, z: f64) -> f64 {
        self.h0 * self.e(z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hubble_time_is_about_14_gyr() {
        let c = LambdaCdm::planck2018();
        let gyr = 3.155_76e16;
        let t_h = 1.0 / c.h0() / gyr;
        assert!((t_h - 14.5).abs() < 0.1, "got {t_h}");
    }

    #[test]
    fn dtdz_at_zero_is_inverse_h0() {
        let c = LambdaCdm::planck2018();
        assert!((c.dtdz(0.0) * c.h0() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(LambdaCdm::new(0.0, 0.3, 0.7).is_err());
        assert!(LambdaCdm::new(70.0, -0.1, 0.7).is_err());
        assert!(LambdaCdm::new(70.0, 0.0, 0.0).is_err());
        assert!(LambdaCdm::new(70.0, 0.3, 0.7).is_ok());
    }

    proptest! {
        #[test]
        fn expansion_rate_grows_with_redshift(z in 0.0f64..10.0, dz in 1e-3f64..1.0) {
            let c = LambdaCdm::planck2018();
            prop_assert!(c.hubble_rate(z + dz) > c.hubble_rate(z));
            prop_assert!(c.dtdz(z) > 0.0);
        }
    }
}
