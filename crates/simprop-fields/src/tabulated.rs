//! Photon fields defined by sampled spectra.

use simprop_core::{NumericError, PhotonField};

/// A photon field interpolated log–log between `(energy, density)` samples.
///
/// Zero outside the sampled energy range. Where either neighbouring
/// sample is zero the interpolation falls back to linear in density.
#[derive(Clone, Debug)]
pub struct TabulatedPhotonField {
    name: String,
    ln_energies: Vec<f64>,
    densities: Vec<f64>,
    min_energy: f64,
    max_energy: f64,
}

impl TabulatedPhotonField {
    /// Build a field from energies (J, strictly increasing, positive) and
    /// differential densities (`1/(J·m³)`, non-negative).
    ///
    /// # Errors
    ///
    /// [`NumericError::InvalidArgument`] for mismatched lengths, fewer than
    /// two samples, non-increasing energies, or negative/non-finite densities.
    pub fn from_samples(
        name: impl Into<String>,
        energies: &[f64],
        densities: &[f64],
    ) -> Result<Self, NumericError> {
        if energies.len() != densities.len() {
            return Err(NumericError::InvalidArgument {
                reason: format!(
                    "{} energies but {} densities",
                    energies.len(),
                    densities.len()
                ),
            });
        }
        if energies.len() < 2 {
            return Err(NumericError::InvalidArgument {
                reason: "photon field needs at least two samples".to_string(),
            });
        }
        if !(energies[0] > 0.0) || energies.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(NumericError::InvalidArgument {
                reason: "energies must be positive and strictly increasing".to_string(),
            });
        }
        if let Some(d) = densities.iter().find(|d| !(d.is_finite() && **d >= 0.0)) {
            return Err(NumericError::InvalidArgument {
                reason: format!("densities must be finite and >= 0, got {d}"),
            });
        }
        Ok(Self {
            name: name.into(),
            ln_energies: energies.iter().map(|e| e.ln()).collect(),
            densities: densities.to_vec(),
            min_energy: energies[0],
            max_energy: energies[energies.len() - 1],
        })
    }
}

impl PhotonField for TabulatedPhotonField {
    fn name(&self) -> &str {
        &self.name
    }

    fn density(&self, energy: f64) -> f64 {
        if !(energy >= self.min_energy && energy <= self.max_energy) {
            return 0.0;
        }
        let ln_e = energy.ln();
        let hi = self
            .ln_energies
            .partition_point(|&x| x < ln_e)
            .clamp(1, self.ln_energies.len() - 1);
        let lo = hi - 1;
        let t = ((ln_e - self.ln_energies[lo]) / (self.ln_energies[hi] - self.ln_energies[lo]))
            .clamp(0.0, 1.0);
        let (d_lo, d_hi) = (self.densities[lo], self.densities[hi]);
        if d_lo > 0.0 && d_hi > 0.0 {
            (d_lo.ln() + t * (d_hi.ln() - d_lo.ln())).exp()
        } else {
            d_lo + t * (d_hi - d_lo)
        }
    }

    fn min_energy(&self) -> f64 {
        self.min_energy
    }

    fn max_energy(&self) -> f64 {
        self.max_energy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn power_law() -> TabulatedPhotonField {
        // n ∝ ε⁻², sampled at three decades.
        TabulatedPhotonField::from_samples("EBL", &[1.0, 10.0, 100.0], &[1.0, 1e-2, 1e-4])
            .unwrap()
    }

    #[test]
    fn power_law_is_exact_between_nodes() {
        let f = power_law();
        let d = f.density(31.622_776_601_683_793);
        assert!((d - 1e-3).abs() < 1e-12, "got {d}");
    }

    #[test]
    fn reproduces_samples_and_edges() {
        let f = power_law();
        assert!((f.density(1.0) - 1.0).abs() < 1e-12);
        assert!((f.density(100.0) - 1e-4).abs() < 1e-16);
        assert_eq!(f.density(0.5), 0.0);
        assert_eq!(f.density(200.0), 0.0);
        assert_eq!(f.min_energy(), 1.0);
        assert_eq!(f.max_energy(), 100.0);
    }

    #[test]
    fn zero_samples_interpolate_linearly() {
        let f = TabulatedPhotonField::from_samples("x", &[1.0, 100.0], &[0.0, 2.0]).unwrap();
        assert!((f.density(10.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_malformed_tables() {
        assert!(TabulatedPhotonField::from_samples("x", &[1.0], &[1.0]).is_err());
        assert!(TabulatedPhotonField::from_samples("x", &[1.0, 1.0], &[1.0, 1.0]).is_err());
        assert!(TabulatedPhotonField::from_samples("x", &[1.0, 2.0], &[1.0]).is_err());
        assert!(TabulatedPhotonField::from_samples("x", &[1.0, 2.0], &[1.0, -1.0]).is_err());
        assert!(TabulatedPhotonField::from_samples("x", &[0.0, 2.0], &[1.0, 1.0]).is_err());
    }

    proptest! {
        #[test]
        fn density_is_non_negative(e in 0.1f64..1000.0) {
            prop_assert!(power_law().density(e) >= 0.0);
        }
    }
}
