//! Photopion production cross section.

use simprop_core::units::{millibarn, GeV, PION_MASS_C2, PROTON_MASS_C2};
use simprop_core::{CrossSection, NumericError};
use simprop_numeric::LookupTable;

/// Number of tabulated cross-section samples.
pub const TABLE_SIZE: usize = 1000;

/// Rest-frame threshold photon energy `m_π + m_π² / (2 m_p)`.
pub const THRESHOLD: f64 = PION_MASS_C2 + PION_MASS_C2 * PION_MASS_C2 / (2.0 * PROTON_MASS_C2);

/// Upper edge of the built-in table.
pub const MAX_ENERGY: f64 = 100.0 * GeV;

/// Nucleon photopion cross section as a function of the photon energy in
/// the nucleon rest frame.
///
/// Backed by a fixed-size [`LookupTable`] spaced logarithmically from
/// [`THRESHOLD`] upward.
#[derive(Clone, Debug)]
pub struct PhotoPionXsec {
    table: LookupTable<TABLE_SIZE>,
}

impl PhotoPionXsec {
    /// Built-in parameterisation: a Breit–Wigner Δ(1232) resonance peaking
    /// near 0.34 GeV on top of a rising multipion plateau, with a linear
    /// ramp over the first 50 MeV above threshold.
    pub fn new() -> Result<Self, NumericError> {
        let table = LookupTable::from_fn(THRESHOLD, MAX_ENERGY, Self::parameterisation)?;
        Ok(Self { table })
    }

    /// Table from [`TABLE_SIZE`] samples (m²) on a log axis over
    /// `[min, max]` (J), typically read from a data file by the caller.
    pub fn from_samples(min: f64, max: f64, samples: &[f64]) -> Result<Self, NumericError> {
        Ok(Self {
            table: LookupTable::from_samples(min, max, samples)?,
        })
    }

    fn parameterisation(energy: f64) -> f64 {
        const PEAK: f64 = 0.34;
        const WIDTH: f64 = 0.2;
        const RESONANCE: f64 = 0.5;
        const PLATEAU: f64 = 0.12;
        let x = energy / GeV;
        let x_th = THRESHOLD / GeV;
        if x < x_th {
            return 0.0;
        }
        let ramp = ((x - x_th) / 0.05).min(1.0);
        let half_width_sq = 0.25 * WIDTH * WIDTH;
        let resonance = RESONANCE * half_width_sq / ((x - PEAK) * (x - PEAK) + half_width_sq);
        let plateau = PLATEAU * (1.0 - (-(x - x_th) / 0.5).exp());
        (resonance * ramp + plateau) * millibarn
    }
}

impl CrossSection for PhotoPionXsec {
    fn cross_section(&self, energy: f64) -> f64 {
        self.table.get(energy)
    }

    fn threshold(&self) -> f64 {
        self.table.min()
    }

    fn max_energy(&self) -> f64 {
        self.table.max()
    }
}
