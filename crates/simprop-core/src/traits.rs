//! Capability traits for the external collaborators of the propagation
//! engine: photon fields, cosmology, cross sections, and randomness.
//!
//! Photon fields and cosmologies are shared read-only between several
//! loss and interaction models, so they are `Send + Sync` and held behind
//! `Arc<dyn ...>` by their consumers.

/// A background photon field.
///
/// Densities are comoving (`z = 0`) values; models apply the redshift
/// scaling themselves.
pub trait PhotonField: Send + Sync {
    /// Human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Differential number density `dn/dε` in `1 / (J · m³)` at photon
    /// energy `energy` (J). Zero outside the field's support.
    fn density(&self, energy: f64) -> f64;

    /// Lowest photon energy (J) with non-negligible density.
    fn min_energy(&self) -> f64;

    /// Highest photon energy (J) with non-negligible density.
    fn max_energy(&self) -> f64;
}

/// Background cosmology.
pub trait Cosmology: Send + Sync {
    /// Magnitude of cosmic time elapsed per unit redshift, `|dt/dz|`, in
    /// seconds.
    fn dtdz(&self, z: f64) -> f64;

    /// Hubble expansion rate `H(z)` in `1/s`.
    fn hubble_rate(&self, z: f64) -> f64;
}

/// Tabulated interaction cross section.
pub trait CrossSection: Send + Sync {
    /// Cross section (m²) at photon energy `energy` (J) in the rest frame
    /// of the target nucleon. Zero below threshold.
    fn cross_section(&self, energy: f64) -> f64;

    /// Threshold photon energy (J) in the nucleon rest frame.
    fn threshold(&self) -> f64;

    /// Largest tabulated photon energy (J).
    fn max_energy(&self) -> f64;
}

/// A deterministic stream of uniform random numbers.
///
/// Threaded explicitly as `&mut dyn RandomSource` through every call that
/// needs randomness, so a single seeded stream drives a whole run.
pub trait RandomSource {
    /// Draw the next uniform double in the open interval `(0, 1)`.
    fn uniform(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }
}
