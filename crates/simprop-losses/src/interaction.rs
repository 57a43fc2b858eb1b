//! The [`Interaction`] trait.

use simprop_core::{Daughters, ModelError, Particle, Pid, RandomSource};

/// A discrete, randomly timed interaction channel.
///
/// # Contract
///
/// - `rate()` is deterministic and non-negative (`1/s`).
/// - `final_state()` returns a non-empty list of daughters that replace
///   the parent at redshift `z`; no daughter may have a larger Lorentz
///   factor than the parent.
/// - All randomness comes from the `rng` argument so a single seeded
///   stream reproduces a whole run.
pub trait Interaction: Send + Sync {
    /// Human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Mean interaction rate for species `pid` at Lorentz factor `gamma`
    /// and redshift `z`.
    fn rate(&self, pid: Pid, gamma: f64, z: f64) -> Result<f64, ModelError>;

    /// Sample the daughters of `particle` interacting at redshift `z`.
    fn final_state(
        &self,
        particle: &Particle,
        z: f64,
        rng: &mut dyn RandomSource,
    ) -> Result<Daughters, ModelError>;
}
