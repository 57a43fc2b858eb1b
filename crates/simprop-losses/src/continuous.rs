//! The [`ContinuousLoss`] trait.

use simprop_core::{ModelError, Pid};

/// A deterministic, smoothly varying energy-loss channel.
///
/// # Contract
///
/// - `dln_gamma_dt()` MUST be deterministic and side-effect free.
/// - The result is the instantaneous fractional loss rate `−dlnΓ/dt` in
///   `1/s`, clamped to be non-negative: a loss model never accelerates.
/// - `&self` only: models are stateless and may be shared via `Arc`.
///
/// # Object safety
///
/// This trait is object-safe; the engine stores losses as
/// `Arc<dyn ContinuousLoss>` and sums their contributions.
///
/// # Examples
///
/// A constant-rate loss:
///
/// ```
/// use simprop_core::{ModelError, Pid};
/// use simprop_losses::ContinuousLoss;
///
/// struct Constant(f64);
///
/// impl ContinuousLoss for Constant {
///     fn name(&self) -> &str { "constant" }
///
///     fn dln_gamma_dt(&self, _pid: Pid, _gamma: f64, _z: f64) -> Result<f64, ModelError> {
///         Ok(self.0.max(0.0))
///     }
/// }
///
/// let loss = Constant(1e-17);
/// assert_eq!(loss.dln_gamma_dt(Pid::PROTON, 1e10, 0.5).unwrap(), 1e-17);
/// ```
pub trait ContinuousLoss: Send + Sync {
    /// Human-readable name, unique within an engine.
    fn name(&self) -> &str;

    /// Fractional Lorentz-factor loss rate for species `pid` at Lorentz
    /// factor `gamma` and redshift `z`.
    fn dln_gamma_dt(&self, pid: Pid, gamma: f64, z: f64) -> Result<f64, ModelError>;
}
