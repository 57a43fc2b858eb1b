//! Initial-condition builders.

use simprop_core::{Particle, Pid};

use crate::stack::ParticleStack;

/// Builds a stack of `n` identical particles.
///
/// # Example
///
/// ```
/// use simprop_core::Pid;
/// use simprop_engine::SingleParticleBuilder;
///
/// let stack = SingleParticleBuilder::new(Pid::PROTON, 3)
///     .redshift(1.0)
///     .gamma(1e12)
///     .build()
///     .unwrap();
/// assert_eq!(stack.len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct SingleParticleBuilder {
    pid: Pid,
    count: usize,
    redshift: Option<f64>,
    gamma: Option<f64>,
}

impl SingleParticleBuilder {
    /// Start a builder for `count` particles of species `pid`.
    pub fn new(pid: Pid, count: usize) -> Self {
        Self {
            pid,
            count,
            redshift: None,
            gamma: None,
        }
    }

    /// Set the source redshift.
    pub fn redshift(mut self, z: f64) -> Self {
        self.redshift = Some(z);
        self
    }

    /// Set the initial Lorentz factor.
    pub fn gamma(mut self, gamma: f64) -> Self {
        self.gamma = Some(gamma);
        self
    }

    /// Build the stack.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `redshift` or `gamma` is unset, if the redshift is
    /// negative or non-finite, if the Lorentz factor is not finite and
    /// positive, or if `count` is zero.
    pub fn build(self) -> Result<ParticleStack, String> {
        let z = self.redshift.ok_or_else(|| "redshift is required".to_string())?;
        let gamma = self.gamma.ok_or_else(|| "gamma is required".to_string())?;
        if !(z.is_finite() && z >= 0.0) {
            return Err(format!("redshift must be finite and >= 0, got {z}"));
        }
        if !(gamma.is_finite() && gamma > 0.0) {
            return Err(format!("gamma must be finite and > 0, got {gamma}"));
        }
        if self.count == 0 {
            return Err("particle count must be at least 1".to_string());
        }
        let particle = Particle::new(self.pid, z, gamma);
        Ok(std::iter::repeat_n(particle, self.count).collect())
    }
}
