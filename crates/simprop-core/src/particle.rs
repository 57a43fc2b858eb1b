//! Particle state.

use std::fmt;

use smallvec::SmallVec;

use crate::pid::Pid;

/// Daughters produced by a stochastic interaction, in stack order.
///
/// Interactions almost always yield one to three particles, so the
/// inline capacity avoids a heap allocation per interaction.
pub type Daughters = SmallVec<[Particle; 4]>;

/// A propagating particle: species, redshift, and Lorentz factor.
///
/// Continuous steps mutate `redshift` and `gamma` in place; stochastic
/// interactions replace the particle wholesale with its daughters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Species identifier.
    pub pid: Pid,
    /// Cosmological redshift, `z >= 0`.
    pub redshift: f64,
    /// Lorentz factor, `gamma > 0`.
    pub gamma: f64,
}

impl Particle {
    /// Create a particle.
    pub const fn new(pid: Pid, redshift: f64, gamma: f64) -> Self {
        Self {
            pid,
            redshift,
            gamma,
        }
    }

    /// Whether the particle is still propagating under the given floors.
    ///
    /// Active iff the species is a nucleus, `z > min_redshift`, and
    /// `gamma > min_gamma`.
    pub fn is_active(&self, min_redshift: f64, min_gamma: f64) -> bool {
        self.pid.is_nucleus() && self.redshift > min_redshift && self.gamma > min_gamma
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:e} {:e}", self.pid, self.redshift, self.gamma)
    }
}
