//! Seeded random source for propagation runs.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use simprop_core::RandomSource;

/// ChaCha8 stream seeded from a `u64`.
///
/// The same seed and draw order reproduce a run exactly. Draws lie in the
/// open interval `(0, 1)`: a zero is discarded and redrawn so
/// `ln(1 − u)` and `ln(u)` stay finite.
#[derive(Clone, Debug)]
pub struct SimRng {
    inner: ChaCha8Rng,
    seed: u64,
    draws: u64,
}

impl SimRng {
    /// Stream seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            draws: 0,
        }
    }

    /// The seed this stream was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Accepted draws so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl RandomSource for SimRng {
    fn uniform(&mut self) -> f64 {
        loop {
            let u: f64 = self.inner.random();
            if u > 0.0 {
                self.draws += 1;
                return u;
            }
        }
    }
}
