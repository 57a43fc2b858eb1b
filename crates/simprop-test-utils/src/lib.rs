//! Test utilities and mock models for SimProp development.
//!
//! Provides deterministic stand-ins for the core capabilities
//! ([`Cosmology`], [`RandomSource`]) so engine behaviour
//! can be checked against closed-form expectations. Loss and interaction
//! fixtures live in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use simprop_core::{Cosmology, RandomSource};

/// Expansion history with a redshift-independent Hubble rate.
///
/// `dt/dz = 1 / ((1+z) H)`, so the adiabatic `ΔΓ/Γ` over `[z−dz, z]`
/// has a simple closed form for test assertions.
pub struct ConstantCosmology {
    pub hubble: f64,
}

impl ConstantCosmology {
    pub fn new(hubble: f64) -> Self {
        Self { hubble }
    }
}

impl Cosmology for ConstantCosmology {
    fn dtdz(&self, z: f64) -> f64 {
        1.0 / ((1.0 + z) * self.hubble)
    }

    fn hubble_rate(&self, _z: f64) -> f64 {
        self.hubble
    }
}

/// Random source replaying a fixed sequence of draws, cycling at the end.
///
/// Panics on construction if the sequence is empty or any value lies
/// outside `(0, 1)`.
pub struct SequenceRng {
    values: Vec<f64>,
    cursor: usize,
    draws: u64,
}

impl SequenceRng {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "SequenceRng needs at least one value");
        assert!(
            values.iter().all(|u| *u > 0.0 && *u < 1.0),
            "SequenceRng values must lie in (0, 1)"
        );
        Self {
            values,
            cursor: 0,
            draws: 0,
        }
    }

    /// A source that always returns `u`.
    pub fn constant(u: f64) -> Self {
        Self::new(vec![u])
    }

    /// Total draws taken so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl RandomSource for SequenceRng {
    fn uniform(&mut self) -> f64 {
        let u = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        self.draws += 1;
        u
    }
}
