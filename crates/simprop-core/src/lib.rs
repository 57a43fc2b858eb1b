//! Core types and traits for the SimProp propagation framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the SimProp workspace:
//! particle identifiers, particle state, SI units and physical constants,
//! error types, and the capability traits implemented by photon fields,
//! cosmologies, cross sections, and random sources.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod particle;
pub mod pid;
pub mod traits;
pub mod units;

pub use error::{ModelError, NumericError};
pub use particle::{Daughters, Particle};
pub use pid::Pid;
pub use traits::{Cosmology, CrossSection, PhotonField, RandomSource};
