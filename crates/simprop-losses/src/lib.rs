//! Energy-loss and interaction models for the SimProp propagation engine.
//!
//! Two capabilities, both stateless `&self` models that may share photon
//! fields and cosmologies through `Arc`:
//!
//! - [`ContinuousLoss`]: deterministic fractional loss rate `dlnΓ/dt`.
//!   Implemented by [`PairProductionLoss`] and [`AdiabaticLoss`].
//! - [`Interaction`]: stochastic interaction rate and final-state sampling.
//!   Implemented by [`PhotoPionProduction`] with the [`PhotoPionXsec`]
//!   cross-section table.
//!
//! The engine sums every registered continuous loss and splits each step
//! between a continuous update and a single interaction.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod adiabatic;
pub mod continuous;
pub mod interaction;
pub mod pair_production;
pub mod photopion;
pub mod xsec;

pub use adiabatic::AdiabaticLoss;
pub use continuous::ContinuousLoss;
pub use interaction::Interaction;
pub use pair_production::{PairProductionLoss, PairProductionLossBuilder};
pub use photopion::{PhotoPionProduction, PhotoPionProductionBuilder};
pub use xsec::PhotoPionXsec;
