//! Background photon fields and cosmologies for SimProp.
//!
//! Reference implementations of the [`PhotonField`](simprop_core::PhotonField)
//! and [`Cosmology`](simprop_core::Cosmology) capabilities:
//!
//! - [`Cmb`]: the cosmic microwave background as an analytic blackbody.
//! - [`TabulatedPhotonField`]: log–log interpolation over in-memory
//!   samples, e.g. an extragalactic background light model.
//! - [`LambdaCdm`]: flat ΛCDM expansion history, with a
//!   [`Planck2018`](LambdaCdm::planck2018) preset.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod cmb;
pub mod cosmology;
pub mod tabulated;

pub use cmb::Cmb;
pub use cosmology::LambdaCdm;
pub use tabulated::TabulatedPhotonField;
