//! SimProp: cosmological propagation of ultra-high-energy cosmic-ray nuclei.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! SimProp sub-crates. For most users, adding `simprop` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use simprop::prelude::*;
//!
//! let cosmology: Arc<dyn Cosmology> = Arc::new(LambdaCdm::planck2018());
//! let cmb: Arc<dyn PhotonField> = Arc::new(Cmb::new());
//!
//! let stack = SingleParticleBuilder::new(Pid::nucleus(26, 56), 1)
//!     .redshift(0.05)
//!     .gamma(1e9)
//!     .build()
//!     .unwrap();
//! let mut engine = PropagationEngine::builder()
//!     .cosmology(Arc::clone(&cosmology))
//!     .loss(Arc::new(AdiabaticLoss::new(cosmology)))
//!     .loss(Arc::new(PairProductionLoss::new(vec![Arc::clone(&cmb)])))
//!     .interaction(Arc::new(PhotoPionProduction::new(
//!         Arc::new(PhotoPionXsec::new().unwrap()),
//!         cmb,
//!     )))
//!     .stack(stack)
//!     .build()
//!     .unwrap();
//!
//! let mut sink = TextSink::new(Vec::new());
//! let metrics = engine.run(&mut SimRng::new(42), &mut sink).unwrap();
//! assert_eq!(engine.active_count(), 0);
//! assert!(metrics.iterations >= 1);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `simprop-core` | `Pid`, `Particle`, units, errors, capability traits |
//! | [`numeric`] | `simprop-numeric` | Simpson quadrature, bisection, lookup tables |
//! | [`fields`] | `simprop-fields` | CMB, tabulated photon fields, ΛCDM cosmology |
//! | [`losses`] | `simprop-losses` | Continuous losses and photopion production |
//! | [`engine`] | `simprop-engine` | Propagation engine, stack, output, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, units, and traits (`simprop-core`).
///
/// Contains particle identifiers and state, SI units and constants, error
/// types, and the capability traits ([`types::PhotonField`],
/// [`types::Cosmology`], [`types::CrossSection`], [`types::RandomSource`]).
pub use simprop_core as types;

/// Numeric kernels (`simprop-numeric`).
pub use simprop_numeric as numeric;

/// Photon fields and cosmologies (`simprop-fields`).
pub use simprop_fields as fields;

/// Loss and interaction models (`simprop-losses`).
///
/// [`losses::ContinuousLoss`] and [`losses::Interaction`] are the main
/// extension points for user-defined physics.
pub use simprop_losses as losses;

/// The propagation engine (`simprop-engine`).
pub use simprop_engine as engine;

/// Common imports for typical SimProp usage.
///
/// ```rust
/// use simprop::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use simprop_core::{
        Cosmology, CrossSection, Daughters, Particle, PhotonField, Pid, RandomSource,
    };

    // Errors
    pub use simprop_core::{ModelError, NumericError};
    pub use simprop_engine::{ConfigError, EngineError};

    // Fields and cosmology
    pub use simprop_fields::{Cmb, LambdaCdm, TabulatedPhotonField};

    // Models
    pub use simprop_losses::{
        AdiabaticLoss, ContinuousLoss, Interaction, PairProductionLoss, PhotoPionProduction,
        PhotoPionXsec,
    };

    // Engine
    pub use simprop_engine::{
        EngineConfig, EventKind, OutputSink, ParticleStack, PropagationEngine, RunMetrics,
        SimRng, SingleParticleBuilder, StepOutcome, TextSink, ViolationPolicy,
    };
}
