//! Benchmark profiles for the SimProp propagation framework.
//!
//! Provides pre-built engines for benchmarking and examples:
//!
//! - [`reference_profile`]: GZK protons at z = 1 with the full CMB model set
//! - [`iron_profile`]: iron nuclei under continuous losses only

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::error::Error;
use std::sync::Arc;

use simprop_core::{Cosmology, PhotonField, Pid};
use simprop_engine::{PropagationEngine, SingleParticleBuilder};
use simprop_fields::{Cmb, LambdaCdm};
use simprop_losses::{AdiabaticLoss, PairProductionLoss, PhotoPionProduction, PhotoPionXsec};

/// Error type for profile construction.
pub type ProfileError = Box<dyn Error + Send + Sync>;

/// Build a reference profile: `count` protons at z = 1, Γ = 1e12.
///
/// Losses: adiabatic + CMB pair production. Interaction: CMB photopion
/// production with default node counts.
pub fn reference_profile(count: usize) -> Result<PropagationEngine, ProfileError> {
    cmb_engine(Pid::PROTON, count, 1.0, 1e12)
}

/// Build an iron profile: `count` Fe-56 nuclei at z = 2, Γ = 1e10.
///
/// Same model set as [`reference_profile`]; photopion production does not
/// act on nuclei, so every step is continuous.
pub fn iron_profile(count: usize) -> Result<PropagationEngine, ProfileError> {
    cmb_engine(Pid::nucleus(26, 56), count, 2.0, 1e10)
}

fn cmb_engine(pid: Pid, count: usize, z: f64, gamma: f64) -> Result<PropagationEngine, ProfileError> {
    let cosmology: Arc<dyn Cosmology> = Arc::new(LambdaCdm::planck2018());
    let cmb: Arc<dyn PhotonField> = Arc::new(Cmb::new());
    let photopion = PhotoPionProduction::new(Arc::new(PhotoPionXsec::new()?), Arc::clone(&cmb));
    let stack = SingleParticleBuilder::new(pid, count)
        .redshift(z)
        .gamma(gamma)
        .build()?;
    let engine = PropagationEngine::builder()
        .cosmology(Arc::clone(&cosmology))
        .loss(Arc::new(AdiabaticLoss::new(cosmology)))
        .loss(Arc::new(PairProductionLoss::new(vec![cmb])))
        .interaction(Arc::new(photopion))
        .stack(stack)
        .build()?;
    Ok(engine)
}
