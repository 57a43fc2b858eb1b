//! Evolve ultra-high-energy protons through the CMB and the extragalactic
//! background light.
//!
//! Demonstrates:
//!   1. Building the Planck 2018 cosmology, the CMB, and a tabulated EBL
//!   2. Registering adiabatic losses and pair production on both fields
//!   3. Attaching photopion production as the stochastic channel
//!   4. Running the engine with a seeded RNG and text output on stdout
//!
//! Run with:
//!   RUST_LOG=simprop_engine=debug cargo run --example evolve_protons -- [seed] [z] [gamma] [count]

use std::f64::consts::PI;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::sync::Arc;

use simprop_core::units::{eV, H_BAR_C, K_BOLTZMANN};
use simprop_core::{Cosmology, NumericError, PhotonField, Pid};
use simprop_engine::{
    EngineConfig, PropagationEngine, SimRng, SingleParticleBuilder, TextSink,
};
use simprop_fields::{Cmb, LambdaCdm, TabulatedPhotonField};
use simprop_losses::{AdiabaticLoss, PairProductionLoss, PhotoPionProduction, PhotoPionXsec};
use tracing_subscriber::EnvFilter;

// ─── Defaults ───────────────────────────────────────────────────

const SEED: u64 = 2024;
const SOURCE_REDSHIFT: f64 = 1.0;
const SOURCE_GAMMA: f64 = 1e12;
const COUNT: usize = 1;

fn arg<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> Result<T, String> {
    match args.get(index) {
        Some(s) => s.parse().map_err(|_| format!("cannot parse argument {index}: '{s}'")),
        None => Ok(default),
    }
}

// ─── EBL ────────────────────────────────────────────────────────

/// Starlight and dust re-emission as diluted blackbodies: (T in K, dilution).
const EBL_COMPONENTS: [(f64, f64); 2] = [(4000.0, 1e-12), (40.0, 1e-6)];

/// Coarse extragalactic background light, sampled on `[1e-4 eV, 10 eV]`.
fn extragalactic_background() -> Result<TabulatedPhotonField, NumericError> {
    let energies = simprop_numeric::log_axis(1e-4 * eV, 10.0 * eV, 120)?;
    let densities: Vec<f64> = energies
        .iter()
        .map(|&e| {
            EBL_COMPONENTS
                .iter()
                .map(|&(t, w)| {
                    let x = e / (K_BOLTZMANN * t);
                    if x > 700.0 {
                        0.0
                    } else {
                        w * e.powi(2) / (PI * PI * H_BAR_C.powi(3)) / x.exp_m1()
                    }
                })
                .sum::<f64>()
        })
        .collect();
    TabulatedPhotonField::from_samples("EBL", &energies, &densities)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = arg(&args, 0, SEED)?;
    let z = arg(&args, 1, SOURCE_REDSHIFT)?;
    let gamma = arg(&args, 2, SOURCE_GAMMA)?;
    let count = arg(&args, 3, COUNT)?;

    // ─── Shared collaborators ───────────────────────────────────

    let cosmology: Arc<dyn Cosmology> = Arc::new(LambdaCdm::planck2018());
    let cmb: Arc<dyn PhotonField> = Arc::new(Cmb::new());
    let ebl: Arc<dyn PhotonField> = Arc::new(extragalactic_background()?);

    let pair = PairProductionLoss::builder()
        .field(Arc::clone(&cmb))
        .field(ebl)
        .build()?;
    let photopion = PhotoPionProduction::builder()
        .xsec(Arc::new(PhotoPionXsec::new()?))
        .field(cmb)
        .build()?;

    let stack = SingleParticleBuilder::new(Pid::PROTON, count)
        .redshift(z)
        .gamma(gamma)
        .build()?;

    let mut engine = PropagationEngine::builder()
        .cosmology(Arc::clone(&cosmology))
        .loss(Arc::new(AdiabaticLoss::new(cosmology)))
        .loss(Arc::new(pair))
        .interaction(Arc::new(photopion))
        .stack(stack)
        .config(EngineConfig::default())
        .build()?;

    // ─── Run ────────────────────────────────────────────────────

    let mut rng = SimRng::new(seed);
    let mut sink = TextSink::new(BufWriter::new(io::stdout().lock()));
    let metrics = engine.run(&mut rng, &mut sink)?;
    sink.into_inner()?;

    eprintln!(
        "{} iterations ({} continuous, {} interactions, {} quarantined) in {} us",
        metrics.iterations,
        metrics.continuous_steps,
        metrics.stochastic_steps,
        metrics.quarantined,
        metrics.elapsed_us
    );
    for p in engine.stack().iter() {
        eprintln!("final: {p}");
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
