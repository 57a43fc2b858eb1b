//! Propagation engine for SimProp.
//!
//! Provides [`PropagationEngine`], which evolves a [`ParticleStack`] of
//! nuclei from their source redshift toward `z = 0` by coupling
//! continuous energy losses with one stochastic interaction channel, plus
//! the configuration, seeded randomness, output, and metrics around it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod output;
pub mod rng;
pub mod stack;

pub use builder::SingleParticleBuilder;
pub use config::{ConfigError, EngineConfig, ViolationPolicy};
pub use engine::{PropagationEngine, PropagationEngineBuilder, StepOutcome};
pub use error::EngineError;
pub use metrics::RunMetrics;
pub use output::{EventKind, MemorySink, OutputSink, TextSink};
pub use rng::SimRng;
pub use stack::ParticleStack;
