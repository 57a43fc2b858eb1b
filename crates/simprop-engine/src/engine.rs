//! Propagation engine: the single-threaded evolution loop.
//!
//! [`PropagationEngine`] owns a [`ParticleStack`] and advances it one
//! particle at a time by operator splitting. Each iteration picks the
//! first active particle, draws a stochastic redshift interval `dz_s`
//! from the interaction rate, computes the largest continuous interval
//! `dz_c` that keeps `ΔΓ/Γ` below the critical fraction, and takes
//! exactly one of the two steps:
//!
//! - `dz_s > dz_c` or `dz_s > z`: continuous step, `z ← z − dz_c` and
//!   `Γ ← Γ (1 − ΔΓ/Γ)` in place;
//! - otherwise: interaction at `z − dz_s`, the particle is replaced by
//!   its daughters at the front of the stack.
//!
//! The loop ends when no particle is active.

use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexMap;
use tracing::{debug, info, trace, warn};

use simprop_core::{Cosmology, ModelError, Particle, Pid, RandomSource};
use simprop_losses::{ContinuousLoss, Interaction};
use simprop_numeric::try_bracket_root;

use crate::config::{ConfigError, EngineConfig, ViolationPolicy};
use crate::error::EngineError;
use crate::metrics::RunMetrics;
use crate::output::{EventKind, OutputSink};
use crate::stack::ParticleStack;

// ── StepOutcome ──────────────────────────────────────────────────

/// What a single [`PropagationEngine::step()`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The particle lost energy continuously over `dz_c`.
    Continuous,
    /// The particle interacted and was replaced by its daughters.
    Interaction {
        /// Number of daughters inserted at the front of the stack.
        daughters: usize,
    },
    /// The particle broke a step invariant and was set aside.
    Quarantined,
    /// No active particle remains.
    Terminated,
}

// ── PropagationEngine ────────────────────────────────────────────

/// Couples continuous losses and one stochastic interaction channel over
/// a particle stack.
///
/// Built with [`PropagationEngine::builder()`]. Continuous losses are
/// summed in registration order, so a given seed reproduces a run bit for
/// bit.
pub struct PropagationEngine {
    cosmology: Arc<dyn Cosmology>,
    losses: IndexMap<String, Arc<dyn ContinuousLoss>>,
    interaction: Arc<dyn Interaction>,
    stack: ParticleStack,
    config: EngineConfig,
    metrics: RunMetrics,
}

/// Builder for [`PropagationEngine`].
///
/// Required: a cosmology and an interaction model. Losses are optional;
/// an engine without them moves particles straight to `z = 0` unless they
/// interact first.
pub struct PropagationEngineBuilder {
    cosmology: Option<Arc<dyn Cosmology>>,
    losses: Vec<Arc<dyn ContinuousLoss>>,
    interaction: Option<Arc<dyn Interaction>>,
    stack: ParticleStack,
    config: EngineConfig,
}

impl PropagationEngineBuilder {
    /// Set the expansion history used for `dt/dz`.
    pub fn cosmology(mut self, cosmology: Arc<dyn Cosmology>) -> Self {
        self.cosmology = Some(cosmology);
        self
    }

    /// Register a continuous loss. Names must be unique.
    pub fn loss(mut self, loss: Arc<dyn ContinuousLoss>) -> Self {
        self.losses.push(loss);
        self
    }

    /// Set the stochastic interaction channel.
    pub fn interaction(mut self, interaction: Arc<dyn Interaction>) -> Self {
        self.interaction = Some(interaction);
        self
    }

    /// Set the initial particles.
    pub fn stack(mut self, stack: ParticleStack) -> Self {
        self.stack = stack;
        self
    }

    /// Override the default [`EngineConfig`].
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the configuration and assemble the engine.
    pub fn build(self) -> Result<PropagationEngine, ConfigError> {
        self.config.validate()?;
        let cosmology = self.cosmology.ok_or(ConfigError::MissingCosmology)?;
        let interaction = self.interaction.ok_or(ConfigError::MissingInteraction)?;

        let mut losses = IndexMap::with_capacity(self.losses.len());
        for loss in self.losses {
            let name = loss.name().to_string();
            if losses.contains_key(&name) {
                return Err(ConfigError::DuplicateLoss { name });
            }
            losses.insert(name, loss);
        }

        let mut engine = PropagationEngine {
            cosmology,
            losses,
            interaction,
            stack: self.stack,
            config: self.config,
            metrics: RunMetrics::default(),
        };
        engine.metrics.max_active = engine.active_count();
        Ok(engine)
    }
}

impl PropagationEngine {
    /// Create a new builder.
    pub fn builder() -> PropagationEngineBuilder {
        PropagationEngineBuilder {
            cosmology: None,
            losses: Vec::new(),
            interaction: None,
            stack: ParticleStack::new(),
            config: EngineConfig::default(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────

    /// The particle stack in its current state.
    pub fn stack(&self) -> &ParticleStack {
        &self.stack
    }

    /// Consume the engine, returning the final stack.
    pub fn into_stack(self) -> ParticleStack {
        self.stack
    }

    /// Counters accumulated so far.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// The validated configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Registered loss names in summation order.
    pub fn loss_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.losses.keys().map(String::as_str)
    }

    /// Number of particles that are active and not quarantined.
    pub fn active_count(&self) -> usize {
        let (min_z, min_gamma) = (self.config.min_redshift, self.config.min_gamma);
        self.stack.count_active(|p| p.is_active(min_z, min_gamma))
    }

    // ── Step quantities ──────────────────────────────────────────

    /// Summed `dlnΓ/dt` (1/s) over all registered losses.
    pub fn loss_rate(&self, pid: Pid, gamma: f64, z: f64) -> Result<f64, ModelError> {
        let mut total = 0.0;
        for loss in self.losses.values() {
            total += loss.dln_gamma_dt(pid, gamma, z)?;
        }
        Ok(total)
    }

    /// Fractional Lorentz-factor loss `ΔΓ/Γ` over `[z − dz, z]`.
    ///
    /// Three-point Simpson rule on the summed loss rate at `z`,
    /// `z − dz/2` and `z − dz`. Both `Γ` and `dt/dz` stay at their values
    /// for the current state across all three nodes.
    pub fn compute_delta_gamma(&self, particle: &Particle, dz: f64) -> Result<f64, ModelError> {
        let (pid, gamma, z) = (particle.pid, particle.gamma, particle.redshift);
        let b_now = self.loss_rate(pid, gamma, z)?;
        let b_mid = self.loss_rate(pid, gamma, z - 0.5 * dz)?;
        let b_end = self.loss_rate(pid, gamma, z - dz)?;
        Ok(dz / 6.0 * self.cosmology.dtdz(z) * (b_now + 4.0 * b_mid + b_end))
    }

    /// Largest continuous redshift step `dz_c ∈ (0, z]` whose `ΔΓ/Γ`
    /// stays at or below the critical fraction.
    ///
    /// Bisection stops once the bracket is narrower than
    /// `root_tolerance · z`, and the lower end is returned. A root closer to
    /// zero than that width yields `dz_c = 0`, which the step rejects.
    pub fn compute_losses_redshift_interval(&self, particle: &Particle) -> Result<f64, ModelError> {
        self.losses_interval(particle).map(|(dz, _)| dz)
    }

    /// Redshift interval to the next interaction for a uniform draw `u`.
    ///
    /// `λ = |1 / (rate · dt/dz)|` and `dz_s = −λ ln(1 − u)`. A zero rate
    /// gives an infinite interval.
    pub fn compute_stochastic_redshift_interval(
        &self,
        particle: &Particle,
        u: f64,
    ) -> Result<f64, ModelError> {
        let rate = self
            .interaction
            .rate(particle.pid, particle.gamma, particle.redshift)?;
        // Magnitude kept as-is; a signed rate would be masked here.
        let lambda = (1.0 / (rate * self.cosmology.dtdz(particle.redshift))).abs();
        Ok(-lambda * (-u).ln_1p())
    }

    /// `(dz_c, whether bisection was needed)`.
    fn losses_interval(&self, particle: &Particle) -> Result<(f64, bool), ModelError> {
        let z = particle.redshift;
        let critical = self.config.critical_fraction;
        if self.compute_delta_gamma(particle, z)? <= critical {
            return Ok((z, false));
        }
        // Tolerance is relative to z; the feasible end of the bracket keeps
        // ΔΓ/Γ at or below the critical fraction.
        let bracket = try_bracket_root::<_, ModelError>(
            |dz| Ok(self.compute_delta_gamma(particle, dz)? - critical),
            0.0,
            z,
            self.config.root_max_iter,
            self.config.root_tolerance * z,
        )?;
        Ok((bracket.non_positive_end(), true))
    }

    // ── Loop ─────────────────────────────────────────────────────

    /// Advance the first active particle by one continuous or stochastic
    /// step.
    ///
    /// Emits the particle's state with [`EventKind::None`] before the
    /// step is chosen.
    pub fn step(
        &mut self,
        rng: &mut dyn RandomSource,
        sink: &mut dyn OutputSink,
    ) -> Result<StepOutcome, EngineError> {
        let (min_z, min_gamma) = (self.config.min_redshift, self.config.min_gamma);
        let Some((index, particle)) = self
            .stack
            .first_active(|p| p.is_active(min_z, min_gamma))
            .and_then(|i| self.stack.get(i).map(|p| (i, *p)))
        else {
            return Ok(StepOutcome::Terminated);
        };
        if let Some(limit) = self.config.max_iterations {
            if self.metrics.iterations >= limit {
                return Err(EngineError::IterationBudgetExhausted { limit });
            }
        }
        self.metrics.iterations += 1;

        sink.record(&particle, EventKind::None)?;
        trace!(
            iteration = self.metrics.iterations,
            index,
            pid = %particle.pid,
            z = particle.redshift,
            gamma = particle.gamma,
            "scan"
        );

        let u = rng.uniform();
        let dz_s = match self.compute_stochastic_redshift_interval(&particle, u) {
            Ok(dz) => dz,
            Err(e) => return self.reject(index, &particle, e.into(), sink),
        };
        if !(dz_s > 0.0) {
            let reason = format!("stochastic interval dz_s = {dz_s:e} is not positive");
            return self.reject(index, &particle, violation(particle, reason), sink);
        }

        let (dz_c, solved) = match self.losses_interval(&particle) {
            Ok(v) => v,
            Err(e) => return self.reject(index, &particle, e.into(), sink),
        };
        if !(dz_c > 0.0 && dz_c <= particle.redshift) {
            let reason = format!(
                "continuous interval dz_c = {dz_c:e} outside (0, {:e}]",
                particle.redshift
            );
            return self.reject(index, &particle, violation(particle, reason), sink);
        }
        if solved {
            self.metrics.root_solves += 1;
        }

        if dz_s > dz_c || dz_s > particle.redshift {
            self.continuous_step(index, particle, dz_c, sink)
        } else {
            self.stochastic_step(index, particle, dz_s, rng, sink)
        }
    }

    fn continuous_step(
        &mut self,
        index: usize,
        particle: Particle,
        dz_c: f64,
        sink: &mut dyn OutputSink,
    ) -> Result<StepOutcome, EngineError> {
        let delta = match self.compute_delta_gamma(&particle, dz_c) {
            Ok(d) => d,
            Err(e) => return self.reject(index, &particle, e.into(), sink),
        };
        if !(delta >= 0.0) {
            let reason = format!("fractional loss {delta:e} is negative");
            return self.reject(index, &particle, violation(particle, reason), sink);
        }
        if let Some(p) = self.stack.get_mut(index) {
            p.redshift -= dz_c;
            p.gamma *= 1.0 - delta;
        }
        self.metrics.continuous_steps += 1;
        Ok(StepOutcome::Continuous)
    }

    fn stochastic_step(
        &mut self,
        index: usize,
        particle: Particle,
        dz_s: f64,
        rng: &mut dyn RandomSource,
        sink: &mut dyn OutputSink,
    ) -> Result<StepOutcome, EngineError> {
        let z_new = particle.redshift - dz_s;
        let daughters = match self.interaction.final_state(&particle, z_new, rng) {
            Ok(d) => d,
            Err(e) => return self.reject(index, &particle, e.into(), sink),
        };
        if daughters.is_empty() {
            let reason = format!("{} produced no daughters", self.interaction.name());
            return self.reject(index, &particle, violation(particle, reason), sink);
        }
        if let Some(d) = daughters.iter().find(|d| !(d.gamma <= particle.gamma)) {
            let reason = format!("daughter gamma {:e} exceeds parent", d.gamma);
            return self.reject(index, &particle, violation(particle, reason), sink);
        }

        let count = daughters.len();
        debug!(
            interaction = self.interaction.name(),
            pid = %particle.pid,
            z = z_new,
            gamma = particle.gamma,
            dz_s,
            daughters = count,
            "interaction"
        );
        self.stack.remove(index);
        self.stack.push_front_all(daughters);

        self.metrics.stochastic_steps += 1;
        self.metrics.daughters_inserted += count as u64;
        self.metrics.max_active = self.metrics.max_active.max(self.active_count());
        Ok(StepOutcome::Interaction { daughters: count })
    }

    /// Apply the violation policy to the particle at `index`.
    fn reject(
        &mut self,
        index: usize,
        particle: &Particle,
        error: EngineError,
        sink: &mut dyn OutputSink,
    ) -> Result<StepOutcome, EngineError> {
        match self.config.violation_policy {
            ViolationPolicy::Abort => Err(error),
            ViolationPolicy::Quarantine => {
                self.stack.quarantine(index);
                self.metrics.quarantined += 1;
                warn!(
                    pid = %particle.pid,
                    z = particle.redshift,
                    gamma = particle.gamma,
                    %error,
                    "particle quarantined"
                );
                sink.record(particle, EventKind::Quarantined)?;
                Ok(StepOutcome::Quarantined)
            }
        }
    }

    /// Step until no particle is active.
    ///
    /// Returns the accumulated metrics with `elapsed_us` set to the
    /// wall-clock time of this call.
    pub fn run(
        &mut self,
        rng: &mut dyn RandomSource,
        sink: &mut dyn OutputSink,
    ) -> Result<RunMetrics, EngineError> {
        let start = Instant::now();
        info!(
            particles = self.stack.len(),
            active = self.active_count(),
            losses = self.losses.len(),
            interaction = self.interaction.name(),
            "propagation started"
        );
        while self.step(rng, sink)? != StepOutcome::Terminated {}
        self.metrics.elapsed_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        info!(
            iterations = self.metrics.iterations,
            continuous = self.metrics.continuous_steps,
            stochastic = self.metrics.stochastic_steps,
            quarantined = self.metrics.quarantined,
            elapsed_us = self.metrics.elapsed_us,
            "propagation finished"
        );
        Ok(self.metrics.clone())
    }
}

fn violation(particle: Particle, reason: String) -> EngineError {
    EngineError::InvariantViolation { particle, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemorySink;
    use simprop_test_utils::fixtures::{
        ConstantLoss, FailingLoss, FixedRateInteraction, NegativeLoss,
    };
    use simprop_test_utils::{ConstantCosmology, SequenceRng};

    fn engine_with(
        loss_rate: f64,
        interaction: FixedRateInteraction,
        particles: &[Particle],
        config: EngineConfig,
    ) -> PropagationEngine {
        PropagationEngine::builder()
            .cosmology(Arc::new(ConstantCosmology::new(1.0)))
            .loss(Arc::new(ConstantLoss::new("constant", loss_rate)))
            .interaction(Arc::new(interaction))
            .stack(particles.iter().copied().collect())
            .config(config)
            .build()
            .unwrap()
    }

    fn proton(z: f64, gamma: f64) -> Particle {
        Particle::new(Pid::PROTON, z, gamma)
    }

    // ---------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------

    #[test]
    fn duplicate_loss_names_rejected() {
        let result = PropagationEngine::builder()
            .cosmology(Arc::new(ConstantCosmology::new(1.0)))
            .loss(Arc::new(ConstantLoss::new("a", 1.0)))
            .loss(Arc::new(ConstantLoss::new("a", 2.0)))
            .interaction(Arc::new(FixedRateInteraction::disabled()))
            .build();
        assert_eq!(
            result.err(),
            Some(ConfigError::DuplicateLoss { name: "a".into() })
        );
    }

    #[test]
    fn missing_collaborators_rejected() {
        let r = PropagationEngine::builder()
            .interaction(Arc::new(FixedRateInteraction::disabled()))
            .build();
        assert_eq!(r.err(), Some(ConfigError::MissingCosmology));
        let r = PropagationEngine::builder()
            .cosmology(Arc::new(ConstantCosmology::new(1.0)))
            .build();
        assert_eq!(r.err(), Some(ConfigError::MissingInteraction));
    }

    #[test]
    fn losses_keep_registration_order() {
        let engine = PropagationEngine::builder()
            .cosmology(Arc::new(ConstantCosmology::new(1.0)))
            .loss(Arc::new(ConstantLoss::new("b", 1.0)))
            .loss(Arc::new(ConstantLoss::new("a", 2.0)))
            .interaction(Arc::new(FixedRateInteraction::disabled()))
            .build()
            .unwrap();
        assert_eq!(engine.loss_names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(engine.loss_rate(Pid::PROTON, 1e10, 0.0).unwrap(), 3.0);
    }

    // ---------------------------------------------------------------
    // Step quantities
    // ---------------------------------------------------------------

    #[test]
    fn delta_gamma_uses_current_dtdz() {
        let engine = engine_with(0.01, FixedRateInteraction::disabled(), &[], EngineConfig::default());
        let p = proton(0.5, 1e10);
        let d = engine.compute_delta_gamma(&p, 0.5).unwrap();
        let expected = 0.5 * 0.01 / 1.5;
        assert!((d - expected).abs() < 1e-15, "{d} vs {expected}");
    }

    #[test]
    fn small_losses_take_the_whole_redshift() {
        let engine = engine_with(0.01, FixedRateInteraction::disabled(), &[], EngineConfig::default());
        let dz = engine
            .compute_losses_redshift_interval(&proton(0.5, 1e10))
            .unwrap();
        assert_eq!(dz, 0.5);
    }

    #[test]
    fn large_losses_are_capped_at_critical_fraction() {
        let engine = engine_with(1.0, FixedRateInteraction::disabled(), &[], EngineConfig::default());
        let p = proton(1.0, 1e10);
        let dz = engine.compute_losses_redshift_interval(&p).unwrap();
        // ΔΓ/Γ = dz / 2 for this setup.
        assert!((dz - 0.2).abs() < 1e-5, "got {dz}");
        let d = engine.compute_delta_gamma(&p, dz).unwrap();
        assert!(d <= 0.1, "ΔΓ/Γ = {d}");
    }

    #[test]
    fn steep_losses_below_tolerance_redshift_stay_capped() {
        let engine = engine_with(1e6, FixedRateInteraction::disabled(), &[], EngineConfig::default());
        let p = proton(1e-6, 1e10);
        assert!(engine.compute_delta_gamma(&p, p.redshift).unwrap() > 0.9);

        let dz = engine.compute_losses_redshift_interval(&p).unwrap();
        assert!(dz > 0.0 && dz < p.redshift, "dz_c = {dz}");
        let d = engine.compute_delta_gamma(&p, dz).unwrap();
        assert!(d <= 0.1, "ΔΓ/Γ = {d}");
        assert!(d > 0.0999, "ΔΓ/Γ = {d}");
    }

    #[test]
    fn stochastic_interval_is_exponential_draw() {
        let engine = engine_with(0.0, FixedRateInteraction::new(1e3, 0.5), &[], EngineConfig::default());
        let p = proton(1.0, 1e10);
        let dz = engine.compute_stochastic_redshift_interval(&p, 0.5).unwrap();
        let expected = 2.0 / 1e3 * std::f64::consts::LN_2;
        assert!((dz - expected).abs() < 1e-15);
    }

    #[test]
    fn zero_rate_never_interacts() {
        let engine = engine_with(0.0, FixedRateInteraction::disabled(), &[], EngineConfig::default());
        let dz = engine
            .compute_stochastic_redshift_interval(&proton(1.0, 1e10), 1e-12)
            .unwrap();
        assert_eq!(dz, f64::INFINITY);
    }

    // ---------------------------------------------------------------
    // Stepping
    // ---------------------------------------------------------------

    #[test]
    fn continuous_step_updates_in_place() {
        let mut engine = engine_with(
            0.01,
            FixedRateInteraction::disabled(),
            &[proton(0.5, 1e10)],
            EngineConfig::default(),
        );
        let mut rng = SequenceRng::constant(0.5);
        let mut sink = MemorySink::new();
        assert_eq!(engine.step(&mut rng, &mut sink).unwrap(), StepOutcome::Continuous);
        let p = *engine.stack().get(0).unwrap();
        assert_eq!(p.redshift, 0.0);
        assert!((p.gamma - 1e10 * (1.0 - 0.01 / 3.0)).abs() < 1.0);
        assert_eq!(engine.step(&mut rng, &mut sink).unwrap(), StepOutcome::Terminated);
        assert_eq!(sink.records(), &[(proton(0.5, 1e10), EventKind::None)]);
    }

    #[test]
    fn interaction_replaces_parent_at_front() {
        let bystander = Particle::new(Pid::nucleus(26, 56), 0.3, 1e9);
        let mut engine = engine_with(
            0.01,
            FixedRateInteraction::new(1e3, 0.5).with_multiplicity(2),
            &[proton(1.0, 1e10), bystander],
            EngineConfig::default(),
        );
        let mut rng = SequenceRng::constant(0.5);
        let mut sink = MemorySink::new();
        let outcome = engine.step(&mut rng, &mut sink).unwrap();
        assert_eq!(outcome, StepOutcome::Interaction { daughters: 2 });

        let stack: Vec<Particle> = engine.stack().iter().copied().collect();
        assert_eq!(stack.len(), 3);
        let z_new = 1.0 - 2.0e-3 * std::f64::consts::LN_2;
        for d in &stack[..2] {
            assert_eq!(d.gamma, 5e9);
            assert!((d.redshift - z_new).abs() < 1e-15);
        }
        assert_eq!(stack[2], bystander);
        assert_eq!(engine.metrics().daughters_inserted, 2);
        assert_eq!(engine.metrics().max_active, 3);
    }

    #[test]
    fn run_terminates_and_counts() {
        let mut engine = engine_with(
            0.5,
            FixedRateInteraction::disabled(),
            &[proton(1.0, 1e10), proton(2.0, 1e10)],
            EngineConfig::default(),
        );
        let mut rng = SequenceRng::constant(0.5);
        let mut sink = MemorySink::new();
        let m = engine.run(&mut rng, &mut sink).unwrap();
        assert_eq!(engine.active_count(), 0);
        assert_eq!(m.iterations, m.continuous_steps);
        assert!(m.root_solves > 0);
        assert_eq!(sink.records().len() as u64, m.iterations);
    }

    // ---------------------------------------------------------------
    // Violation policy
    // ---------------------------------------------------------------

    #[test]
    fn abort_propagates_model_error() {
        let mut engine = PropagationEngine::builder()
            .cosmology(Arc::new(ConstantCosmology::new(1.0)))
            .loss(Arc::new(FailingLoss::new(0.01, 0)))
            .interaction(Arc::new(FixedRateInteraction::disabled()))
            .stack([proton(1.0, 1e10)].into_iter().collect())
            .config(EngineConfig {
                violation_policy: ViolationPolicy::Abort,
                ..EngineConfig::default()
            })
            .build()
            .unwrap();
        let err = engine
            .step(&mut SequenceRng::constant(0.5), &mut MemorySink::new())
            .unwrap_err();
        assert!(matches!(err, EngineError::Model(_)));
    }

    #[test]
    fn quarantine_sets_particle_aside() {
        let mut engine = PropagationEngine::builder()
            .cosmology(Arc::new(ConstantCosmology::new(1.0)))
            .loss(Arc::new(FailingLoss::new(0.01, 0)))
            .interaction(Arc::new(FixedRateInteraction::disabled()))
            .stack([proton(1.0, 1e10)].into_iter().collect())
            .build()
            .unwrap();
        let mut rng = SequenceRng::constant(0.5);
        let mut sink = MemorySink::new();
        assert_eq!(engine.step(&mut rng, &mut sink).unwrap(), StepOutcome::Quarantined);
        assert_eq!(engine.step(&mut rng, &mut sink).unwrap(), StepOutcome::Terminated);
        assert!(engine.stack().is_quarantined(0));
        assert_eq!(engine.metrics().quarantined, 1);
        let tags: Vec<u8> = sink.records().iter().map(|(_, k)| k.tag()).collect();
        assert_eq!(tags, vec![0, 3]);
    }

    #[test]
    fn negative_loss_is_a_violation() {
        let mut engine = PropagationEngine::builder()
            .cosmology(Arc::new(ConstantCosmology::new(1.0)))
            .loss(Arc::new(NegativeLoss))
            .interaction(Arc::new(FixedRateInteraction::disabled()))
            .stack([proton(0.5, 1e10)].into_iter().collect())
            .config(EngineConfig {
                violation_policy: ViolationPolicy::Abort,
                ..EngineConfig::default()
            })
            .build()
            .unwrap();
        let err = engine
            .step(&mut SequenceRng::constant(0.5), &mut MemorySink::new())
            .unwrap_err();
        assert!(matches!(err, EngineError::InvariantViolation { .. }));
    }

    #[test]
    fn energy_gaining_daughter_is_a_violation() {
        let mut engine = engine_with(
            0.01,
            FixedRateInteraction::new(1e3, 2.0),
            &[proton(1.0, 1e10)],
            EngineConfig {
                violation_policy: ViolationPolicy::Abort,
                ..EngineConfig::default()
            },
        );
        let err = engine
            .step(&mut SequenceRng::constant(0.5), &mut MemorySink::new())
            .unwrap_err();
        match err {
            EngineError::InvariantViolation { reason, .. } => assert!(reason.contains("daughter")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn iteration_budget_enforced() {
        let mut engine = engine_with(
            1.0,
            FixedRateInteraction::disabled(),
            &[proton(5.0, 1e12)],
            EngineConfig {
                max_iterations: Some(3),
                ..EngineConfig::default()
            },
        );
        let err = engine
            .run(&mut SequenceRng::constant(0.5), &mut MemorySink::new())
            .unwrap_err();
        assert_eq!(err, EngineError::IterationBudgetExhausted { limit: 3 });
        assert_eq!(engine.metrics().iterations, 3);
    }
}
