//! Per-run counters for the propagation engine.

/// Counters collected over a propagation run.
///
/// The engine updates these on every [`step()`](crate::engine::PropagationEngine::step);
/// [`run()`](crate::engine::PropagationEngine::run) also fills in the
/// wall-clock time and returns a copy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Iterations that found an active particle.
    pub iterations: u64,
    /// Continuous steps taken.
    pub continuous_steps: u64,
    /// Stochastic interactions taken.
    pub stochastic_steps: u64,
    /// Particles set aside after an invariant violation.
    pub quarantined: u64,
    /// Continuous steps whose size needed a bisection solve.
    pub root_solves: u64,
    /// Daughters inserted by interactions.
    pub daughters_inserted: u64,
    /// Largest active count observed.
    pub max_active: usize,
    /// Wall-clock time of the last `run()`, in microseconds.
    pub elapsed_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = RunMetrics::default();
        assert_eq!(m.iterations, 0);
        assert_eq!(m.continuous_steps, 0);
        assert_eq!(m.stochastic_steps, 0);
        assert_eq!(m.quarantined, 0);
        assert_eq!(m.root_solves, 0);
        assert_eq!(m.daughters_inserted, 0);
        assert_eq!(m.max_active, 0);
        assert_eq!(m.elapsed_us, 0);
    }
}
