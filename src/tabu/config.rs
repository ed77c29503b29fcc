//! Tabu Search configuration.

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use acq_metaheur::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_max_iterations(200)
///     .with_tabu_capacity(10);
/// assert_eq!(config.max_iterations, 200);
/// assert_eq!(config.tabu_capacity, 10);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// Iterations allowed without a new best. The counter restarts from
    /// zero on every improvement, so a run can take many more iterations
    /// in total.
    pub max_iterations: usize,
    /// Number of recently flipped cells that may not be flipped again.
    pub tabu_capacity: usize,
    /// Score candidate flips on the rayon thread pool. The chosen move is
    /// the same either way.
    pub parallel: bool,
    /// Random seed for the start solution (None for random).
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1200,
            tabu_capacity: 30,
            parallel: false,
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Sets the non-improving iteration budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the tabu list capacity.
    pub fn with_tabu_capacity(mut self, capacity: usize) -> Self {
        self.tabu_capacity = capacity;
        self
    }

    /// Enables or disables parallel candidate scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.tabu_capacity == 0 {
            return Err("tabu_capacity must be positive".into());
        }
        Ok(())
    }
}
