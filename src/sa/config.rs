//! SA configuration.

/// Configuration for Simulated Annealing.
///
/// Temperature starts at `initial_temperature`, each level runs
/// `iterations_per_temperature` neighbor evaluations, then cools
/// geometrically by `cooling_ratio` until it reaches `min_temperature`.
///
/// A worsening neighbor with objective change `delta < 0` is accepted with
/// probability `exp(delta * acceptance_scale / T)`. The objective lives in
/// roughly `[0, 1]`, so `acceptance_scale` maps it onto the temperature
/// range.
///
/// # Examples
///
/// ```
/// use acq_metaheur::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(5.0)
///     .with_iterations_per_temperature(100)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Starting temperature.
    pub initial_temperature: f64,

    /// The run stops once the temperature is no longer above this.
    pub min_temperature: f64,

    /// Geometric cooling factor in (0, 1).
    pub cooling_ratio: f64,

    /// Neighbor evaluations per temperature level.
    pub iterations_per_temperature: usize,

    /// Multiplier applied to the objective delta in the acceptance exponent.
    pub acceptance_scale: f64,

    /// Flip draws allowed per neighbor request before the run is reported
    /// as exhausted.
    pub max_neighbor_attempts: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 30.0,
            min_temperature: 0.01,
            cooling_ratio: 0.95,
            iterations_per_temperature: 2400,
            acceptance_scale: 80.0,
            max_neighbor_attempts: 10_000,
            seed: None,
        }
    }
}

impl SaConfig {
    /// Short, greedy schedule used to refine a swarm's best solution.
    pub fn intensification() -> Self {
        Self {
            initial_temperature: 10.0,
            iterations_per_temperature: 500,
            acceptance_scale: 200.0,
            ..Self::default()
        }
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling_ratio(mut self, ratio: f64) -> Self {
        self.cooling_ratio = ratio;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_acceptance_scale(mut self, k: f64) -> Self {
        self.acceptance_scale = k;
        self
    }

    pub fn with_max_neighbor_attempts(mut self, n: usize) -> Self {
        self.max_neighbor_attempts = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.initial_temperature > 0.0) {
            return Err("initial_temperature must be positive".into());
        }
        if !(self.min_temperature > 0.0) {
            return Err("min_temperature must be positive".into());
        }
        if self.min_temperature >= self.initial_temperature {
            return Err("min_temperature must be less than initial_temperature".into());
        }
        if !(self.cooling_ratio > 0.0 && self.cooling_ratio < 1.0) {
            return Err(format!(
                "cooling_ratio must be in (0, 1), got {}",
                self.cooling_ratio
            ));
        }
        if self.iterations_per_temperature == 0 {
            return Err("iterations_per_temperature must be positive".into());
        }
        if !(self.acceptance_scale > 0.0 && self.acceptance_scale.is_finite()) {
            return Err(format!(
                "acceptance_scale must be positive and finite, got {}",
                self.acceptance_scale
            ));
        }
        if self.max_neighbor_attempts == 0 {
            return Err("max_neighbor_attempts must be positive".into());
        }
        Ok(())
    }
}
