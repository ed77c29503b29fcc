//! PSO configuration.

use crate::topology::Topology;

/// Configuration for binary Particle Swarm Optimization.
///
/// Each cell's velocity is pulled toward the particle's personal best and
/// its best neighbor's personal best:
///
/// ```text
/// v' = inertia * v + cognitive * r1 * (pbest - x) + social * r2 * (nbest - x)
/// ```
///
/// clamped to `[-max_velocity, max_velocity]`. The cell is then set to 1
/// with probability `sigmoid(v')`.
///
/// # Examples
///
/// ```
/// use acq_metaheur::pso::PsoConfig;
/// use acq_metaheur::topology::Topology;
///
/// let config = PsoConfig::default()
///     .with_particle_count(20)
///     .with_max_iterations(100)
///     .with_topology(Topology::Ring);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    /// Number of particles in the swarm.
    pub particle_count: usize,

    /// Number of swarm iterations.
    pub max_iterations: usize,

    /// Velocity bound per cell.
    pub max_velocity: f64,

    /// Inertia weight on the previous velocity.
    pub inertia: f64,

    /// Cognitive learning rate (pull toward the personal best).
    pub cognitive: f64,

    /// Social learning rate (pull toward the best neighbor).
    pub social: f64,

    /// Which particles a particle learns from.
    pub topology: Topology,

    /// Evaluate particle fitness on the rayon thread pool. Random draws are
    /// unaffected, so results match the sequential run.
    pub parallel: bool,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            particle_count: 50,
            max_iterations: 2900,
            max_velocity: 6.0,
            inertia: 1.0,
            cognitive: 2.0,
            social: 2.0,
            topology: Topology::Global,
            parallel: false,
            seed: None,
        }
    }
}

impl PsoConfig {
    pub fn with_particle_count(mut self, n: usize) -> Self {
        self.particle_count = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_max_velocity(mut self, v: f64) -> Self {
        self.max_velocity = v;
        self
    }

    pub fn with_inertia(mut self, w: f64) -> Self {
        self.inertia = w;
        self
    }

    /// Sets the cognitive and social learning rates.
    pub fn with_learning_rates(mut self, cognitive: f64, social: f64) -> Self {
        self.cognitive = cognitive;
        self.social = social;
        self
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.particle_count == 0 {
            return Err("particle_count must be positive".into());
        }
        if !(self.max_velocity > 0.0 && self.max_velocity.is_finite()) {
            return Err(format!(
                "max_velocity must be positive and finite, got {}",
                self.max_velocity
            ));
        }
        for (name, value) in [
            ("inertia", self.inertia),
            ("cognitive", self.cognitive),
            ("social", self.social),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(format!("{name} must be non-negative and finite, got {value}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PsoConfig::default();
        assert_eq!(config.particle_count, 50);
        assert_eq!(config.max_iterations, 2900);
        assert!((config.max_velocity - 6.0).abs() < 1e-12);
        assert!((config.inertia - 1.0).abs() < 1e-12);
        assert!((config.cognitive - 2.0).abs() < 1e-12);
        assert!((config.social - 2.0).abs() < 1e-12);
        assert_eq!(config.topology, Topology::Global);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_swarm() {
        assert!(PsoConfig::default().with_particle_count(0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_velocity() {
        assert!(PsoConfig::default().with_max_velocity(0.0).validate().is_err());
        assert!(PsoConfig::default()
            .with_max_velocity(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_negative_rates() {
        let config = PsoConfig::default().with_learning_rates(-1.0, 2.0);
        let err = config.validate().unwrap_err();
        assert!(err.contains("cognitive"));
    }
}
