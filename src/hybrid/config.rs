//! Hybrid configuration.

use crate::pso::PsoConfig;
use crate::sa::SaConfig;

/// Configuration for the PSO/SA hybrid.
///
/// Before every swarm iteration the mean absolute velocity of each particle
/// is compared with `convergence_velocity`. When more than
/// `convergence_ratio` of the particles exceed it, the swarm counts as
/// converged: the global best is refined by Simulated Annealing under `sa`
/// and the swarm is restarted around it.
///
/// Randomness comes from `pso.seed`; `sa.seed` is ignored.
///
/// # Examples
///
/// ```
/// use acq_metaheur::hybrid::HybridConfig;
///
/// let config = HybridConfig::default()
///     .with_max_iterations(200)
///     .with_convergence(5.5, 0.9)
///     .with_seed(3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HybridConfig {
    /// Swarm parameters, including the iteration budget.
    pub pso: PsoConfig,

    /// Schedule of each intensification run.
    pub sa: SaConfig,

    /// Mean absolute velocity above which a particle counts as saturated.
    pub convergence_velocity: f64,

    /// Fraction of saturated particles that must be exceeded.
    pub convergence_ratio: f64,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            pso: PsoConfig::default().with_max_iterations(1850),
            sa: SaConfig::intensification(),
            convergence_velocity: 5.9,
            convergence_ratio: 0.95,
        }
    }
}

impl HybridConfig {
    pub fn with_pso(mut self, pso: PsoConfig) -> Self {
        self.pso = pso;
        self
    }

    pub fn with_sa(mut self, sa: SaConfig) -> Self {
        self.sa = sa;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.pso.max_iterations = n;
        self
    }

    /// Sets the saturation velocity and the fraction of particles that
    /// must exceed it.
    pub fn with_convergence(mut self, velocity: f64, ratio: f64) -> Self {
        self.convergence_velocity = velocity;
        self.convergence_ratio = ratio;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.pso.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.pso.validate().map_err(|e| format!("pso: {e}"))?;
        self.sa.validate().map_err(|e| format!("sa: {e}"))?;
        if !(self.convergence_velocity >= 0.0 && self.convergence_velocity.is_finite()) {
            return Err(format!(
                "convergence_velocity must be non-negative and finite, got {}",
                self.convergence_velocity
            ));
        }
        if !(0.0..=1.0).contains(&self.convergence_ratio) {
            return Err(format!(
                "convergence_ratio must be in [0, 1], got {}",
                self.convergence_ratio
            ));
        }
        Ok(())
    }
}
