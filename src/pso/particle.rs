//! Particle state.

use rand::Rng;

use crate::solution::Solution;

/// Per-cell tendency to flip toward 1, in `[-max_velocity, max_velocity]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Velocity {
    values: Vec<f64>,
}

impl Velocity {
    /// Draws every cell uniformly from `[-max_velocity, max_velocity)`.
    pub fn random<R: Rng>(cells: usize, max_velocity: f64, rng: &mut R) -> Self {
        let values = (0..cells)
            .map(|_| rng.random_range(0.0..1.0) * (2.0 * max_velocity) - max_velocity)
            .collect();
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Mean absolute value over all cells (0 for an empty velocity).
    pub fn mean_abs(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().map(|v| v.abs()).sum::<f64>() / self.values.len() as f64
    }
}

/// One member of the swarm.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Current position.
    pub position: Solution,
    /// Current velocity.
    pub velocity: Velocity,
    /// Best position this particle has visited, by fitness.
    pub best_position: Solution,
    /// Fitness (`objective - penalty`) of `best_position`.
    pub best_fitness: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_random_velocity_in_bounds() {
        let mut rng = create_rng(42);
        let v = Velocity::random(500, 6.0, &mut rng);
        assert_eq!(v.values().len(), 500);
        assert!(v.values().iter().all(|x| (-6.0..=6.0).contains(x)));
        // Uniform on [-6, 6): mean magnitude near 3.
        assert!((v.mean_abs() - 3.0).abs() < 0.5);
    }

    #[test]
    fn test_mean_abs_empty() {
        let mut rng = create_rng(1);
        assert_eq!(Velocity::random(0, 6.0, &mut rng).mean_abs(), 0.0);
    }
}
