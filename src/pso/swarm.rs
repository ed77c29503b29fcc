//! Swarm state and the per-iteration update steps shared by plain PSO and
//! the PSO/SA hybrid.

use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

use super::config::PsoConfig;
use super::particle::{Particle, Velocity};
use crate::eval::Evaluator;
use crate::neighborhood::random_feasible_solution;
use crate::solution::Solution;

/// Particles plus the best feasible solution seen by any of them.
///
/// `best_objective` is `-inf` until a feasible position has been seen; the
/// global best is only ever taken from feasible positions, while personal
/// bests follow fitness and may be infeasible.
#[derive(Debug, Clone)]
pub(crate) struct Swarm {
    pub particles: Vec<Particle>,
    pub best: Solution,
    pub best_objective: f64,
}

impl Swarm {
    /// Random feasible positions for every particle, then random velocities.
    pub fn initialize<R: Rng>(eval: &Evaluator<'_>, config: &PsoConfig, rng: &mut R) -> Self {
        let problem = eval.problem();
        let (materials, depts) = (problem.material_count(), problem.dept_count());
        let empty = Solution::empty(materials, depts);

        let particles = (0..config.particle_count)
            .map(|_| Particle {
                position: empty.clone(),
                velocity: Velocity::random(0, config.max_velocity, rng),
                best_position: empty.clone(),
                best_fitness: f64::NEG_INFINITY,
            })
            .collect();

        let mut swarm = Self {
            particles,
            best: empty,
            best_objective: f64::NEG_INFINITY,
        };
        swarm.initialize_positions(eval, rng);
        swarm.initialize_velocities(config, problem.cell_count(), rng);
        swarm
    }

    /// Gives every particle a fresh constructive position, resets its
    /// personal best to it, and offers feasible ones to the global best.
    pub fn initialize_positions<R: Rng>(&mut self, eval: &Evaluator<'_>, rng: &mut R) {
        for particle in &mut self.particles {
            particle.position = random_feasible_solution(eval, rng);
            particle.best_position = particle.position.clone();
            particle.best_fitness = eval.fitness(&particle.position);

            if eval.is_feasible(&particle.position) && particle.best_fitness > self.best_objective {
                self.best_objective = particle.best_fitness;
                self.best = particle.position.clone();
            }
        }
    }

    pub fn initialize_velocities<R: Rng>(&mut self, config: &PsoConfig, cells: usize, rng: &mut R) {
        for particle in &mut self.particles {
            particle.velocity = Velocity::random(cells, config.max_velocity, rng);
        }
    }

    /// One full iteration: personal bests, velocities, then positions.
    pub fn step<R: Rng>(&mut self, eval: &Evaluator<'_>, config: &PsoConfig, rng: &mut R) {
        self.update_personal_bests(eval, config.parallel);
        self.update_velocities(config, rng);
        self.update_positions(eval, rng);
    }

    /// Adopts the current position as personal best when its fitness is
    /// strictly higher, feasible or not.
    pub fn update_personal_bests(&mut self, eval: &Evaluator<'_>, parallel: bool) {
        let fitness: Vec<f64> = if parallel {
            self.particles
                .par_iter()
                .map(|p| eval.fitness(&p.position))
                .collect()
        } else {
            self.particles.iter().map(|p| eval.fitness(&p.position)).collect()
        };

        for (particle, fitness) in self.particles.iter_mut().zip(fitness) {
            if fitness > particle.best_fitness {
                particle.best_fitness = fitness;
                particle.best_position = particle.position.clone();
            }
        }
    }

    /// Index of the best personal best among `index`'s neighbors.
    ///
    /// Starts from `index` itself and moves to any neighbor that is not
    /// strictly worse, so on ties the later neighbor wins.
    pub fn best_neighbor(&self, config: &PsoConfig, index: usize) -> usize {
        let mut best = index;
        for k in config.topology.neighbors(self.particles.len(), index) {
            if !(self.particles[best].best_fitness > self.particles[k].best_fitness) {
                best = k;
            }
        }
        best
    }

    pub fn update_velocities<R: Rng>(&mut self, config: &PsoConfig, rng: &mut R) {
        for i in 0..self.particles.len() {
            let neighbor_best = self.particles[self.best_neighbor(config, i)].best_position.clone();
            let particle = &mut self.particles[i];
            let position = particle.position.cells();
            let personal = particle.best_position.cells();
            let social = neighbor_best.cells();

            for (cell, v) in particle.velocity.values_mut().iter_mut().enumerate() {
                let x = bit(position[cell]);
                let r1: f64 = rng.random_range(0.0..1.0);
                let r2: f64 = rng.random_range(0.0..1.0);
                let next = config.inertia * *v
                    + config.cognitive * r1 * (bit(personal[cell]) - x)
                    + config.social * r2 * (bit(social[cell]) - x);
                *v = next.clamp(-config.max_velocity, config.max_velocity);
            }
        }
    }

    /// Resamples every cell from its velocity and offers feasible positions
    /// to the global best.
    pub fn update_positions<R: Rng>(&mut self, eval: &Evaluator<'_>, rng: &mut R) {
        for particle in &mut self.particles {
            let velocity = particle.velocity.values();
            for (cell, x) in particle.position.cells_mut().iter_mut().enumerate() {
                *x = rng.random_range(0.0..1.0) < sigmoid(velocity[cell]);
            }

            if eval.is_feasible(&particle.position) {
                let objective = eval.objective(&particle.position);
                if objective > self.best_objective {
                    self.best_objective = objective;
                    self.best = particle.position.clone();
                    debug!(event = "new_best", strategy = "pso", objective);
                }
            }
        }
    }

    /// Restarts the swarm around `best` after an intensification.
    ///
    /// Positions are cleared, velocities and positions are redrawn as at
    /// startup (fresh positions may still raise the global best), and
    /// particle 0 is placed on the global best. The best objective is then
    /// recomputed from that solution, staying `-inf` if it is infeasible.
    pub fn diversify<R: Rng>(&mut self, eval: &Evaluator<'_>, config: &PsoConfig, rng: &mut R) {
        for particle in &mut self.particles {
            particle.position.clear();
        }
        self.initialize_velocities(config, eval.problem().cell_count(), rng);
        self.initialize_positions(eval, rng);

        if let Some(first) = self.particles.first_mut() {
            first.position = self.best.clone();
        }
        self.best_objective = if eval.is_feasible(&self.best) {
            eval.objective(&self.best)
        } else {
            f64::NEG_INFINITY
        };
    }

    /// Returns `true` when more than `ratio` of the particles have a mean
    /// absolute velocity above `threshold`.
    pub fn is_converged(&self, threshold: f64, ratio: f64) -> bool {
        let saturated = self
            .particles
            .iter()
            .filter(|p| p.velocity.mean_abs() > threshold)
            .count();
        saturated as f64 > self.particles.len() as f64 * ratio
    }
}

#[inline]
fn bit(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

#[inline]
fn sigmoid(v: f64) -> f64 {
    1.0 / (1.0 + (-v).exp())
}
