//! PSO execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use tracing::info;

use super::config::PsoConfig;
use super::swarm::Swarm;
use crate::error::{Result, SearchError};
use crate::eval::Evaluator;
use crate::problem::Problem;
use crate::random::rng_from_seed;
use crate::solution::Solution;
use crate::termination::Termination;

/// Result of a PSO run.
#[derive(Debug, Clone)]
pub struct PsoResult {
    /// Best feasible solution found (all-zero if none was).
    pub best: Solution,
    /// Objective of `best`, `-inf` if no feasible position was seen.
    pub best_objective: f64,
    /// Swarm iterations executed.
    pub iterations: usize,
    /// Why the run stopped.
    pub termination: Termination,
    /// Global best objective after initialization and after each iteration.
    pub objective_history: Vec<f64>,
}

impl PsoResult {
    /// Returns `true` if any particle ever reached a feasible position.
    pub fn found_feasible(&self) -> bool {
        self.best_objective.is_finite()
    }
}

/// Executes binary PSO.
pub struct PsoRunner;

impl PsoRunner {
    /// Runs PSO on the given problem.
    pub fn run(problem: &Problem, config: &PsoConfig) -> Result<PsoResult> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs PSO with an optional cancellation token, checked once per
    /// swarm iteration.
    pub fn run_with_cancel(
        problem: &Problem,
        config: &PsoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<PsoResult> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(problem, config, &mut rng, cancel.as_deref())
    }

    /// Runs PSO drawing every random number from `rng`. `config.seed` is ignored.
    pub fn run_with_rng<R: Rng>(
        problem: &Problem,
        config: &PsoConfig,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<PsoResult> {
        config.validate().map_err(SearchError::InvalidConfig)?;
        let eval = Evaluator::new(problem);

        info!(
            event = "run_start",
            strategy = "pso",
            materials = problem.material_count(),
            depts = problem.dept_count(),
            particles = config.particle_count,
            topology = ?config.topology,
        );

        let mut swarm = Swarm::initialize(&eval, config, rng);
        let mut objective_history = Vec::with_capacity(config.max_iterations + 1);
        objective_history.push(swarm.best_objective);

        let mut iterations = 0usize;
        let mut termination = Termination::Completed;

        while iterations < config.max_iterations {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                termination = Termination::Cancelled;
                break;
            }
            swarm.step(&eval, config, rng);
            iterations += 1;
            objective_history.push(swarm.best_objective);
        }

        info!(
            event = "run_end",
            strategy = "pso",
            best_objective = swarm.best_objective,
            iterations,
            termination = ?termination,
        );

        Ok(PsoResult {
            best: swarm.best,
            best_objective: swarm.best_objective,
            iterations,
            termination,
            objective_history,
        })
    }
}
