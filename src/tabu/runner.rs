//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Build a random start solution
//! 2. At each iteration:
//!    a. Score every non-tabu single-cell flip; infeasible flips score `-inf`
//!    b. Apply the best-scoring flip even if it worsens the current solution
//!       (ties go to the lowest cell index) and make its cell tabu
//!    c. Update the global best; on improvement the iteration counter
//!       restarts from zero
//! 3. Terminate after `max_iterations` consecutive non-improving iterations
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use super::config::TabuConfig;
use super::list::TabuList;
use crate::error::{Result, SearchError};
use crate::eval::Evaluator;
use crate::neighborhood::random_feasible_solution;
use crate::problem::Problem;
use crate::random::rng_from_seed;
use crate::solution::Solution;
use crate::termination::Termination;

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuResult {
    /// Best feasible solution found (the start if none was).
    pub best: Solution,
    /// Objective of `best`, `-inf` if no feasible solution was seen.
    pub best_objective: f64,
    /// Total iterations executed.
    pub iterations: usize,
    /// Flips applied (iterations with no admissible flip apply none).
    pub moves: usize,
    /// Iteration at which the best solution was found (0 = start solution).
    pub best_iteration: usize,
    /// Why the run stopped.
    pub termination: Termination,
    /// Best objective after each iteration, starting with the start solution.
    pub objective_history: Vec<f64>,
}

impl TabuResult {
    /// Returns `true` if the run ever held a feasible solution.
    pub fn found_feasible(&self) -> bool {
        self.best_objective.is_finite()
    }
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Executes Tabu Search on the given problem.
    pub fn run(problem: &Problem, config: &TabuConfig) -> Result<TabuResult> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Executes Tabu Search with an optional cancellation token, checked
    /// once per iteration.
    pub fn run_with_cancel(
        problem: &Problem,
        config: &TabuConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TabuResult> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(problem, config, &mut rng, cancel.as_deref())
    }

    /// Executes Tabu Search using `rng` for the start solution.
    pub fn run_with_rng<R: Rng>(
        problem: &Problem,
        config: &TabuConfig,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<TabuResult> {
        config.validate().map_err(SearchError::InvalidConfig)?;
        let eval = Evaluator::new(problem);

        info!(
            event = "run_start",
            strategy = "tabu",
            materials = problem.material_count(),
            depts = problem.dept_count(),
            tabu_capacity = config.tabu_capacity,
        );

        let start = random_feasible_solution(&eval, rng);
        let mut tabu = TabuList::new(config.tabu_capacity);
        let result = search(&eval, start, &mut tabu, config, cancel);

        info!(
            event = "run_end",
            strategy = "tabu",
            best_objective = result.best_objective,
            iterations = result.iterations,
            moves = result.moves,
            termination = ?result.termination,
        );
        Ok(result)
    }
}

/// Runs the tabu loop from `start`.
///
/// An infeasible `start` is walked away from but never recorded as the
/// best: the best stays at `-inf` until the first admissible flip.
fn search(
    eval: &Evaluator<'_>,
    start: Solution,
    tabu: &mut TabuList,
    config: &TabuConfig,
    cancel: Option<&AtomicBool>,
) -> TabuResult {
    let mut current = start;
    // Only feasible solutions compete for the best.
    let mut current_objective = if eval.is_feasible(&current) {
        eval.objective(&current)
    } else {
        f64::NEG_INFINITY
    };
    let mut best = current.clone();
    let mut best_objective = current_objective;
    let mut best_iteration = 0;

    let mut objective_history = vec![best_objective];
    let mut iterations = 0usize;
    let mut moves = 0usize;
    let mut no_improve_count = 0usize;
    let mut termination = Termination::Completed;

    while no_improve_count < config.max_iterations {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            termination = Termination::Cancelled;
            break;
        }
        iterations += 1;

        if let Some((cell, objective)) = best_admissible_flip(eval, &current, tabu, config.parallel) {
            current.flip_index(cell);
            tabu.insert(cell);
            current_objective = objective;
            moves += 1;
        }

        if current_objective > best_objective {
            best = current.clone();
            best_objective = current_objective;
            best_iteration = iterations;
            no_improve_count = 0;
            debug!(event = "new_best", strategy = "tabu", objective = best_objective, iteration = iterations);
        } else {
            no_improve_count += 1;
        }

        objective_history.push(best_objective);
    }

    TabuResult {
        best,
        best_objective,
        iterations,
        moves,
        best_iteration,
        termination,
        objective_history,
    }
}

/// Finds the best non-tabu feasible flip of `current`.
///
/// Returns the flattened cell index and the objective after the flip, or
/// `None` when every non-tabu flip is infeasible. Ties keep the lowest index.
fn best_admissible_flip(
    eval: &Evaluator<'_>,
    current: &Solution,
    tabu: &TabuList,
    parallel: bool,
) -> Option<(usize, f64)> {
    let score = |cell: usize| -> f64 {
        if tabu.is_tabu(cell) {
            return f64::NEG_INFINITY;
        }
        let mut candidate = current.clone();
        candidate.flip_index(cell);
        if eval.is_feasible(&candidate) {
            eval.objective(&candidate)
        } else {
            f64::NEG_INFINITY
        }
    };

    let scores: Vec<f64> = if parallel {
        (0..current.len()).into_par_iter().map(score).collect()
    } else {
        (0..current.len()).map(score).collect()
    };

    let mut best: Option<(usize, f64)> = None;
    let mut best_value = f64::NEG_INFINITY;
    for (cell, value) in scores.into_iter().enumerate() {
        if value > best_value {
            best_value = value;
            best = Some((cell, value));
        }
    }
    best
}
