//! SA execution loop.

use super::config::SaConfig;
use crate::error::{Result, SearchError};
use crate::eval::Evaluator;
use crate::neighborhood::{random_feasible_solution, random_neighbor};
use crate::problem::Problem;
use crate::random::rng_from_seed;
use crate::solution::Solution;
use crate::termination::Termination;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, trace, warn};

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// The best feasible solution found (the start if none was).
    pub best: Solution,

    /// Objective of `best`, `-inf` if no feasible solution was seen.
    pub best_objective: f64,

    /// Total number of neighbor evaluations.
    pub iterations: usize,

    /// Temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including non-worsening ones).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Why the run stopped.
    pub termination: Termination,

    /// Best objective after each temperature level.
    pub objective_history: Vec<f64>,
}

impl SaResult {
    /// Returns `true` if the run ever held a feasible solution.
    pub fn found_feasible(&self) -> bool {
        self.best_objective.is_finite()
    }
}

/// Executes Simulated Annealing.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA from a random feasible start.
    pub fn run(problem: &Problem, config: &SaConfig) -> Result<SaResult> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs SA with an optional cancellation token, checked once per
    /// temperature level.
    pub fn run_with_cancel(
        problem: &Problem,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(problem, config, &mut rng, cancel.as_deref())
    }

    /// Runs SA drawing every random number from `rng`. `config.seed` is ignored.
    pub fn run_with_rng<R: Rng>(
        problem: &Problem,
        config: &SaConfig,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<SaResult> {
        config.validate().map_err(SearchError::InvalidConfig)?;
        let eval = Evaluator::new(problem);

        info!(
            event = "run_start",
            strategy = "sa",
            materials = problem.material_count(),
            depts = problem.dept_count(),
            initial_temperature = config.initial_temperature,
        );

        let start = random_feasible_solution(&eval, rng);
        let result = anneal(&eval, start, config, rng, cancel)?;

        info!(
            event = "run_end",
            strategy = "sa",
            best_objective = result.best_objective,
            iterations = result.iterations,
            accepted = result.accepted_moves,
            termination = ?result.termination,
        );
        Ok(result)
    }
}

/// Anneals from `start`. The configuration must already be validated.
///
/// `start` may be infeasible. It only becomes the best solution if it is
/// feasible; otherwise the best stays at `-inf` until the first accepted
/// (and therefore feasible) neighbor.
pub(crate) fn anneal<R: Rng>(
    eval: &Evaluator<'_>,
    start: Solution,
    config: &SaConfig,
    rng: &mut R,
    cancel: Option<&AtomicBool>,
) -> Result<SaResult> {
    let mut current_objective = eval.objective(&start);
    let mut current = start;
    let mut best = current.clone();
    let mut best_objective = if eval.is_feasible(&current) {
        current_objective
    } else {
        f64::NEG_INFINITY
    };

    let mut temperature = config.initial_temperature;
    let mut iterations = 0usize;
    let mut accepted_moves = 0usize;
    let mut improving_moves = 0usize;
    let mut termination = Termination::Completed;

    let mut objective_history = vec![best_objective];

    'cooling: while temperature > config.min_temperature {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            termination = Termination::Cancelled;
            break;
        }

        for _ in 0..config.iterations_per_temperature {
            let neighbor = match random_neighbor(eval, &current, config.max_neighbor_attempts, rng) {
                Ok(neighbor) => neighbor,
                Err(SearchError::SearchExhausted { attempts }) => {
                    warn!(event = "neighbor_exhausted", strategy = "sa", attempts, temperature);
                    termination = Termination::Exhausted { attempts };
                    break 'cooling;
                }
                Err(err) => return Err(err),
            };
            iterations += 1;

            let neighbor_objective = eval.objective(&neighbor);
            let delta = neighbor_objective - current_objective;

            // The delta is scaled before dividing by T: objectives are small.
            let accept = delta >= 0.0
                || rng.random_range(0.0..1.0) < (delta * config.acceptance_scale / temperature).exp();

            if accept {
                accepted_moves += 1;
                if delta > 0.0 {
                    improving_moves += 1;
                }
                current = neighbor;
                current_objective = neighbor_objective;

                if current_objective > best_objective {
                    best = current.clone();
                    best_objective = current_objective;
                    trace!(event = "new_best", strategy = "sa", objective = best_objective, temperature);
                }
            }
        }

        objective_history.push(best_objective);
        temperature *= config.cooling_ratio;
    }

    Ok(SaResult {
        best,
        best_objective,
        iterations,
        final_temperature: temperature,
        accepted_moves,
        improving_moves,
        termination,
        objective_history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ProblemBuilder;
    use crate::random::create_rng;

    fn two_by_two() -> Problem {
        ProblemBuilder::new(2, 2, 1)
            .with_budget(vec![10.0, 10.0])
            .with_cost(vec![4.0, 4.0])
            .with_category_of(vec![0, 0])
            .with_category_bounds(vec![2], vec![2])
            .with_preference(vec![vec![1.0, 0.0], vec![0.0, 1.0]])
            .build()
            .unwrap()
    }

    fn library() -> Problem {
        ProblemBuilder::new(8, 3, 2)
            .with_budget(vec![14.0, 10.0, 12.0])
            .with_cost(vec![3.0, 4.0, 2.0, 5.0, 1.0, 6.0, 2.0, 3.0])
            .with_category_of(vec![0, 0, 0, 0, 1, 1, 1, 1])
            .with_category_bounds(vec![1, 2], vec![3, 4])
            .with_preference(vec![
                vec![0.8, 0.1, 0.3],
                vec![0.2, 0.9, 0.4],
                vec![0.5, 0.5, 0.5],
                vec![0.7, 0.0, 0.6],
                vec![0.1, 0.3, 0.9],
                vec![0.4, 0.8, 0.2],
                vec![0.6, 0.6, 0.1],
                vec![0.3, 0.2, 0.7],
            ])
            .build()
            .unwrap()
    }

    fn quick() -> SaConfig {
        SaConfig::default()
            .with_initial_temperature(5.0)
            .with_min_temperature(0.01)
            .with_iterations_per_temperature(50)
            .with_seed(42)
    }

    #[test]
    fn test_sa_two_by_two_finds_feasible() {
        let problem = two_by_two();
        let result = SaRunner::run(&problem, &quick()).unwrap();
        let eval = Evaluator::new(&problem);

        assert_eq!(eval.penalty(&result.best), 0.0);
        assert!(result.best_objective > 0.0);
        assert!((result.best_objective - eval.objective(&result.best)).abs() < 1e-12);
        assert_eq!(result.termination, Termination::Completed);
    }

    #[test]
    fn test_sa_library_improves_on_start() {
        let problem = library();
        let eval = Evaluator::new(&problem);
        let result = SaRunner::run(&problem, &quick()).unwrap();

        assert!(eval.is_feasible(&result.best));
        assert!(result.best_objective >= result.objective_history[0]);
        assert!(result.improving_moves > 0);
        assert!(result.final_temperature <= 0.01);
    }

    #[test]
    fn test_sa_objective_history_non_decreasing() {
        let problem = library();
        let result = SaRunner::run(&problem, &quick()).unwrap();

        for window in result.objective_history.windows(2) {
            assert!(
                window[1] >= window[0],
                "best objective history should be non-decreasing: {} < {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_sa_same_seed_same_result() {
        let problem = library();
        let a = SaRunner::run(&problem, &quick()).unwrap();
        let b = SaRunner::run(&problem, &quick()).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.accepted_moves, b.accepted_moves);
    }

    #[test]
    fn test_sa_injected_rng() {
        let problem = library();
        let mut rng = create_rng(9);
        let result = SaRunner::run_with_rng(&problem, &quick(), &mut rng, None).unwrap();
        assert!(result.iterations > 0);
    }

    #[test]
    fn test_sa_cancellation() {
        let problem = library();
        // Raised before the run: the first level check stops it.
        let cancel = Arc::new(AtomicBool::new(true));
        let result = SaRunner::run_with_cancel(&problem, &quick(), Some(cancel)).unwrap();

        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_sa_exhaustion_keeps_best() {
        // The only feasible solutions are the two one-to-one assignments,
        // and no single flip connects them.
        let problem = ProblemBuilder::new(2, 2, 1)
            .with_budget(vec![4.0, 4.0])
            .with_cost(vec![4.0, 4.0])
            .with_category_of(vec![0, 0])
            .with_category_bounds(vec![2], vec![2])
            .with_preference(vec![vec![1.0, 1.0], vec![1.0, 1.0]])
            .build()
            .unwrap();
        let config = quick().with_max_neighbor_attempts(100);
        let result = SaRunner::run(&problem, &config).unwrap();
        let eval = Evaluator::new(&problem);

        assert_eq!(result.termination, Termination::Exhausted { attempts: 100 });
        assert!(result.iterations <= 1);
        assert!(eval.is_feasible(&result.best));
        assert!((result.best_objective - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unmet_lower_bound_start_is_not_reported() {
        // Material 0 fills the budget first, so category 1 can never be
        // met and the start misses its lower bound.
        let problem = ProblemBuilder::new(2, 1, 2)
            .with_budget(vec![4.0])
            .with_cost(vec![3.0, 3.0])
            .with_category_of(vec![0, 1])
            .with_category_bounds(vec![1, 1], vec![1, 1])
            .with_preference(vec![vec![1.0], vec![1.0]])
            .build()
            .unwrap();
        let config = quick().with_max_neighbor_attempts(50);
        let result = SaRunner::run(&problem, &config).unwrap();

        assert!(!result.found_feasible());
        assert_eq!(result.best_objective, f64::NEG_INFINITY);
        assert_eq!(result.termination, Termination::Exhausted { attempts: 50 });
    }

    #[test]
    fn test_anneal_leaves_infeasible_start_for_feasible_neighbor() {
        // Both materials together overspend the budget but score higher
        // than either one alone.
        let problem = ProblemBuilder::new(2, 1, 1)
            .with_budget(vec![10.0])
            .with_cost(vec![6.0, 6.0])
            .with_category_of(vec![0, 0])
            .with_category_bounds(vec![1], vec![2])
            .with_preference(vec![vec![1.0], vec![1.0]])
            .build()
            .unwrap();
        let eval = Evaluator::new(&problem);
        let start = Solution::from_rows(&[vec![1], vec![1]]);
        assert!(!eval.is_feasible(&start));
        assert!((eval.objective(&start) - 1.1).abs() < 1e-12);

        // Hot enough that the worsening first move is accepted almost surely.
        let config = SaConfig::default()
            .with_initial_temperature(1000.0)
            .with_min_temperature(1.0)
            .with_iterations_per_temperature(20)
            .with_max_neighbor_attempts(50);
        let mut rng = create_rng(3);
        let result = anneal(&eval, start, &config, &mut rng, None).unwrap();

        assert!(result.found_feasible());
        assert!(eval.is_feasible(&result.best));
        assert!((result.best_objective - 0.8).abs() < 1e-12);
        assert_eq!(result.objective_history[0], f64::NEG_INFINITY);
    }

    #[test]
    fn test_sa_invalid_config() {
        let problem = two_by_two();
        let config = SaConfig::default().with_cooling_ratio(2.0);
        let err = SaRunner::run(&problem, &config).unwrap_err();
        assert!(matches!(err, SearchError::InvalidConfig(_)));
    }
}
