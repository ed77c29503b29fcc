//! Hybrid execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info};

use super::config::HybridConfig;
use crate::error::{Result, SearchError};
use crate::eval::Evaluator;
use crate::problem::Problem;
use crate::pso::swarm::Swarm;
use crate::random::rng_from_seed;
use crate::sa::anneal;
use crate::solution::Solution;
use crate::termination::Termination;

/// Result of a hybrid run.
#[derive(Debug, Clone)]
pub struct HybridResult {
    /// Best feasible solution found (all-zero if none was).
    pub best: Solution,
    /// Objective of `best`, `-inf` if no feasible solution was seen.
    pub best_objective: f64,
    /// Swarm iterations executed.
    pub iterations: usize,
    /// Convergence events, each followed by one SA run and a restart.
    pub intensifications: usize,
    /// Why the run stopped.
    pub termination: Termination,
    /// Global best objective after initialization and after each iteration.
    pub objective_history: Vec<f64>,
}

impl HybridResult {
    /// Returns `true` if a feasible solution was ever found.
    pub fn found_feasible(&self) -> bool {
        self.best_objective.is_finite()
    }
}

/// Executes the PSO/SA hybrid.
pub struct HybridRunner;

impl HybridRunner {
    /// Runs the hybrid on the given problem.
    pub fn run(problem: &Problem, config: &HybridConfig) -> Result<HybridResult> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the hybrid with an optional cancellation token, checked once
    /// per swarm iteration and once per temperature level inside SA.
    pub fn run_with_cancel(
        problem: &Problem,
        config: &HybridConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<HybridResult> {
        let mut rng = rng_from_seed(config.pso.seed);
        Self::run_with_rng(problem, config, &mut rng, cancel.as_deref())
    }

    /// Runs the hybrid drawing every random number, swarm and SA alike,
    /// from `rng`.
    pub fn run_with_rng<R: Rng>(
        problem: &Problem,
        config: &HybridConfig,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<HybridResult> {
        config.validate().map_err(SearchError::InvalidConfig)?;
        let eval = Evaluator::new(problem);
        let pso = &config.pso;

        info!(
            event = "run_start",
            strategy = "hybrid",
            materials = problem.material_count(),
            depts = problem.dept_count(),
            particles = pso.particle_count,
            topology = ?pso.topology,
        );

        let mut swarm = Swarm::initialize(&eval, pso, rng);
        let mut objective_history = Vec::with_capacity(pso.max_iterations + 1);
        objective_history.push(swarm.best_objective);

        let mut iterations = 0usize;
        let mut intensifications = 0usize;
        let mut termination = Termination::Completed;

        while iterations < pso.max_iterations {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                termination = Termination::Cancelled;
                break;
            }

            if swarm.is_converged(config.convergence_velocity, config.convergence_ratio) {
                intensifications += 1;
                intensify(&eval, &mut swarm, config, rng, cancel, iterations)?;
            }

            swarm.step(&eval, pso, rng);
            iterations += 1;
            objective_history.push(swarm.best_objective);
        }

        info!(
            event = "run_end",
            strategy = "hybrid",
            best_objective = swarm.best_objective,
            iterations,
            intensifications,
            termination = ?termination,
        );

        Ok(HybridResult {
            best: swarm.best,
            best_objective: swarm.best_objective,
            iterations,
            intensifications,
            termination,
            objective_history,
        })
    }
}

/// Refines the global best with SA, then restarts the swarm around it.
fn intensify<R: Rng>(
    eval: &Evaluator<'_>,
    swarm: &mut Swarm,
    config: &HybridConfig,
    rng: &mut R,
    cancel: Option<&AtomicBool>,
    iteration: usize,
) -> Result<()> {
    debug!(
        event = "converged",
        strategy = "hybrid",
        iteration,
        best_objective = swarm.best_objective,
    );

    let refined = anneal(eval, swarm.best.clone(), &config.sa, rng, cancel)?;
    if let Termination::Exhausted { attempts } = refined.termination {
        debug!(event = "intensification_exhausted", strategy = "hybrid", attempts);
    }

    if eval.is_feasible(&refined.best) && refined.best_objective > swarm.best_objective {
        debug!(
            event = "new_best",
            strategy = "hybrid",
            objective = refined.best_objective,
            previous = swarm.best_objective,
        );
        swarm.best_objective = refined.best_objective;
        swarm.best = refined.best;
    }

    swarm.diversify(eval, &config.pso, rng);
    debug!(event = "diversified", strategy = "hybrid", best_objective = swarm.best_objective);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ProblemBuilder;
    use crate::pso::PsoConfig;
    use crate::random::create_rng;
    use crate::sa::SaConfig;
    use crate::topology::Topology;

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

    fn quick_sa() -> SaConfig {
        SaConfig::intensification()
            .with_initial_temperature(2.0)
            .with_min_temperature(0.5)
            .with_iterations_per_temperature(20)
    }

    fn quick() -> HybridConfig {
        HybridConfig::default()
            .with_pso(PsoConfig::default().with_particle_count(10))
            .with_sa(quick_sa())
            .with_max_iterations(30)
            .with_seed(42)
    }

    #[test]
    fn test_hybrid_finds_feasible() {
        let problem = library();
        let eval = Evaluator::new(&problem);
        let result = HybridRunner::run(&problem, &quick()).unwrap();

        assert!(result.found_feasible());
        assert!(eval.is_feasible(&result.best));
        assert!((result.best_objective - eval.objective(&result.best)).abs() < 1e-12);
        assert_eq!(result.iterations, 30);
        assert_eq!(result.termination, Termination::Completed);
    }

    #[test]
    fn test_forced_convergence_intensifies_every_iteration() {
        // Any velocity saturates at threshold 0 and ratio 0.
        let problem = library();
        let config = quick().with_convergence(0.0, 0.0);
        let result = HybridRunner::run(&problem, &config).unwrap();

        assert_eq!(result.intensifications, result.iterations);
        assert!(result.found_feasible());
    }

    #[test]
    fn test_default_threshold_rarely_converges_early() {
        // Fresh velocities average |v| near 3, far from 5.9.
        let problem = library();
        let config = quick().with_max_iterations(1);
        let result = HybridRunner::run(&problem, &config).unwrap();
        assert_eq!(result.intensifications, 0);
    }

    #[test]
    fn test_hybrid_objective_history_non_decreasing() {
        let problem = library();
        let config = quick()
            .with_convergence(0.0, 0.0)
            .with_pso(
                PsoConfig::default()
                    .with_particle_count(10)
                    .with_max_iterations(30)
                    .with_topology(Topology::Ring)
                    .with_seed(7),
            );
        let result = HybridRunner::run(&problem, &config).unwrap();

        assert_eq!(result.objective_history.len(), result.iterations + 1);
        for window in result.objective_history.windows(2) {
            assert!(window[1] >= window[0]);
        }
    }

    #[test]
    fn test_hybrid_same_seed_same_result() {
        let problem = library();
        let config = quick().with_convergence(0.0, 0.0);
        let a = HybridRunner::run(&problem, &config).unwrap();
        let b = HybridRunner::run(&problem, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.objective_history, b.objective_history);
    }

    #[test]
    fn test_intensify_places_best_on_first_particle() {
        let problem = library();
        let eval = Evaluator::new(&problem);
        let config = quick();
        let mut rng = create_rng(5);
        let mut swarm = Swarm::initialize(&eval, &config.pso, &mut rng);
        let before = swarm.best_objective;

        intensify(&eval, &mut swarm, &config, &mut rng, None, 0).unwrap();

        assert!(swarm.best_objective >= before);
        assert_eq!(swarm.particles[0].position, swarm.best);
        assert!(eval.is_feasible(&swarm.best));
    }

    #[test]
    fn test_swarm_continues_after_sa_exhaustion() {
        // From the diagonal every single flip breaks a budget or the bound,
        // so each intensification runs out of neighbors immediately.
        let problem = ProblemBuilder::new(2, 2, 1)
            .with_budget(vec![4.0, 4.0])
            .with_cost(vec![4.0, 4.0])
            .with_category_of(vec![0, 0])
            .with_category_bounds(vec![2], vec![2])
            .with_preference(vec![vec![1.0, 1.0], vec![1.0, 1.0]])
            .build()
            .unwrap();
        let config = quick()
            .with_sa(quick_sa().with_max_neighbor_attempts(20))
            .with_convergence(0.0, 0.0)
            .with_max_iterations(10);
        let result = HybridRunner::run(&problem, &config).unwrap();

        assert_eq!(result.iterations, 10);
        assert_eq!(result.intensifications, 10);
        assert_eq!(result.termination, Termination::Completed);
        assert!(result.found_feasible());
        assert!((result.best_objective - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hybrid_cancellation() {
        let problem = library();
        let cancel = Arc::new(AtomicBool::new(true));
        let result = HybridRunner::run_with_cancel(&problem, &quick(), Some(cancel)).unwrap();
        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.intensifications, 0);
    }

    #[test]
    fn test_hybrid_invalid_config() {
        let problem = library();
        let config = quick().with_convergence(1.0, 2.0);
        let err = HybridRunner::run(&problem, &config).unwrap_err();
        assert!(matches!(err, SearchError::InvalidConfig(_)));
    }
}
