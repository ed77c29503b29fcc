//! Metaheuristic search for budget-constrained material acquisition.
//!
//! A [`Problem`](problem::Problem) describes materials, departments with
//! budgets, and material categories with acquisition bounds. A
//! [`Solution`](solution::Solution) is a binary material-by-department
//! matrix: a set cell means the department co-funds the material, and its
//! cost is split between the funding departments in proportion to their
//! preference.
//!
//! Solutions are scored by [`Evaluator`](eval::Evaluator), which blends
//! average preference satisfaction with budget execution and charges a
//! penalty for overspent budgets and unmet category bounds.
//!
//! Search strategies:
//!
//! - **Simulated Annealing (SA)**: single trajectory over feasible
//!   single-flip neighbors with geometric cooling.
//! - **Tabu Search (TS)**: deterministic best non-tabu flip with a
//!   fixed-capacity recency list.
//! - **Particle Swarm Optimization (PSO)**: binary swarm with sigmoid
//!   position sampling over a [`Topology`](topology::Topology).
//! - **PSO/SA hybrid**: PSO that refines its global best with SA whenever
//!   the swarm's velocities saturate, then restarts the swarm.
//!
//! # Example
//!
//! ```
//! use acq_metaheur::problem::Problem;
//! use acq_metaheur::tabu::{TabuConfig, TabuRunner};
//!
//! let problem: Problem = "\
//! 3 2 1
//! 0 0 0
//! 4 6 2
//! 10 8
//! 1
//! 3
//! 0.9 0.1
//! 0.2 0.8
//! 0.5 0.5"
//!     .parse()
//!     .unwrap();
//!
//! let config = TabuConfig::default().with_max_iterations(20).with_seed(1);
//! let result = TabuRunner::run(&problem, &config).unwrap();
//! assert!(result.best_objective > 0.0);
//! ```
//!
//! Runners emit [`tracing`] events; install a subscriber to see them.

pub mod error;
pub mod eval;
pub mod hybrid;
pub mod neighborhood;
pub mod problem;
pub mod pso;
pub mod random;
pub mod sa;
pub mod solution;
pub mod tabu;
pub mod termination;
pub mod topology;

pub use error::{Result, SearchError};
pub use eval::{Evaluator, SolutionSummary};
pub use problem::Problem;
pub use solution::Solution;
pub use termination::Termination;
