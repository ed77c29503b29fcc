//! Simulated Annealing (SA).
//!
//! A single-trajectory search over feasible single-flip neighbors.
//! Worsening moves are accepted with a probability that shrinks as the
//! temperature cools geometrically, which lets the search leave local
//! optima early and settle late.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

mod config;
mod runner;

pub use config::SaConfig;
pub use runner::{SaResult, SaRunner};

pub(crate) use runner::anneal;
