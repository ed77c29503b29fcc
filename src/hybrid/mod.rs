//! PSO/SA hybrid.
//!
//! Runs the binary swarm of [`crate::pso`] and watches its velocities.
//! Once nearly every particle's velocity has saturated, the swarm has
//! stopped exploring: the global best is handed to a short Simulated
//! Annealing run for local refinement, and the swarm is re-seeded from
//! scratch with particle 0 placed on the refined best.

mod config;
mod runner;

pub use config::HybridConfig;
pub use runner::{HybridResult, HybridRunner};
