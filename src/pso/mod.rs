//! Binary Particle Swarm Optimization (PSO).
//!
//! Each particle carries a 0/1 position over the assignment matrix and a
//! real-valued velocity per cell. Velocities are pulled toward the
//! particle's personal best and the best personal best in its
//! [`Topology`](crate::topology::Topology) neighborhood; positions are
//! resampled cell by cell through a sigmoid of the velocity.
//!
//! Personal bests follow fitness (objective minus penalty) and may be
//! infeasible. The global best only ever holds feasible positions.
//!
//! # References
//!
//! - Kennedy, J. & Eberhart, R. C. (1997), "A discrete binary version of
//!   the particle swarm algorithm", *IEEE SMC* 5, 4104-4108.

mod config;
mod particle;
mod runner;
pub(crate) mod swarm;

pub use config::PsoConfig;
pub use particle::{Particle, Velocity};
pub use runner::{PsoResult, PsoRunner};
