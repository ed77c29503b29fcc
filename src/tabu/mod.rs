//! Tabu Search (TS).
//!
//! A deterministic single-trajectory search. Every iteration applies the
//! best feasible single-cell flip whose cell is not in the tabu list,
//! whether or not it improves, and the flipped cell becomes tabu for the
//! next `tabu_capacity` moves.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod list;
mod runner;

pub use config::TabuConfig;
pub use list::TabuList;
pub use runner::{TabuResult, TabuRunner};
