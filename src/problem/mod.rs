//! Problem model.
//!
//! A read-only description of an acquisition instance: material costs and
//! categories, department budgets, category acquisition bounds, and the
//! material-by-department preference matrix. A [`Problem`] can be shared
//! freely across sequential runs of different strategies.

mod model;
mod parse;

pub use model::{Problem, ProblemBuilder};
