//! Constructive start solutions and single-flip neighbors.

use rand::Rng;

use crate::error::{Result, SearchError};
use crate::eval::Evaluator;
use crate::solution::Solution;

/// Builds a random, likely-feasible solution category by category.
///
/// For each category, unacquired members are drawn at random and assigned
/// to a random department as long as the budget penalty stays zero. A
/// material gets `dept_count` department draws before it is abandoned.
/// Drawing stops once the category's lower bound is met or its pool is
/// empty.
///
/// Only budgets are checked while placing. A lower bound may be left unmet
/// when budgets are tight, so callers must still check feasibility.
pub fn random_feasible_solution<R: Rng>(eval: &Evaluator<'_>, rng: &mut R) -> Solution {
    let problem = eval.problem();
    let depts = problem.dept_count();
    let mut x = Solution::empty(problem.material_count(), depts);

    for category in 0..problem.category_count() {
        let mut pool = problem.materials_in_category(category).to_vec();
        let lower = problem.category_lower(category);
        let mut acquired = 0usize;

        while acquired < lower && !pool.is_empty() {
            let idx = rng.random_range(0..pool.len());
            let material = pool.remove(idx);

            for _ in 0..depts {
                let dept = rng.random_range(0..depts);
                x.set(material, dept, true);
                if eval.budget_penalty(&x) == 0.0 {
                    acquired += 1;
                    break;
                }
                x.set(material, dept, false);
            }
        }
    }
    x
}

/// Returns a feasible copy of `x` with exactly one cell flipped.
///
/// Cells are drawn uniformly; infeasible flips are undone and redrawn.
///
/// # Errors
/// [`SearchError::SearchExhausted`] once `max_attempts` draws all produced
/// infeasible solutions (or the matrix has no cells).
pub fn random_neighbor<R: Rng>(
    eval: &Evaluator<'_>,
    x: &Solution,
    max_attempts: usize,
    rng: &mut R,
) -> Result<Solution> {
    if x.is_empty() {
        return Err(SearchError::SearchExhausted { attempts: 0 });
    }

    let mut candidate = x.clone();
    for _ in 0..max_attempts {
        let material = rng.random_range(0..x.material_count());
        let dept = rng.random_range(0..x.dept_count());
        candidate.flip(material, dept);
        if eval.is_feasible(&candidate) {
            return Ok(candidate);
        }
        candidate.flip(material, dept);
    }
    Err(SearchError::SearchExhausted {
        attempts: max_attempts,
    })
}
