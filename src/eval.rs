//! Objective, penalty and fitness evaluation.
//!
//! All functions are pure in the problem and the solution.
//!
//! # Cost apportioning
//!
//! A material assigned to several departments has its cost split among them
//! in proportion to each department's preference for it, rounded up to a
//! whole unit:
//!
//! ```text
//! actual[m][d] = ceil(pref[m][d] / sum_{d' assigned} pref[m][d'] * cost[m])
//! ```
//!
//! A material whose assigned departments all have zero preference costs
//! nothing. Because apportioned costs are integral and penalty terms are
//! only computed for violated constraints, the penalty of a feasible
//! solution is exactly `0.0`.

use crate::problem::Problem;
use crate::solution::Solution;

/// Weight of the average preference in the objective; the budget execution
/// rate receives `1 - PREFERENCE_WEIGHT`.
pub const PREFERENCE_WEIGHT: f64 = 0.5;

/// Distance, in ulps of the nearest whole unit, within which an apportioned
/// cost counts as that unit instead of being rounded up.
const ROUNDING_ULPS: f64 = 4.0;

/// Evaluates solutions against a [`Problem`].
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    problem: &'a Problem,
}

/// Report-level breakdown of a solution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolutionSummary {
    pub objective: f64,
    pub penalty: f64,
    pub total_budget: f64,
    pub total_actual_cost: f64,
    pub average_preference: f64,
    pub budget_execution_rate: f64,
    /// Materials assigned to at least one department.
    pub acquired_materials: usize,
    pub actual_cost_by_dept: Vec<f64>,
    pub acquired_by_category: Vec<usize>,
}

impl<'a> Evaluator<'a> {
    pub fn new(problem: &'a Problem) -> Self {
        Self { problem }
    }

    pub fn problem(&self) -> &'a Problem {
        self.problem
    }

    /// `PREFERENCE_WEIGHT * average_preference + (1 - PREFERENCE_WEIGHT) * budget_execution_rate`.
    pub fn objective(&self, x: &Solution) -> f64 {
        PREFERENCE_WEIGHT * self.average_preference(x)
            + (1.0 - PREFERENCE_WEIGHT) * self.budget_execution_rate(x)
    }

    /// Sum of the budget and category penalties. Zero iff feasible.
    pub fn penalty(&self, x: &Solution) -> f64 {
        self.budget_penalty(x) + self.category_penalty(x)
    }

    /// `objective - penalty`.
    pub fn fitness(&self, x: &Solution) -> f64 {
        self.objective(x) - self.penalty(x)
    }

    pub fn is_feasible(&self, x: &Solution) -> bool {
        self.penalty(x) == 0.0
    }

    /// Per-department mean preference of assigned materials, summed and
    /// divided by the department count. Departments with nothing assigned
    /// contribute zero.
    pub fn average_preference(&self, x: &Solution) -> f64 {
        let p = self.problem;
        let mut total = 0.0;
        for dept in 0..p.dept_count() {
            let mut count = 0usize;
            let mut pref = 0.0;
            for material in 0..p.material_count() {
                if x.get(material, dept) {
                    count += 1;
                    pref += p.preference(material, dept);
                }
            }
            if count > 0 {
                total += pref / count as f64;
            }
        }
        total / p.dept_count() as f64
    }

    /// Total apportioned cost divided by total budget (0 for a zero budget).
    pub fn budget_execution_rate(&self, x: &Solution) -> f64 {
        let total_budget = self.total_budget();
        if total_budget == 0.0 {
            0.0
        } else {
            self.total_actual_cost(x) / total_budget
        }
    }

    pub fn total_budget(&self) -> f64 {
        self.problem.budgets().iter().sum()
    }

    /// Apportioned cost of every cell, material-major.
    pub fn actual_costs(&self, x: &Solution) -> Vec<f64> {
        let p = self.problem;
        let depts = p.dept_count();
        let mut out = vec![0.0; p.cell_count()];

        for material in 0..p.material_count() {
            let total_pref: f64 = (0..depts)
                .filter(|&d| x.get(material, d))
                .map(|d| p.preference(material, d))
                .sum();
            if total_pref == 0.0 {
                continue;
            }
            for dept in (0..depts).filter(|&d| x.get(material, d)) {
                let raw = p.preference(material, dept) / total_pref * p.cost(material);
                out[material * depts + dept] = ceil_cost(raw);
            }
        }
        out
    }

    pub fn actual_cost_by_dept(&self, x: &Solution) -> Vec<f64> {
        let depts = self.problem.dept_count();
        let mut by_dept = vec![0.0; depts];
        for (idx, cost) in self.actual_costs(x).into_iter().enumerate() {
            by_dept[idx % depts] += cost;
        }
        by_dept
    }

    pub fn total_actual_cost(&self, x: &Solution) -> f64 {
        self.actual_costs(x).iter().sum()
    }

    /// Acquired material count per category. A material counts once no
    /// matter how many departments it is assigned to.
    pub fn acquired_count_by_category(&self, x: &Solution) -> Vec<usize> {
        let p = self.problem;
        let mut counts = vec![0usize; p.category_count()];
        for material in (0..p.material_count()).filter(|&m| x.is_acquired(m)) {
            counts[p.category_of(material)] += 1;
        }
        counts
    }

    pub fn acquired_material_count(&self, x: &Solution) -> usize {
        (0..self.problem.material_count())
            .filter(|&m| x.is_acquired(m))
            .count()
    }

    /// Sum over departments of the relative overspend `(cost - budget) / budget`.
    ///
    /// A zero-budget department uses a denominator of 1, so its penalty is
    /// the raw overspend.
    pub fn budget_penalty(&self, x: &Solution) -> f64 {
        let mut penalty = 0.0;
        for (dept, actual) in self.actual_cost_by_dept(x).into_iter().enumerate() {
            let budget = self.problem.budget(dept);
            if actual > budget {
                let denom = if budget > 0.0 { budget } else { 1.0 };
                penalty += (actual - budget) / denom;
            }
        }
        penalty
    }

    /// Sum over categories of the normalized bound violation.
    ///
    /// For `n` acquired with bounds `[lo, hi]`: above the bound adds
    /// `(n - hi) / |n - lo|`, below it adds `(lo - n) / |hi - n|`. A zero
    /// denominator (only possible when `lo > hi`) is replaced by 1.
    pub fn category_penalty(&self, x: &Solution) -> f64 {
        let p = self.problem;
        let mut penalty = 0.0;
        for (k, n) in self.acquired_count_by_category(x).into_iter().enumerate() {
            let lo = p.category_lower(k);
            let hi = p.category_upper(k);
            if n > hi {
                penalty += (n - hi) as f64 / nonzero(n.abs_diff(lo));
            }
            if n < lo {
                penalty += (lo - n) as f64 / nonzero(hi.abs_diff(n));
            }
        }
        penalty
    }

    /// Report-level breakdown of `x`.
    pub fn summary(&self, x: &Solution) -> SolutionSummary {
        let actual_cost_by_dept = self.actual_cost_by_dept(x);
        SolutionSummary {
            objective: self.objective(x),
            penalty: self.penalty(x),
            total_budget: self.total_budget(),
            total_actual_cost: actual_cost_by_dept.iter().sum(),
            average_preference: self.average_preference(x),
            budget_execution_rate: self.budget_execution_rate(x),
            acquired_materials: self.acquired_material_count(x),
            actual_cost_by_dept,
            acquired_by_category: self.acquired_count_by_category(x),
        }
    }
}

#[inline]
/// Rounds an apportioned cost up to a whole unit. Values within a few ulps
/// of an integer are float noise from the preference share and snap to it.
fn ceil_cost(raw: f64) -> f64 {
    let nearest = raw.round();
    let noise = ROUNDING_ULPS * f64::EPSILON * nearest.abs().max(1.0);
    let rounded = if (raw - nearest).abs() <= noise {
        nearest
    } else {
        raw.ceil()
    };
    rounded.max(0.0)
}

fn nonzero(d: usize) -> f64 {
    if d == 0 {
        1.0
    } else {
        d as f64
    }
}
