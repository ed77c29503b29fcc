//! Immutable acquisition problem data.

use crate::error::{Result, SearchError};

/// An acquisition problem instance.
///
/// Materials are assigned to departments subject to per-department budgets
/// and per-category acquisition bounds. Every material belongs to exactly
/// one category.
///
/// Construct through [`ProblemBuilder`] or by parsing instance text
/// (`"...".parse::<Problem>()`). With the `serde` feature, a `Problem`
/// (de)serializes in builder form and deserialization is validated by
/// [`ProblemBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ProblemBuilder", into = "ProblemBuilder")
)]
pub struct Problem {
    material_count: usize,
    dept_count: usize,
    category_count: usize,
    budget: Vec<f64>,
    cost: Vec<f64>,
    category_of: Vec<usize>,
    category_lower: Vec<usize>,
    category_upper: Vec<usize>,
    /// Material-major, `material_count * dept_count` entries.
    preference: Vec<f64>,
    /// Materials of each category, in ascending index order.
    members: Vec<Vec<usize>>,
}

impl Problem {
    /// Number of materials (matrix rows).
    pub fn material_count(&self) -> usize {
        self.material_count
    }

    /// Number of departments (matrix columns).
    pub fn dept_count(&self) -> usize {
        self.dept_count
    }

    /// Number of categories.
    pub fn category_count(&self) -> usize {
        self.category_count
    }

    /// Total number of assignment cells.
    pub fn cell_count(&self) -> usize {
        self.material_count * self.dept_count
    }

    pub fn budget(&self, dept: usize) -> f64 {
        self.budget[dept]
    }

    pub fn budgets(&self) -> &[f64] {
        &self.budget
    }

    pub fn cost(&self, material: usize) -> f64 {
        self.cost[material]
    }

    pub fn preference(&self, material: usize, dept: usize) -> f64 {
        self.preference[material * self.dept_count + dept]
    }

    pub fn category_of(&self, material: usize) -> usize {
        self.category_of[material]
    }

    pub fn category_lower(&self, category: usize) -> usize {
        self.category_lower[category]
    }

    pub fn category_upper(&self, category: usize) -> usize {
        self.category_upper[category]
    }

    /// Materials belonging to `category`, in ascending order.
    pub fn materials_in_category(&self, category: usize) -> &[usize] {
        &self.members[category]
    }
}

/// Builder for [`Problem`].
///
/// # Examples
///
/// ```
/// use acq_metaheur::problem::ProblemBuilder;
///
/// let problem = ProblemBuilder::new(2, 2, 1)
///     .with_budget(vec![10.0, 10.0])
///     .with_cost(vec![4.0, 4.0])
///     .with_category_of(vec![0, 0])
///     .with_category_bounds(vec![2], vec![2])
///     .with_preference(vec![vec![1.0, 0.0], vec![0.0, 1.0]])
///     .build()
///     .unwrap();
/// assert_eq!(problem.cell_count(), 4);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProblemBuilder {
    material_count: usize,
    dept_count: usize,
    category_count: usize,
    budget: Vec<f64>,
    cost: Vec<f64>,
    category_of: Vec<usize>,
    category_lower: Vec<usize>,
    category_upper: Vec<usize>,
    preference: Vec<Vec<f64>>,
}

impl ProblemBuilder {
    pub fn new(material_count: usize, dept_count: usize, category_count: usize) -> Self {
        Self {
            material_count,
            dept_count,
            category_count,
            ..Self::default()
        }
    }

    pub fn with_budget(mut self, budget: Vec<f64>) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_cost(mut self, cost: Vec<f64>) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_category_of(mut self, category_of: Vec<usize>) -> Self {
        self.category_of = category_of;
        self
    }

    /// Sets the inclusive `[lower, upper]` acquisition bounds per category.
    pub fn with_category_bounds(mut self, lower: Vec<usize>, upper: Vec<usize>) -> Self {
        self.category_lower = lower;
        self.category_upper = upper;
        self
    }

    /// Sets the preference matrix, one row per material.
    pub fn with_preference(mut self, preference: Vec<Vec<f64>>) -> Self {
        self.preference = preference;
        self
    }

    /// Validates the data and builds the problem.
    pub fn build(self) -> Result<Problem> {
        let invalid = |msg: String| Err(SearchError::InvalidProblem(msg));

        if self.dept_count == 0 {
            return invalid("dept_count must be positive".into());
        }
        check_len("budget", self.budget.len(), self.dept_count)?;
        check_len("cost", self.cost.len(), self.material_count)?;
        check_len("category_of", self.category_of.len(), self.material_count)?;
        check_len("category_lower", self.category_lower.len(), self.category_count)?;
        check_len("category_upper", self.category_upper.len(), self.category_count)?;
        check_len("preference rows", self.preference.len(), self.material_count)?;

        if let Some(b) = self.budget.iter().find(|b| !b.is_finite() || **b < 0.0) {
            return invalid(format!("budget must be finite and non-negative, got {b}"));
        }
        if let Some(c) = self.cost.iter().find(|c| !c.is_finite() || **c < 0.0) {
            return invalid(format!("cost must be finite and non-negative, got {c}"));
        }

        let mut members = vec![Vec::new(); self.category_count];
        for (material, &category) in self.category_of.iter().enumerate() {
            if category >= self.category_count {
                return invalid(format!(
                    "material {material} belongs to category {category}, but only {} categories exist",
                    self.category_count
                ));
            }
            members[category].push(material);
        }

        let mut preference = Vec::with_capacity(self.material_count * self.dept_count);
        for (material, row) in self.preference.into_iter().enumerate() {
            if row.len() != self.dept_count {
                return invalid(format!(
                    "preference row {material} has {} values, expected {}",
                    row.len(),
                    self.dept_count
                ));
            }
            if let Some(p) = row.iter().find(|p| !p.is_finite() || **p < 0.0) {
                return invalid(format!(
                    "preference of material {material} must be finite and non-negative, got {p}"
                ));
            }
            preference.extend(row);
        }

        Ok(Problem {
            material_count: self.material_count,
            dept_count: self.dept_count,
            category_count: self.category_count,
            budget: self.budget,
            cost: self.cost,
            category_of: self.category_of,
            category_lower: self.category_lower,
            category_upper: self.category_upper,
            preference,
            members,
        })
    }
}

fn check_len(name: &str, actual: usize, expected: usize) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(SearchError::InvalidProblem(format!(
            "{name} has {actual} entries, expected {expected}"
        )))
    }
}

impl TryFrom<ProblemBuilder> for Problem {
    type Error = SearchError;

    fn try_from(builder: ProblemBuilder) -> Result<Self> {
        builder.build()
    }
}

impl From<Problem> for ProblemBuilder {
    fn from(problem: Problem) -> Self {
        let preference = problem
            .preference
            .chunks(problem.dept_count)
            .map(<[f64]>::to_vec)
            .collect();
        ProblemBuilder::new(problem.material_count, problem.dept_count, problem.category_count)
            .with_budget(problem.budget)
            .with_cost(problem.cost)
            .with_category_of(problem.category_of)
            .with_category_bounds(problem.category_lower, problem.category_upper)
            .with_preference(preference)
    }
}
