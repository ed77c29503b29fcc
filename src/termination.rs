//! Why a search run stopped.

/// Reason a runner returned.
///
/// Every result carries the best solution seen so far regardless of the
/// termination reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// The configured budget (temperature floor or iteration count) was reached.
    Completed,
    /// The cancellation flag was raised.
    Cancelled,
    /// Neighbor generation gave up after `attempts` infeasible flips.
    Exhausted {
        /// Flips tried in the failing neighbor request.
        attempts: usize,
    },
}

impl Termination {
    /// Returns `true` if the run used its whole budget.
    pub fn is_completed(&self) -> bool {
        matches!(self, Termination::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_completed_is_completed() {
        assert!(Termination::Completed.is_completed());
        assert!(!Termination::Cancelled.is_completed());
        assert!(!Termination::Exhausted { attempts: 3 }.is_completed());
    }
}
