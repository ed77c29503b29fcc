//! Error types.

use thiserror::Error;

/// Errors raised while building a problem, validating a configuration,
/// or generating candidate solutions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// The problem data violates a structural invariant.
    #[error("invalid problem: {0}")]
    InvalidProblem(String),

    /// The instance text could not be parsed.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number in the instance text.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// A runner configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No feasible neighbor was found within the retry cap.
    #[error("no feasible neighbor found after {attempts} attempts")]
    SearchExhausted {
        /// Number of flips tried before giving up.
        attempts: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SearchError::SearchExhausted { attempts: 12 };
        assert_eq!(err.to_string(), "no feasible neighbor found after 12 attempts");

        let err = SearchError::Parse {
            line: 3,
            message: "expected 4 values".into(),
        };
        assert_eq!(err.to_string(), "parse error on line 3: expected 4 values");
    }
}
