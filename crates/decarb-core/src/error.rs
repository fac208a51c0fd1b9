//! Unified error type for the decarb workspace
//!
//! [`DecarbError`] covers everything that can go wrong between receiving a
//! payload and producing a decision report. The optimizer boundary converts
//! it into an `{"error": ...}` outcome instead of propagating it.

use thiserror::Error;

/// Errors raised while validating input or solving a selection problem.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecarbError {
    /// Malformed or empty project list, or a missing constraint object.
    ///
    /// Displayed without a prefix; the message is user-facing as is.
    #[error("{0}")]
    Validation(String),

    /// A constraint value that is present but cannot become a number
    #[error("could not convert {field} value {value} to a number")]
    InvalidConstraint { field: &'static str, value: String },

    /// Solver backend construction or invocation failed
    #[error("Solver error: {0}")]
    Solver(String),
}

/// Convenience type alias for Results using DecarbError.
pub type DecarbResult<T> = Result<T, DecarbError>;

impl DecarbError {
    pub fn validation(message: impl Into<String>) -> Self {
        DecarbError::Validation(message.into())
    }

    pub fn solver(message: impl Into<String>) -> Self {
        DecarbError::Solver(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_has_no_prefix() {
        let err = DecarbError::validation("Invalid projects data");
        assert_eq!(err.to_string(), "Invalid projects data");
    }

    #[test]
    fn test_solver_display() {
        let err = DecarbError::solver("backend crashed");
        assert!(err.to_string().contains("Solver error"));
        assert!(err.to_string().contains("backend crashed"));
    }

    #[test]
    fn test_invalid_constraint_display() {
        let err = DecarbError::InvalidConstraint {
            field: "carbonEmission",
            value: "\"lots\"".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "could not convert carbonEmission value \"lots\" to a number"
        );
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> DecarbResult<()> {
            Err(DecarbError::validation("test"))
        }

        fn outer() -> DecarbResult<()> {
            inner()?;
            Ok(())
        }

        assert!(matches!(outer(), Err(DecarbError::Validation(_))));
    }
}
