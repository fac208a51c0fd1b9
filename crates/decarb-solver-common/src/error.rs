//! Error types for solver backends.

use thiserror::Error;

/// Errors that can occur while building or running a solver backend.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverError {
    /// Unknown solver ID.
    #[error("Unknown solver: {0}")]
    UnknownSolver(String),

    /// Solver exists but was not compiled into this build.
    #[error("Solver {0} is not available in this build (enable its cargo feature)")]
    NotAvailable(crate::SolverId),

    /// Program exceeds what the backend is willing to attempt.
    #[error("Problem has {variables} variables; {backend} accepts at most {limit}")]
    ProblemTooLarge {
        backend: &'static str,
        variables: usize,
        limit: usize,
    },

    /// A coefficient vector does not match the number of variables.
    #[error("{context} has {found} coefficients, expected {expected}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    /// The underlying engine reported a failure.
    #[error("{0}")]
    Backend(String),

    /// The backend panicked.
    #[error("solver panicked: {0}")]
    Panicked(String),
}

/// Result type alias for solver operations.
pub type SolverResult<T> = Result<T, SolverError>;
