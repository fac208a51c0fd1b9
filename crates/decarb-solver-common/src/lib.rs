//! Common types shared between the project selection formulation and the
//! solver backends that consume it.
//!
//! The formulation side builds a [`BinaryProgram`]; a backend returns a
//! [`RawSolution`]. Neither side needs to know about the other, so backends
//! can be swapped without touching the formulation.
//!
//! ```text
//! formulation ──BinaryProgram──> backend (good_lp engine / exhaustive search)
//!             <──RawSolution────
//! ```
//!
//! # Supported Backends
//!
//! | Backend    | Method | Availability |
//! |------------|--------|--------------|
//! | microlp    | LP-based branch-and-bound (pure Rust) | default build |
//! | HiGHS      | Dual simplex + branch-and-cut | `solver-highs` feature |
//! | CBC        | COIN-OR Branch & Cut | `solver-coin_cbc` feature |
//! | exhaustive | Depth-first enumeration with bounding | always |

pub mod control;
pub mod error;
pub mod problem;
pub mod solution;

pub use control::SolveControl;
pub use error::{SolverError, SolverResult};
pub use problem::{BinaryProgram, ConstraintSense, LinearConstraint};
pub use solution::{RawSolution, SolutionStatus};

/// Solver backends a selection problem can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverId {
    /// microlp - pure-Rust simplex with branch-and-bound for integer variables.
    Microlp,

    /// HiGHS - high-performance LP/MIP solver (native library).
    Highs,

    /// CBC - COIN-OR Branch and Cut (native library).
    Cbc,

    /// Exhaustive depth-first search over all selections.
    ///
    /// Exact and dependency-free, but exponential in the number of projects,
    /// so it is limited to small candidate lists.
    Exhaustive,
}

impl SolverId {
    /// Get the name used in configuration files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverId::Microlp => "microlp",
            SolverId::Highs => "highs",
            SolverId::Cbc => "cbc",
            SolverId::Exhaustive => "exhaustive",
        }
    }

    /// Get the display name for this solver.
    pub fn display_name(&self) -> &'static str {
        match self {
            SolverId::Microlp => "microlp",
            SolverId::Highs => "HiGHS",
            SolverId::Cbc => "CBC",
            SolverId::Exhaustive => "Exhaustive search",
        }
    }

    /// Get a description of what this solver does.
    pub fn description(&self) -> &'static str {
        match self {
            SolverId::Microlp => "Pure-Rust MIP (simplex + branch-and-bound)",
            SolverId::Highs => "LP/MIP high-performance",
            SolverId::Cbc => "MIP branch-and-cut",
            SolverId::Exhaustive => "Exact enumeration for small project lists",
        }
    }

    /// Get all known solver IDs.
    pub fn all() -> &'static [SolverId] {
        &[
            SolverId::Microlp,
            SolverId::Highs,
            SolverId::Cbc,
            SolverId::Exhaustive,
        ]
    }
}

impl std::fmt::Display for SolverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SolverId {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "microlp" | "default" => Ok(SolverId::Microlp),
            "highs" => Ok(SolverId::Highs),
            "cbc" | "coin_cbc" => Ok(SolverId::Cbc),
            "exhaustive" | "enumerate" => Ok(SolverId::Exhaustive),
            _ => Err(SolverError::UnknownSolver(s.to_string())),
        }
    }
}
