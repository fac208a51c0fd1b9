//! Raw solver output.
//!
//! Defines what a backend hands back before it is mapped onto projects.

use serde::{Deserialize, Serialize};

/// Categorical outcome of a solve.
///
/// Serialized spellings are fixed: `Optimal`, `Infeasible`, `Unbounded`,
/// `Not Solved`, `Undefined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolutionStatus {
    /// Optimal solution found.
    Optimal,
    /// Problem is infeasible.
    Infeasible,
    /// Problem is unbounded.
    Unbounded,
    /// Solver stopped before reaching a conclusion (e.g. time limit).
    #[serde(rename = "Not Solved")]
    NotSolved,
    /// Solver finished in a state it could not classify.
    Undefined,
}

impl SolutionStatus {
    /// Check if this status represents a successful solve.
    pub fn is_success(&self) -> bool {
        matches!(self, SolutionStatus::Optimal)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SolutionStatus::Optimal => "Optimal",
            SolutionStatus::Infeasible => "Infeasible",
            SolutionStatus::Unbounded => "Unbounded",
            SolutionStatus::NotSolved => "Not Solved",
            SolutionStatus::Undefined => "Undefined",
        }
    }
}

impl std::fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Solution returned by a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSolution {
    /// Solve status.
    pub status: SolutionStatus,

    /// Solved value per variable; empty when the backend produced none.
    pub values: Vec<f64>,

    /// Objective value, when the backend produced one.
    pub objective: Option<f64>,

    /// Search nodes explored (0 if the backend does not report it).
    pub nodes: u64,

    /// Diagnostic message (infeasibility reason, time limit, ...).
    pub message: Option<String>,
}

impl RawSolution {
    /// Create an optimal solution.
    pub fn optimal(values: Vec<f64>, objective: f64) -> Self {
        Self {
            status: SolutionStatus::Optimal,
            values,
            objective: Some(objective),
            nodes: 0,
            message: None,
        }
    }

    /// Create an infeasible solution.
    pub fn infeasible(message: &str) -> Self {
        Self::without_values(SolutionStatus::Infeasible, message)
    }

    /// Create an unbounded solution.
    pub fn unbounded(message: &str) -> Self {
        Self::without_values(SolutionStatus::Unbounded, message)
    }

    /// Create a solution for a solve that was stopped early.
    pub fn not_solved(message: &str) -> Self {
        Self::without_values(SolutionStatus::NotSolved, message)
    }

    fn without_values(status: SolutionStatus, message: &str) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective: None,
            nodes: 0,
            message: Some(message.to_string()),
        }
    }

    /// Record the number of explored nodes (builder style).
    pub fn with_nodes(mut self, nodes: u64) -> Self {
        self.nodes = nodes;
        self
    }

    /// Check if solution is optimal.
    pub fn is_optimal(&self) -> bool {
        self.status.is_success()
    }

    /// Value of variable `index`, or 0 when the backend produced none.
    pub fn value(&self, index: usize) -> f64 {
        self.values.get(index).copied().unwrap_or(0.0)
    }
}
