//! Binary integer program representation.
//!
//! Defines the data handed from the formulation to a solver backend. Every
//! variable is binary and the objective is always minimized.

use serde::{Deserialize, Serialize};

use crate::{SolverError, SolverResult};

/// Direction of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintSense {
    /// `Σ aᵢxᵢ ≥ rhs`
    AtLeast,
    /// `Σ aᵢxᵢ ≤ rhs`
    AtMost,
}

impl std::fmt::Display for ConstraintSense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstraintSense::AtLeast => write!(f, ">="),
            ConstraintSense::AtMost => write!(f, "<="),
        }
    }
}

/// One linear constraint over all program variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearConstraint {
    /// Constraint name (used in logs and errors).
    pub name: String,
    /// One coefficient per variable.
    pub coefficients: Vec<f64>,
    /// Direction.
    pub sense: ConstraintSense,
    /// Right-hand side.
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn at_least(name: impl Into<String>, coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            name: name.into(),
            coefficients,
            sense: ConstraintSense::AtLeast,
            rhs,
        }
    }

    pub fn at_most(name: impl Into<String>, coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            name: name.into(),
            coefficients,
            sense: ConstraintSense::AtMost,
            rhs,
        }
    }

    /// Left-hand side evaluated at `values`.
    pub fn activity(&self, values: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(values)
            .fold(0.0, |acc, (a, x)| acc + a * x)
    }

    /// Whether `values` satisfy the constraint within `tolerance`.
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.activity(values);
        match self.sense {
            ConstraintSense::AtLeast => lhs >= self.rhs - tolerance,
            ConstraintSense::AtMost => lhs <= self.rhs + tolerance,
        }
    }
}

/// Minimization program over binary variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryProgram {
    /// Program name.
    pub name: String,
    /// Objective coefficient per variable (minimized).
    pub objective: Vec<f64>,
    /// Linear constraints.
    pub constraints: Vec<LinearConstraint>,
}

impl BinaryProgram {
    /// Create a program with the given objective and no constraints.
    pub fn new(name: impl Into<String>, objective: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            objective,
            constraints: Vec::new(),
        }
    }

    /// Add a constraint (builder style).
    pub fn with_constraint(mut self, constraint: LinearConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    /// Number of binary variables.
    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    /// Number of constraints.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Find a constraint by name.
    pub fn constraint(&self, name: &str) -> Option<&LinearConstraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// Objective evaluated at `values`.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective
            .iter()
            .zip(values)
            .fold(0.0, |acc, (c, x)| acc + c * x)
    }

    /// Smallest and largest nonzero magnitude across the objective, row
    /// coefficients and finite right-hand sides. `None` when every entry is zero.
    pub fn coefficient_range(&self) -> Option<(f64, f64)> {
        let rows = self
            .constraints
            .iter()
            .flat_map(|c| c.coefficients.iter().chain(std::iter::once(&c.rhs)));
        self.objective
            .iter()
            .chain(rows)
            .map(|v| v.abs())
            .filter(|v| *v > 0.0 && v.is_finite())
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
            })
    }

    /// Whether `values` satisfy every constraint within `tolerance`.
    pub fn is_feasible(&self, values: &[f64], tolerance: f64) -> bool {
        self.constraints
            .iter()
            .all(|c| c.is_satisfied(values, tolerance))
    }

    /// Check that every coefficient vector has one entry per variable and
    /// that all numbers are finite.
    pub fn validate(&self) -> SolverResult<()> {
        let n = self.num_variables();
        if self.objective.iter().any(|c| !c.is_finite()) {
            return Err(SolverError::Backend(format!(
                "{}: objective has non-finite coefficients",
                self.name
            )));
        }
        for constraint in &self.constraints {
            if constraint.coefficients.len() != n {
                return Err(SolverError::DimensionMismatch {
                    context: format!("constraint {}", constraint.name),
                    expected: n,
                    found: constraint.coefficients.len(),
                });
            }
            if !constraint.rhs.is_finite() || constraint.coefficients.iter().any(|c| !c.is_finite())
            {
                return Err(SolverError::Backend(format!(
                    "constraint {} has non-finite data",
                    constraint.name
                )));
            }
        }
        Ok(())
    }
}
