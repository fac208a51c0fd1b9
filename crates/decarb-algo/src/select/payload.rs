//! JSON boundary of the optimizer.
//!
//! [`optimize_payload`] takes the whole request document and always produces
//! an [`OptimizationOutcome`]; failures are folded into `{"error": ...}`.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use decarb_core::{ConstraintSet, DecarbError, DecarbResult, Project};

use super::{optimize, DecisionReport, SelectionConfig};

/// Either a decision report or an error object.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OptimizationOutcome {
    Report(DecisionReport),
    Error { error: String },
}

impl OptimizationOutcome {
    /// Wrap an optimizer failure as `Optimization error: <msg>`.
    pub fn from_error(err: &DecarbError) -> Self {
        OptimizationOutcome::Error {
            error: format!("Optimization error: {err}"),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, OptimizationOutcome::Error { .. })
    }

    pub fn report(&self) -> Option<&DecisionReport> {
        match self {
            OptimizationOutcome::Report(report) => Some(report),
            OptimizationOutcome::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            OptimizationOutcome::Report(_) => None,
            OptimizationOutcome::Error { error } => Some(error),
        }
    }
}

impl From<DecisionReport> for OptimizationOutcome {
    fn from(report: DecisionReport) -> Self {
        OptimizationOutcome::Report(report)
    }
}

/// Run the optimizer on a request document `{"projects": [...], "constraints": {...}}`.
///
/// `now` is the reference instant used to turn `targetDate` into years.
pub fn optimize_payload(
    payload: &Value,
    now: NaiveDateTime,
    config: &SelectionConfig,
) -> OptimizationOutcome {
    match run(payload, now, config) {
        Ok(report) => report.into(),
        Err(err) => {
            debug!(error = %err, "optimization request failed");
            OptimizationOutcome::from_error(&err)
        }
    }
}

fn run(payload: &Value, now: NaiveDateTime, config: &SelectionConfig) -> DecarbResult<DecisionReport> {
    let projects = Project::list_from_value(payload.get("projects"))?;
    let constraints = payload
        .get("constraints")
        .ok_or_else(|| DecarbError::validation("Missing constraints object"))?;
    let constraints = ConstraintSet::from_value(constraints, now)?;
    optimize(&projects, &constraints, config)
}
