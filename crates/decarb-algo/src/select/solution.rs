//! Decision report
//!
//! Maps a backend's raw output back onto the candidate projects.

use decarb_core::Project;
use decarb_solver_common::{RawSolution, SolutionStatus};
use serde::Serialize;
use std::time::Duration;

/// A decision variable above this value means the project is selected.
pub const SELECTION_THRESHOLD: f64 = 0.9;

/// Whether a solved decision value selects its project (strictly above 0.9).
pub fn is_selected(value: f64) -> bool {
    value > SELECTION_THRESHOLD
}

/// Solved decision for one candidate project
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectDecision {
    /// Index into the input project list
    pub index: usize,
    /// Value the backend assigned to the decision variable
    pub value: f64,
    /// Whether the project is funded
    pub selected: bool,
}

/// Result of one project selection run.
///
/// Serializes to the output contract:
/// `{"status", "selectedProjects", "totalInvestment", "totalCarbonReduction", "maxTimeline"}`.
/// The remaining fields are diagnostics and are not serialized.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionReport {
    /// Solver status
    pub status: SolutionStatus,
    /// Selected projects in input order
    pub selected_projects: Vec<Project>,
    /// Objective value reported by the backend
    pub total_investment: Option<f64>,
    /// Sum of carbon reduction over selected projects
    pub total_carbon_reduction: f64,
    /// Longest timeline among selected projects (0 if none)
    pub max_timeline: f64,
    /// Per-project decisions
    #[serde(skip)]
    pub decisions: Vec<ProjectDecision>,
    /// Backend that produced the solution
    #[serde(skip)]
    pub backend: String,
    /// Solve time
    #[serde(skip)]
    pub solve_time: Duration,
    /// Backend diagnostic message
    #[serde(skip)]
    pub message: Option<String>,
}

impl DecisionReport {
    /// Build a report from raw backend output.
    ///
    /// Variables the backend did not report count as zero.
    pub fn from_raw(projects: &[Project], raw: &RawSolution, backend: &str) -> Self {
        let decisions: Vec<ProjectDecision> = (0..projects.len())
            .map(|index| {
                let value = raw.value(index);
                ProjectDecision {
                    index,
                    value,
                    selected: is_selected(value),
                }
            })
            .collect();

        let selected_projects: Vec<Project> = decisions
            .iter()
            .filter(|d| d.selected)
            .map(|d| projects[d.index].clone())
            .collect();

        // Folding from +0.0 keeps an empty selection from summing to -0.0
        let total_carbon_reduction = selected_projects
            .iter()
            .map(Project::carbon_reduction)
            .fold(0.0, |acc, c| acc + c);
        let max_timeline = selected_projects
            .iter()
            .map(Project::timeline)
            .fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |m| m.max(t))))
            .unwrap_or(0.0);

        Self {
            status: raw.status,
            selected_projects,
            total_investment: raw.objective,
            total_carbon_reduction,
            max_timeline,
            decisions,
            backend: backend.to_string(),
            solve_time: Duration::ZERO,
            message: raw.message.clone(),
        }
    }

    /// Record the solve time (builder style)
    pub fn with_solve_time(mut self, solve_time: Duration) -> Self {
        self.solve_time = solve_time;
        self
    }

    /// Number of projects selected
    pub fn projects_selected(&self) -> usize {
        self.selected_projects.len()
    }

    /// Sum of the timelines of selected projects (what the timeline row bounds)
    pub fn total_timeline(&self) -> f64 {
        self.selected_projects
            .iter()
            .map(Project::timeline)
            .fold(0.0, |acc, t| acc + t)
    }

    /// Indices of selected projects
    pub fn selected_indices(&self) -> Vec<usize> {
        self.decisions
            .iter()
            .filter(|d| d.selected)
            .map(|d| d.index)
            .collect()
    }

    /// Format a human-readable summary
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Project Selection Summary\n{}\n", "=".repeat(40)));
        s.push_str(&format!("Status: {}\n", self.status));
        if let Some(message) = &self.message {
            s.push_str(&format!("  Note: {}\n", message));
        }
        match self.total_investment {
            Some(total) => s.push_str(&format!("Total Investment: {:.2}\n", total)),
            None => s.push_str("Total Investment: n/a\n"),
        }
        s.push_str(&format!(
            "Total Carbon Reduction: {:.2} kg CO2/yr\n",
            self.total_carbon_reduction
        ));
        s.push_str(&format!("Max Timeline: {:.2} years\n", self.max_timeline));
        s.push_str(&format!(
            "Summed Timeline: {:.2} years\n",
            self.total_timeline()
        ));
        s.push_str(&format!(
            "Projects Selected: {}/{}\n",
            self.projects_selected(),
            self.decisions.len()
        ));
        if !self.backend.is_empty() {
            s.push_str(&format!("Backend: {}\n", self.backend));
        }
        s.push_str(&format!("Solve Time: {:.2?}\n", self.solve_time));

        if !self.decisions.is_empty() {
            s.push_str("\nDecisions:\n");
            for decision in &self.decisions {
                if decision.selected {
                    s.push_str(&format!("  [FUND] project {}\n", decision.index));
                } else {
                    s.push_str(&format!("  [SKIP] project {}\n", decision.index));
                }
            }
        }

        s
    }
}
