//! Selection solver
//!
//! Formulates the selection problem, runs the configured backend and turns
//! the raw solution into a [`DecisionReport`].

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use decarb_core::{ConstraintSet, DecarbError, Project};
use decarb_solver_common::{RawSolution, SolverId};

use super::backends::{build_backend, DEFAULT_MAX_VARIABLES};
use super::{run_backend, DecisionReport, SelectionProblem};

/// Selection solver configuration
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Backend that solves the program
    pub solver: SolverId,
    /// Wall-clock limit (`None` = wait for the backend)
    pub time_limit: Option<Duration>,
    /// Largest candidate list the exhaustive backend accepts
    pub exhaustive_max_projects: usize,
    /// Add the investment cap row when the cap is finite
    pub enforce_investment_cap: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            solver: default_solver(),
            time_limit: None,
            exhaustive_max_projects: DEFAULT_MAX_VARIABLES,
            enforce_investment_cap: false,
        }
    }
}

impl SelectionConfig {
    pub fn with_solver(mut self, solver: SolverId) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }
}

fn default_solver() -> SolverId {
    if cfg!(feature = "solver-microlp") {
        SolverId::Microlp
    } else {
        SolverId::Exhaustive
    }
}

/// Select projects for an already-resolved constraint envelope.
pub fn optimize(
    projects: &[Project],
    constraints: &ConstraintSet,
    config: &SelectionConfig,
) -> Result<DecisionReport, DecarbError> {
    let problem = SelectionProblem::new(projects.to_vec(), *constraints)
        .with_investment_cap(config.enforce_investment_cap);
    solve_selection(&problem, config)
}

/// Solve a selection problem.
///
/// Infeasible, unbounded and timed-out runs come back as reports with the
/// matching status; only validation and backend failures are errors.
pub fn solve_selection(
    problem: &SelectionProblem,
    config: &SelectionConfig,
) -> Result<DecisionReport, DecarbError> {
    if problem.projects.is_empty() {
        return Err(DecarbError::validation("Invalid projects data"));
    }

    for (index, project) in problem.projects.iter().enumerate() {
        for (field, raw) in project.malformed_fields() {
            warn!(
                project = index,
                field = field.key(),
                value = %raw,
                "non-numeric project field treated as 0"
            );
        }
    }

    if problem.constraints.carbon_floor_unreachable() {
        warn!(
            projects = problem.num_projects(),
            "carbon floor overflows to infinity; reporting infeasible without solving"
        );
        let raw = RawSolution::infeasible("carbon floor exceeds any attainable reduction");
        return Ok(DecisionReport::from_raw(
            &problem.projects,
            &raw,
            config.solver.as_str(),
        ));
    }

    let program = problem.to_program();
    debug!(
        projects = program.num_variables(),
        constraints = program.num_constraints(),
        carbon_floor_kg = problem.constraints.min_carbon_reduction_kg,
        timeline_ceiling = problem.constraints.max_timeline_years,
        "formulated selection program"
    );

    let start = Instant::now();
    let backend = build_backend(config).map_err(|e| DecarbError::solver(e.to_string()))?;
    let backend_id = backend.id().to_string();
    let raw = run_backend(backend, program, config.time_limit)
        .map_err(|e| DecarbError::solver(e.to_string()))?;
    let solve_time = start.elapsed();

    let report = DecisionReport::from_raw(&problem.projects, &raw, &backend_id)
        .with_solve_time(solve_time);

    info!(
        backend = %backend_id,
        status = %report.status,
        selected = report.projects_selected(),
        nodes = raw.nodes,
        solve_ms = solve_time.as_millis() as u64,
        "project selection finished"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::SelectionProblemBuilder;
    use decarb_solver_common::SolutionStatus;

    fn exhaustive() -> SelectionConfig {
        SelectionConfig::default().with_solver(SolverId::Exhaustive)
    }

    #[test]
    fn test_default_config() {
        let config = SelectionConfig::default();
        assert!(config.time_limit.is_none());
        assert_eq!(config.exhaustive_max_projects, 24);
        assert!(!config.enforce_investment_cap);
        if cfg!(feature = "solver-microlp") {
            assert_eq!(config.solver, SolverId::Microlp);
        }
    }

    #[test]
    fn test_empty_project_list_is_rejected() {
        let problem = SelectionProblemBuilder::new().carbon_floor_kg(10.0).build();
        let err = solve_selection(&problem, &exhaustive()).unwrap_err();
        assert_eq!(err, DecarbError::Validation("Invalid projects data".into()));
    }

    #[test]
    fn test_solve_reports_backend_and_totals() {
        let problem = SelectionProblemBuilder::new()
            .candidate(100.0, 50.0, 1.0)
            .candidate(60.0, 30.0, 2.0)
            .candidate(70.0, 30.0, 3.0)
            .carbon_floor_kg(60.0)
            .build();
        let report = solve_selection(&problem, &exhaustive()).unwrap();

        assert_eq!(report.status, SolutionStatus::Optimal);
        assert_eq!(report.selected_indices(), vec![1, 2]);
        assert_eq!(report.total_investment, Some(130.0));
        assert_eq!(report.total_carbon_reduction, 60.0);
        assert_eq!(report.max_timeline, 3.0);
        assert_eq!(report.backend, "exhaustive");
    }

    #[test]
    fn test_investment_cap_changes_outcome_only_when_enforced() {
        let projects = vec![Project::with_estimates(100.0, 50.0, 1.0)];
        let constraints = ConstraintSet::unconstrained()
            .with_carbon_floor_tonnes(0.05)
            .with_max_investment(10.0);

        let open = optimize(&projects, &constraints, &exhaustive()).unwrap();
        assert_eq!(open.status, SolutionStatus::Optimal);
        assert_eq!(open.projects_selected(), 1);

        let capped_config = SelectionConfig {
            enforce_investment_cap: true,
            ..exhaustive()
        };
        let capped = optimize(&projects, &constraints, &capped_config).unwrap();
        assert_eq!(capped.status, SolutionStatus::Infeasible);
    }

    #[test]
    fn test_overflowed_carbon_floor_is_infeasible() {
        let projects = vec![Project::with_estimates(100.0, 50.0, 1.0)];
        let constraints = ConstraintSet::unconstrained().with_carbon_floor_tonnes(1e306);
        assert!(constraints.carbon_floor_unreachable());

        let report = optimize(&projects, &constraints, &exhaustive()).unwrap();
        assert_eq!(report.status, SolutionStatus::Infeasible);
        assert_eq!(report.total_investment, None);
        assert!(report.selected_projects.is_empty());
        assert_eq!(report.backend, "exhaustive");
    }

    #[test]
    fn test_backend_refusal_is_a_solver_error() {
        let projects: Vec<Project> = (0..5)
            .map(|_| Project::with_estimates(1.0, 1.0, 1.0))
            .collect();
        let config = SelectionConfig {
            exhaustive_max_projects: 3,
            ..exhaustive()
        };
        let err = optimize(&projects, &ConstraintSet::unconstrained(), &config).unwrap_err();

        assert!(matches!(err, DecarbError::Solver(_)));
        assert!(err.to_string().starts_with("Solver error: "));
    }
}
