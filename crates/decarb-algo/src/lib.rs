//! # decarb-algo: Project selection for carbon-reduction portfolios
//!
//! This crate turns a list of candidate projects and a constraint envelope
//! into a binary integer program, hands it to a solver backend and maps the
//! result back onto the projects.
//!
//! ## Architecture
//!
//! - **[`select::SelectionProblem`]**: projects + resolved constraints, and the
//!   formulation that produces a [`decarb_solver_common::BinaryProgram`]
//! - **[`select::SelectionBackend`]**: solver capability interface (what runs
//!   the program); implementations are [`select::LpBackend`] and
//!   [`select::ExhaustiveBackend`]
//! - **[`select::DecisionReport`]**: selected projects and aggregate metrics
//! - **[`select::optimize_payload`]**: the JSON-in, JSON-out entry point that
//!   never fails; errors become `{"error": ...}` outcomes
//!
//! ## Example
//!
//! ```
//! use decarb_algo::select::{optimize, SelectionConfig};
//! use decarb_core::{ConstraintSet, Project};
//!
//! let projects = vec![
//!     Project::with_estimates(100.0, 50.0, 1.0),
//!     Project::with_estimates(80.0, 10.0, 2.0),
//! ];
//! let constraints = ConstraintSet::unconstrained().with_carbon_floor_tonnes(0.05);
//!
//! let config = SelectionConfig::default();
//! let report = optimize(&projects, &constraints, &config)?;
//! assert_eq!(report.selected_projects.len(), 1);
//! assert_eq!(report.total_carbon_reduction, 50.0);
//! # Ok::<(), decarb_core::DecarbError>(())
//! ```

pub mod select;

pub use select::{
    optimize, optimize_payload, solve_selection, DecisionReport, OptimizationOutcome,
    ProjectDecision, SelectionConfig, SelectionProblem, SelectionProblemBuilder,
};
