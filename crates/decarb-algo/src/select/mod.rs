//! Project Selection
//!
//! Chooses which candidate projects to fund so that the total investment is as
//! small as possible while the portfolio still reaches a carbon-reduction
//! floor and stays within a timeline ceiling.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PROJECT SELECTION                                                      │
//! │  ─────────────────                                                      │
//! │                                                                         │
//! │  Given:                                                                 │
//! │    • Candidate projects (investment, carbon reduction, timeline)        │
//! │    • Carbon floor (kg CO2 / year)                                       │
//! │    • Timeline ceiling (years, from a target date or explicit value)     │
//! │                                                                         │
//! │  Decide:                                                                │
//! │    • Which projects to fund (binary decisions)                          │
//! │                                                                         │
//! │  Minimize:                                                              │
//! │    Total investment                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Formulation
//!
//! ```text
//! minimize    Σ_i c_i · x_i                      total investment
//!
//! subject to:
//!   Σ_i r_i · x_i ≥ R_min                        CarbonReduction
//!   Σ_i t_i · x_i ≤ T_max                        Timeline (omitted when T_max = ∞)
//!   Σ_i c_i · x_i ≤ C_max                        InvestmentCap (opt-in only)
//!   x_i ∈ {0,1}
//! ```
//!
//! The timeline row sums the durations of every selected project. It bounds
//! total project-years, not the longest single project.
//!
//! ## Reading the result
//!
//! A project counts as selected when its solved value is strictly greater than
//! [`SELECTION_THRESHOLD`]. The reported investment is the solver objective;
//! carbon reduction and the longest timeline are recomputed from the selected
//! projects.

mod backends;
mod deadline;
mod payload;
mod problem;
mod solution;
mod solver;

pub use backends::{
    available_solvers, build_backend, ExhaustiveBackend, LpBackend, SelectionBackend,
};
pub use deadline::run_backend;
pub use payload::{optimize_payload, OptimizationOutcome};
pub use problem::{
    SelectionProblem, SelectionProblemBuilder, CARBON_CONSTRAINT, INVESTMENT_CAP_CONSTRAINT,
    TIMELINE_CONSTRAINT,
};
pub use solution::{is_selected, DecisionReport, ProjectDecision, SELECTION_THRESHOLD};
pub use solver::{optimize, solve_selection, SelectionConfig};
