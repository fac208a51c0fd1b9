//! Selection problem data structures
//!
//! Holds the projects and constraint envelope for one run and builds the
//! binary program handed to a backend.

use decarb_core::{ConstraintSet, Project};
use decarb_solver_common::{BinaryProgram, LinearConstraint};

/// Name of the carbon floor row.
pub const CARBON_CONSTRAINT: &str = "CarbonReduction";
/// Name of the timeline ceiling row.
pub const TIMELINE_CONSTRAINT: &str = "Timeline";
/// Name of the optional investment cap row.
pub const INVESTMENT_CAP_CONSTRAINT: &str = "InvestmentCap";

const PROGRAM_NAME: &str = "ProjectSelection";

/// Projects plus the constraints they are selected under.
#[derive(Debug, Clone)]
pub struct SelectionProblem {
    /// Candidate projects, in input order
    pub projects: Vec<Project>,
    /// Resolved constraint envelope
    pub constraints: ConstraintSet,
    /// Add `Σ c_i x_i ≤ max_investment` when the cap is finite
    pub enforce_investment_cap: bool,
}

impl SelectionProblem {
    /// Create a problem; the investment cap is not enforced.
    pub fn new(projects: Vec<Project>, constraints: ConstraintSet) -> Self {
        Self {
            projects,
            constraints,
            enforce_investment_cap: false,
        }
    }

    /// Toggle enforcement of the investment cap
    pub fn with_investment_cap(mut self, enforce: bool) -> Self {
        self.enforce_investment_cap = enforce;
        self
    }

    /// Number of candidate projects
    pub fn num_projects(&self) -> usize {
        self.projects.len()
    }

    pub fn investments(&self) -> Vec<f64> {
        self.projects.iter().map(Project::investment).collect()
    }

    pub fn carbon_reductions(&self) -> Vec<f64> {
        self.projects.iter().map(Project::carbon_reduction).collect()
    }

    pub fn timelines(&self) -> Vec<f64> {
        self.projects.iter().map(Project::timeline).collect()
    }

    /// Investment if every candidate were funded
    pub fn max_investment_cost(&self) -> f64 {
        self.projects
            .iter()
            .map(Project::investment)
            .fold(0.0, |acc, c| acc + c)
    }

    /// Carbon reduction if every candidate were funded
    pub fn max_carbon_reduction(&self) -> f64 {
        self.projects
            .iter()
            .map(Project::carbon_reduction)
            .fold(0.0, |acc, c| acc + c)
    }

    /// Build the binary program.
    ///
    /// Rows whose bound is infinite are left out; they could never bind.
    pub fn to_program(&self) -> BinaryProgram {
        let investments = self.investments();
        let mut program = BinaryProgram::new(PROGRAM_NAME, investments.clone());

        program.add_constraint(LinearConstraint::at_least(
            CARBON_CONSTRAINT,
            self.carbon_reductions(),
            self.constraints.min_carbon_reduction_kg,
        ));

        if self.constraints.has_timeline_ceiling() {
            program.add_constraint(LinearConstraint::at_most(
                TIMELINE_CONSTRAINT,
                self.timelines(),
                self.constraints.max_timeline_years,
            ));
        }

        if self.enforce_investment_cap && self.constraints.has_investment_cap() {
            program.add_constraint(LinearConstraint::at_most(
                INVESTMENT_CAP_CONSTRAINT,
                investments,
                self.constraints.max_investment,
            ));
        }

        program
    }
}

/// Builder for constructing selection problems
pub struct SelectionProblemBuilder {
    problem: SelectionProblem,
}

impl Default for SelectionProblemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionProblemBuilder {
    /// Start from no projects and no constraints
    pub fn new() -> Self {
        Self {
            problem: SelectionProblem::new(Vec::new(), ConstraintSet::unconstrained()),
        }
    }

    /// Add a project
    pub fn project(mut self, project: Project) -> Self {
        self.problem.projects.push(project);
        self
    }

    /// Add a project from its estimates
    pub fn candidate(self, investment: f64, carbon_reduction_kg: f64, timeline_years: f64) -> Self {
        self.project(Project::with_estimates(
            investment,
            carbon_reduction_kg,
            timeline_years,
        ))
    }

    /// Replace the constraint envelope
    pub fn constraints(mut self, constraints: ConstraintSet) -> Self {
        self.problem.constraints = constraints;
        self
    }

    /// Set the carbon floor in kilograms
    pub fn carbon_floor_kg(mut self, kg: f64) -> Self {
        self.problem.constraints.min_carbon_reduction_kg = kg;
        self
    }

    /// Set the timeline ceiling in years
    pub fn timeline_ceiling_years(mut self, years: f64) -> Self {
        self.problem.constraints.max_timeline_years = years;
        self
    }

    /// Set the investment cap
    pub fn investment_cap(mut self, cap: f64) -> Self {
        self.problem.constraints.max_investment = cap;
        self
    }

    /// Enforce the investment cap in the program
    pub fn enforce_investment_cap(mut self, enforce: bool) -> Self {
        self.problem.enforce_investment_cap = enforce;
        self
    }

    /// Build the selection problem
    pub fn build(self) -> SelectionProblem {
        self.problem
    }
}
