//! good_lp backend.
//!
//! Builds one binary variable per program column and hands the model to the
//! engine picked by [`SolverId`]. Engines are compiled in through cargo
//! features; only microlp is on by default.

use std::time::Instant;

#[cfg(feature = "solver-coin_cbc")]
use good_lp::solvers::coin_cbc::coin_cbc;
#[cfg(feature = "solver-highs")]
use good_lp::solvers::highs::highs;
#[cfg(feature = "solver-microlp")]
use good_lp::solvers::microlp::microlp;
use good_lp::{
    constraint, variable, variables, Constraint, Expression, ResolutionError, Solution,
    SolverModel, Variable,
};
use tracing::{debug, warn};

use decarb_solver_common::{
    BinaryProgram, ConstraintSense, RawSolution, SolveControl, SolverError, SolverId,
};

use super::SelectionBackend;

/// Backend driving a good_lp engine.
///
/// The engines do not observe [`SolveControl`]; a time limit is enforced by
/// the caller abandoning the solve.
#[derive(Debug, Clone, Copy)]
pub struct LpBackend {
    solver: SolverId,
}

impl LpBackend {
    pub fn new(solver: SolverId) -> Self {
        Self { solver }
    }

    pub fn solver(&self) -> SolverId {
        self.solver
    }
}

impl SelectionBackend for LpBackend {
    fn id(&self) -> &str {
        self.solver.as_str()
    }

    fn is_available(&self) -> bool {
        match self.solver {
            SolverId::Microlp => cfg!(feature = "solver-microlp"),
            SolverId::Highs => cfg!(feature = "solver-highs"),
            SolverId::Cbc => cfg!(feature = "solver-coin_cbc"),
            SolverId::Exhaustive => false,
        }
    }

    fn solve(
        &self,
        program: &BinaryProgram,
        _control: &SolveControl,
    ) -> Result<RawSolution, SolverError> {
        program.validate()?;
        let start = Instant::now();

        let mut vars = variables!();
        let decisions: Vec<Variable> = (0..program.num_variables())
            .map(|_| vars.add(variable().binary()))
            .collect();

        let objective = linear_expression(&program.objective, &decisions);
        let rows: Vec<Constraint> = program
            .constraints
            .iter()
            .map(|row| {
                let lhs = linear_expression(&row.coefficients, &decisions);
                let rhs = row.rhs;
                match row.sense {
                    ConstraintSense::AtLeast => constraint!(lhs >= rhs),
                    ConstraintSense::AtMost => constraint!(lhs <= rhs),
                }
            })
            .collect();

        let unsolved = vars.minimise(objective);
        let outcome = match self.solver {
            #[cfg(feature = "solver-microlp")]
            SolverId::Microlp => solve_model(unsolved.using(microlp), rows, &decisions),
            #[cfg(feature = "solver-highs")]
            SolverId::Highs => solve_model(unsolved.using(highs), rows, &decisions),
            #[cfg(feature = "solver-coin_cbc")]
            SolverId::Cbc => {
                let mut model = unsolved.using(coin_cbc);
                model.set_parameter("log", "0");
                solve_model(model, rows, &decisions)
            }
            other => return Err(SolverError::NotAvailable(other)),
        };

        debug!(
            backend = self.id(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "good_lp solve returned"
        );

        match outcome {
            Ok(values) => {
                let objective = program.objective_value(&values);
                Ok(RawSolution::optimal(values, objective))
            }
            Err(ResolutionError::Infeasible) => Ok(RawSolution::infeasible(
                "no selection satisfies every constraint",
            )),
            Err(ResolutionError::Unbounded) => {
                Ok(RawSolution::unbounded("objective is unbounded"))
            }
            Err(other) => {
                if let Some((smallest, largest)) = program.coefficient_range() {
                    warn!(
                        backend = self.id(),
                        smallest,
                        largest,
                        error = %other,
                        "engine failed; coefficients this far apart are often badly scaled"
                    );
                }
                Err(SolverError::Backend(other.to_string()))
            }
        }
    }
}

fn linear_expression(coefficients: &[f64], decisions: &[Variable]) -> Expression {
    let mut expr = Expression::from(0.0);
    for (coefficient, var) in coefficients.iter().zip(decisions) {
        expr += *coefficient * *var;
    }
    expr
}

fn solve_model<M>(
    model: M,
    rows: Vec<Constraint>,
    decisions: &[Variable],
) -> Result<Vec<f64>, ResolutionError>
where
    M: SolverModel<Error = ResolutionError>,
{
    let solution = rows
        .into_iter()
        .fold(model, |model, row| model.with(row))
        .solve()?;
    Ok(decisions.iter().map(|var| solution.value(*var)).collect())
}

#[cfg(all(test, feature = "solver-microlp"))]
mod tests {
    use super::*;
    use crate::select::is_selected;
    use decarb_solver_common::{LinearConstraint, SolutionStatus};

    fn solve(program: &BinaryProgram) -> RawSolution {
        LpBackend::new(SolverId::Microlp)
            .solve(program, &SolveControl::unbounded())
            .expect("microlp should run")
    }

    #[test]
    fn test_microlp_is_available_by_default() {
        let backend = LpBackend::new(SolverId::Microlp);
        assert!(backend.is_available());
        assert_eq!(backend.id(), "microlp");
    }

    #[test]
    fn test_picks_cheapest_cover() {
        // Need 100 kg: {0,1} costs 70, {2} costs 90
        let program = BinaryProgram::new("cover", vec![30.0, 40.0, 90.0]).with_constraint(
            LinearConstraint::at_least("CarbonReduction", vec![50.0, 50.0, 100.0], 100.0),
        );
        let raw = solve(&program);

        assert_eq!(raw.status, SolutionStatus::Optimal);
        let picked: Vec<bool> = raw.values.iter().map(|v| is_selected(*v)).collect();
        assert_eq!(picked, vec![true, true, false]);
        assert!((raw.objective.unwrap() - 70.0).abs() < 1e-6);
    }

    #[test]
    fn test_reports_infeasible_as_status() {
        let program = BinaryProgram::new("too-much", vec![1.0, 1.0])
            .with_constraint(LinearConstraint::at_least(
                "CarbonReduction",
                vec![1.0, 1.0],
                5.0,
            ));
        let raw = solve(&program);

        assert_eq!(raw.status, SolutionStatus::Infeasible);
        assert!(raw.values.is_empty());
        assert_eq!(raw.objective, None);
    }

    #[test]
    fn test_rejects_malformed_program() {
        let program = BinaryProgram::new("bad", vec![1.0])
            .with_constraint(LinearConstraint::at_most("Timeline", vec![1.0, 2.0], 3.0));
        let err = LpBackend::new(SolverId::Microlp)
            .solve(&program, &SolveControl::unbounded())
            .unwrap_err();
        assert!(matches!(err, SolverError::DimensionMismatch { .. }));
    }
}
