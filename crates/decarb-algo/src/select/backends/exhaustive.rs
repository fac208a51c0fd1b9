//! Depth-first branch and bound over every selection.
//!
//! Needs no external engine, so it is always available. Each node decides one
//! project, skip before take, and a branch is cut as soon as it cannot beat
//! the incumbent or can no longer satisfy some row.

use std::time::Instant;

use tracing::debug;

use decarb_solver_common::{
    BinaryProgram, ConstraintSense, RawSolution, SolveControl, SolverError,
};

use super::SelectionBackend;

/// Largest program the exhaustive backend accepts by default.
pub const DEFAULT_MAX_VARIABLES: usize = 24;

/// Nodes between two polls of the stop signal.
const STOP_CHECK_INTERVAL: u64 = 1024;

/// Exact search backend for small candidate lists.
#[derive(Debug, Clone, Copy)]
pub struct ExhaustiveBackend {
    max_variables: usize,
}

impl Default for ExhaustiveBackend {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VARIABLES)
    }
}

impl ExhaustiveBackend {
    pub fn new(max_variables: usize) -> Self {
        Self { max_variables }
    }

    pub fn max_variables(&self) -> usize {
        self.max_variables
    }
}

impl SelectionBackend for ExhaustiveBackend {
    fn id(&self) -> &str {
        "exhaustive"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn solve(
        &self,
        program: &BinaryProgram,
        control: &SolveControl,
    ) -> Result<RawSolution, SolverError> {
        program.validate()?;
        let variables = program.num_variables();
        if variables > self.max_variables {
            return Err(SolverError::ProblemTooLarge {
                backend: "exhaustive",
                variables,
                limit: self.max_variables,
            });
        }

        let start = Instant::now();
        let mut search = Search::new(program, control);
        search.descend(0, 0.0);

        debug!(
            nodes = search.nodes,
            stopped = search.stopped,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "exhaustive search finished"
        );

        let nodes = search.nodes;
        if search.stopped {
            return Ok(RawSolution::not_solved("search stopped before completion").with_nodes(nodes));
        }
        Ok(match search.best {
            Some((objective, values)) => RawSolution::optimal(values, objective).with_nodes(nodes),
            None => RawSolution::infeasible("no selection satisfies every constraint")
                .with_nodes(nodes),
        })
    }
}

/// Suffix bounds on what the undecided variables can still add to a row.
struct RowReach {
    /// `gain[i]` = Σ_{j≥i} max(a_j, 0)
    gain: Vec<f64>,
    /// `loss[i]` = Σ_{j≥i} min(a_j, 0)
    loss: Vec<f64>,
    tolerance: f64,
}

impl RowReach {
    fn new(coefficients: &[f64], rhs: f64) -> Self {
        let n = coefficients.len();
        let mut gain = vec![0.0; n + 1];
        let mut loss = vec![0.0; n + 1];
        for i in (0..n).rev() {
            gain[i] = gain[i + 1] + coefficients[i].max(0.0);
            loss[i] = loss[i + 1] + coefficients[i].min(0.0);
        }
        Self {
            gain,
            loss,
            tolerance: 1e-9 * rhs.abs().max(1.0),
        }
    }
}

struct Search<'a> {
    program: &'a BinaryProgram,
    control: &'a SolveControl,
    reach: Vec<RowReach>,
    /// `objective_floor[i]` = Σ_{j≥i} min(c_j, 0)
    objective_floor: Vec<f64>,
    choice: Vec<f64>,
    activity: Vec<f64>,
    best: Option<(f64, Vec<f64>)>,
    nodes: u64,
    stopped: bool,
}

impl<'a> Search<'a> {
    fn new(program: &'a BinaryProgram, control: &'a SolveControl) -> Self {
        let n = program.num_variables();
        let mut objective_floor = vec![0.0; n + 1];
        for i in (0..n).rev() {
            objective_floor[i] = objective_floor[i + 1] + program.objective[i].min(0.0);
        }
        Self {
            program,
            control,
            reach: program
                .constraints
                .iter()
                .map(|row| RowReach::new(&row.coefficients, row.rhs))
                .collect(),
            objective_floor,
            choice: vec![0.0; n],
            activity: vec![0.0; program.num_constraints()],
            best: None,
            nodes: 0,
            stopped: false,
        }
    }

    fn descend(&mut self, depth: usize, objective: f64) {
        self.nodes += 1;
        if self.nodes % STOP_CHECK_INTERVAL == 1 && self.control.should_stop() {
            self.stopped = true;
        }
        if self.stopped {
            return;
        }

        if let Some((incumbent, _)) = &self.best {
            let eps = 1e-9 * incumbent.abs().max(1.0);
            if objective + self.objective_floor[depth] >= incumbent - eps {
                return;
            }
        }
        if !self.rows_reachable(depth) {
            return;
        }
        if depth == self.choice.len() {
            self.best = Some((objective, self.choice.clone()));
            return;
        }

        self.descend(depth + 1, objective);

        self.set(depth, 1.0);
        self.descend(depth + 1, objective + self.program.objective[depth]);
        self.set(depth, 0.0);
    }

    fn set(&mut self, index: usize, value: f64) {
        let delta = value - self.choice[index];
        self.choice[index] = value;
        for (activity, row) in self.activity.iter_mut().zip(&self.program.constraints) {
            *activity += delta * row.coefficients[index];
        }
    }

    fn rows_reachable(&self, depth: usize) -> bool {
        self.program
            .constraints
            .iter()
            .zip(&self.reach)
            .zip(&self.activity)
            .all(|((row, reach), activity)| match row.sense {
                ConstraintSense::AtLeast => {
                    activity + reach.gain[depth] >= row.rhs - reach.tolerance
                }
                ConstraintSense::AtMost => activity + reach.loss[depth] <= row.rhs + reach.tolerance,
            })
    }
}
