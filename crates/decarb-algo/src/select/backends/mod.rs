//! Solver backends for the selection program.
//!
//! Backends implement [`SelectionBackend`] and are chosen by [`SolverId`]. The
//! formulation never depends on which one runs.

mod exhaustive;
mod lp;

pub use exhaustive::{ExhaustiveBackend, DEFAULT_MAX_VARIABLES};
pub use lp::LpBackend;

use std::sync::Arc;

use decarb_solver_common::{BinaryProgram, RawSolution, SolveControl, SolverError, SolverId};

use super::SelectionConfig;

/// Runs a binary program (how to solve).
pub trait SelectionBackend: Send + Sync {
    /// Unique identifier (e.g., "microlp", "exhaustive")
    fn id(&self) -> &str;

    /// Check if this backend is available in this build
    fn is_available(&self) -> bool;

    /// Solve the program.
    ///
    /// Infeasible and unbounded programs are reported through the solution
    /// status; `Err` is reserved for the backend itself failing.
    fn solve(
        &self,
        program: &BinaryProgram,
        control: &SolveControl,
    ) -> Result<RawSolution, SolverError>;
}

/// Construct the backend named in `config`.
pub fn build_backend(config: &SelectionConfig) -> Result<Arc<dyn SelectionBackend>, SolverError> {
    let backend: Arc<dyn SelectionBackend> = match config.solver {
        SolverId::Exhaustive => Arc::new(ExhaustiveBackend::new(config.exhaustive_max_projects)),
        id => Arc::new(LpBackend::new(id)),
    };
    if !backend.is_available() {
        return Err(SolverError::NotAvailable(config.solver));
    }
    Ok(backend)
}

/// Backends compiled into this build.
pub fn available_solvers() -> Vec<SolverId> {
    SolverId::all()
        .iter()
        .copied()
        .filter(|id| match id {
            SolverId::Exhaustive => true,
            other => LpBackend::new(*other).is_available(),
        })
        .collect()
}
