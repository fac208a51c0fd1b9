//! Run a backend under an optional wall-clock limit.
//!
//! Without a limit the backend runs on the calling thread. With one it runs on
//! a worker thread; if the limit passes first the worker is told to stop and
//! left to finish on its own, and the caller gets a `Not Solved` solution.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::warn;

use decarb_solver_common::{BinaryProgram, RawSolution, SolveControl, SolverError};

use super::SelectionBackend;

const WORKER_NAME: &str = "decarb-solver";

/// Solve `program` with `backend`, giving up after `time_limit`.
///
/// A panicking backend is reported as [`SolverError::Panicked`].
pub fn run_backend(
    backend: Arc<dyn SelectionBackend>,
    program: BinaryProgram,
    time_limit: Option<Duration>,
) -> Result<RawSolution, SolverError> {
    let Some(limit) = time_limit else {
        let control = SolveControl::unbounded();
        return catch_unwind(AssertUnwindSafe(|| backend.solve(&program, &control)))
            .unwrap_or_else(|payload| Err(SolverError::Panicked(panic_message(payload))));
    };

    let control = SolveControl::with_time_limit(limit);
    let worker_control = control.clone();
    let (tx, rx) = mpsc::channel();

    thread::Builder::new()
        .name(WORKER_NAME.to_string())
        .spawn(move || {
            let result = catch_unwind(AssertUnwindSafe(|| {
                backend.solve(&program, &worker_control)
            }))
            .unwrap_or_else(|payload| Err(SolverError::Panicked(panic_message(payload))));
            // The receiver is gone once the caller timed out
            let _ = tx.send(result);
        })
        .map_err(|e| SolverError::Backend(format!("failed to start solver thread: {e}")))?;

    match rx.recv_timeout(limit) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            control.cancel();
            warn!(
                limit_secs = limit.as_secs_f64(),
                "solver time limit reached; abandoning solve"
            );
            Ok(RawSolution::not_solved(&format!(
                "time limit of {}s reached",
                limit.as_secs_f64()
            )))
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(SolverError::Panicked(
            "solver thread exited without a result".to_string(),
        )),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decarb_solver_common::SolutionStatus;
    use std::time::Instant;

    struct Sleeper(Duration);

    impl SelectionBackend for Sleeper {
        fn id(&self) -> &str {
            "sleeper"
        }
        fn is_available(&self) -> bool {
            true
        }
        fn solve(
            &self,
            program: &BinaryProgram,
            _control: &SolveControl,
        ) -> Result<RawSolution, SolverError> {
            thread::sleep(self.0);
            Ok(RawSolution::optimal(vec![0.0; program.num_variables()], 0.0))
        }
    }

    struct Panicker;

    impl SelectionBackend for Panicker {
        fn id(&self) -> &str {
            "panicker"
        }
        fn is_available(&self) -> bool {
            true
        }
        fn solve(
            &self,
            _program: &BinaryProgram,
            _control: &SolveControl,
        ) -> Result<RawSolution, SolverError> {
            panic!("engine blew up");
        }
    }

    /// Spins until told to stop, then reports what it saw.
    struct Cooperative;

    impl SelectionBackend for Cooperative {
        fn id(&self) -> &str {
            "cooperative"
        }
        fn is_available(&self) -> bool {
            true
        }
        fn solve(
            &self,
            _program: &BinaryProgram,
            control: &SolveControl,
        ) -> Result<RawSolution, SolverError> {
            while !control.should_stop() {
                thread::sleep(Duration::from_millis(1));
            }
            Ok(RawSolution::not_solved("observed stop"))
        }
    }

    fn program() -> BinaryProgram {
        BinaryProgram::new("test", vec![1.0, 2.0])
    }

    #[test]
    fn test_no_limit_runs_inline() {
        let raw = run_backend(Arc::new(Sleeper(Duration::ZERO)), program(), None).unwrap();
        assert_eq!(raw.status, SolutionStatus::Optimal);
        assert_eq!(raw.values.len(), 2);
    }

    #[test]
    fn test_fast_backend_beats_limit() {
        let raw = run_backend(
            Arc::new(Sleeper(Duration::ZERO)),
            program(),
            Some(Duration::from_secs(10)),
        )
        .unwrap();
        assert_eq!(raw.status, SolutionStatus::Optimal);
    }

    #[test]
    fn test_slow_backend_is_not_solved() {
        let start = Instant::now();
        let raw = run_backend(
            Arc::new(Sleeper(Duration::from_secs(5))),
            program(),
            Some(Duration::from_millis(50)),
        )
        .unwrap();

        assert_eq!(raw.status, SolutionStatus::NotSolved);
        assert!(raw.values.is_empty());
        assert!(raw.message.unwrap().contains("time limit"));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_cooperative_backend_sees_deadline() {
        let raw = run_backend(
            Arc::new(Cooperative),
            program(),
            Some(Duration::from_millis(20)),
        )
        .unwrap();
        assert_eq!(raw.status, SolutionStatus::NotSolved);
    }

    #[test]
    fn test_panic_is_reported_as_error() {
        let inline = run_backend(Arc::new(Panicker), program(), None).unwrap_err();
        assert_eq!(inline, SolverError::Panicked("engine blew up".to_string()));

        let threaded =
            run_backend(Arc::new(Panicker), program(), Some(Duration::from_secs(10))).unwrap_err();
        assert_eq!(threaded, SolverError::Panicked("engine blew up".to_string()));
    }
}
