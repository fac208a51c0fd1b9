//! Deadline and cancellation signal passed to backends.
//!
//! Backends that can stop early poll [`SolveControl::should_stop`]. Backends
//! that cannot are simply abandoned by the caller once the deadline passes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared stop signal for one solve.
///
/// Clones share the same cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct SolveControl {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl SolveControl {
    /// No deadline; only explicit cancellation stops the solve.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Stop once `deadline` has passed.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Stop after `limit` from now.
    pub fn with_time_limit(limit: Duration) -> Self {
        Self::with_deadline(Instant::now() + limit)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Raise the cancellation flag for every clone.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Whether a cooperative backend should give up now.
    pub fn should_stop(&self) -> bool {
        self.is_cancelled() || self.deadline_passed()
    }
}
