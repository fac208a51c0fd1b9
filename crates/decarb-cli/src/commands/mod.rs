pub mod optimize;
pub mod solvers;
pub mod validate;

use chrono::{Local, NaiveDateTime};

/// Reference instant for `targetDate`: the `--now` override or local wall-clock time.
pub(crate) fn reference_instant(now: Option<NaiveDateTime>) -> NaiveDateTime {
    now.unwrap_or_else(|| Local::now().naive_local())
}
