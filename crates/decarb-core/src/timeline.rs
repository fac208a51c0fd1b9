//! Timeline resolution
//!
//! Turns the user's deadline into the ceiling used by the timeline constraint.
//! A target date is measured in whole days from the reference instant and
//! divided by the mean Gregorian year length:
//!
//! ```text
//! max_timeline_years = floor_days(target_date 00:00 - now) / 365.25
//! ```
//!
//! The day count is floored, so a target later today counts as zero days and a
//! target that started a few hours ago counts as minus one. Past dates give a
//! negative ceiling and are not clamped.
//!
//! The reference instant is always passed in. Nothing here reads the clock.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::project::finite_number;

/// Mean calendar year length in days (accounts for leap years).
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Accepted target date layout.
pub const TARGET_DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a target date could not be used.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TimelineError {
    #[error("invalid target date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("target date must be a string, found {0}")]
    NotAString(String),
}

/// Fractional years from `now` until midnight at the start of `target`.
pub fn years_until(target: &str, now: NaiveDateTime) -> Result<f64, TimelineError> {
    let date = NaiveDate::parse_from_str(target, TARGET_DATE_FORMAT).map_err(|err| {
        TimelineError::InvalidDate {
            input: target.to_string(),
            reason: err.to_string(),
        }
    })?;
    let delta = date.and_time(NaiveTime::MIN) - now;

    // num_days truncates toward zero; step down once for negative remainders
    let mut days = delta.num_days();
    if delta < Duration::days(days) {
        days -= 1;
    }
    Ok(days as f64 / DAYS_PER_YEAR)
}

/// Resolve the timeline ceiling in years.
///
/// - A non-empty `target_date` wins. If it cannot be parsed the ceiling is
///   infinite (no timeline constraint) and the failure is only logged.
/// - Otherwise `explicit_years` is used when it reads as a finite number.
/// - Otherwise the ceiling is infinite.
pub fn resolve_max_timeline(
    target_date: Option<&Value>,
    explicit_years: Option<&Value>,
    now: NaiveDateTime,
) -> f64 {
    match target_date {
        None | Some(Value::Null) => explicit_or_unbounded(explicit_years),
        Some(Value::String(s)) if s.is_empty() => explicit_or_unbounded(explicit_years),
        Some(Value::String(s)) => years_until(s, now).unwrap_or_else(|err| {
            debug!(%err, "target date unusable; timeline left unconstrained");
            f64::INFINITY
        }),
        Some(other) => {
            let err = TimelineError::NotAString(other.to_string());
            debug!(%err, "target date unusable; timeline left unconstrained");
            f64::INFINITY
        }
    }
}

fn explicit_or_unbounded(explicit_years: Option<&Value>) -> f64 {
    explicit_years
        .and_then(finite_number)
        .unwrap_or(f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_one_year_ahead() {
        // 2025 is not a leap year; 365 whole days remain at midnight
        let years = years_until("2026-01-01", at(2025, 1, 1, 0)).unwrap();
        assert!((years - 365.0 / DAYS_PER_YEAR).abs() < 1e-12);
    }

    #[test]
    fn test_partial_days_are_floored() {
        // 364 days and 14 hours -> 364 days
        let years = years_until("2026-01-01", at(2025, 1, 1, 10)).unwrap();
        assert!((years - 364.0 / DAYS_PER_YEAR).abs() < 1e-12);
    }

    #[test]
    fn test_same_day_later_than_midnight_is_negative() {
        let years = years_until("2025-06-01", at(2025, 6, 1, 8)).unwrap();
        assert!((years - (-1.0 / DAYS_PER_YEAR)).abs() < 1e-12);
    }

    #[test]
    fn test_past_dates_are_not_clamped() {
        let years = years_until("2024-01-01", at(2025, 1, 1, 0)).unwrap();
        assert!((years - (-366.0 / DAYS_PER_YEAR)).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_dates_are_errors() {
        let now = at(2025, 1, 1, 0);
        assert!(matches!(
            years_until("2025-02-30", now),
            Err(TimelineError::InvalidDate { .. })
        ));
        assert!(years_until("next year", now).is_err());
        assert!(years_until("2025/06/01", now).is_err());
    }

    #[test]
    fn test_resolve_prefers_target_date() {
        let now = at(2025, 1, 1, 0);
        let years = resolve_max_timeline(Some(&json!("2026-01-01")), Some(&json!(10)), now);
        assert!((years - 365.0 / DAYS_PER_YEAR).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_unparseable_target_is_unbounded() {
        let now = at(2025, 1, 1, 0);
        assert_eq!(
            resolve_max_timeline(Some(&json!("soon")), Some(&json!(3)), now),
            f64::INFINITY
        );
        assert_eq!(
            resolve_max_timeline(Some(&json!(20250101)), None, now),
            f64::INFINITY
        );
    }

    #[test]
    fn test_resolve_falls_back_to_explicit_timeline() {
        let now = at(2025, 1, 1, 0);
        assert_eq!(resolve_max_timeline(None, Some(&json!(5)), now), 5.0);
        assert_eq!(resolve_max_timeline(Some(&json!("")), Some(&json!("2.5")), now), 2.5);
        assert_eq!(resolve_max_timeline(Some(&Value::Null), Some(&json!(-1)), now), -1.0);
    }

    #[test]
    fn test_resolve_without_inputs_is_unbounded() {
        let now = at(2025, 1, 1, 0);
        assert_eq!(resolve_max_timeline(None, None, now), f64::INFINITY);
        assert_eq!(
            resolve_max_timeline(None, Some(&json!("forever")), now),
            f64::INFINITY
        );
    }

    #[test]
    fn test_resolution_is_pure_for_fixed_instant() {
        let now = at(2025, 3, 14, 15);
        let a = resolve_max_timeline(Some(&json!("2030-12-31")), None, now);
        let b = resolve_max_timeline(Some(&json!("2030-12-31")), None, now);
        assert_eq!(a, b);
    }
}
