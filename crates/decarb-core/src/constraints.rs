//! Constraint resolution
//!
//! Converts the user-facing constraint object into the numeric envelope used
//! by the formulation.
//!
//! | Input key        | Resolved field              | Default |
//! |------------------|-----------------------------|---------|
//! | `carbonEmission` | `min_carbon_reduction_kg` (tonnes × 1000) | 0 |
//! | `investment`     | `max_investment`            | +∞ |
//! | `targetDate`     | `max_timeline_years` (see [`crate::timeline`]) | - |
//! | `timeline`       | `max_timeline_years` when no target date | +∞ |

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::project::finite_number;
use crate::timeline::resolve_max_timeline;
use crate::{DecarbError, DecarbResult};

/// Kilograms per metric tonne.
pub const KG_PER_TONNE: f64 = 1000.0;

/// Resolved feasibility envelope for one optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConstraintSet {
    /// Minimum total carbon reduction (kg CO2 per year)
    pub min_carbon_reduction_kg: f64,
    /// Investment cap; only enforced when the solver is asked to
    pub max_investment: f64,
    /// Ceiling on the summed timelines of selected projects (years)
    pub max_timeline_years: f64,
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self::unconstrained()
    }
}

impl ConstraintSet {
    /// No carbon floor, no cap, no timeline ceiling.
    pub fn unconstrained() -> Self {
        Self {
            min_carbon_reduction_kg: 0.0,
            max_investment: f64::INFINITY,
            max_timeline_years: f64::INFINITY,
        }
    }

    /// Set the carbon floor from tonnes.
    pub fn with_carbon_floor_tonnes(mut self, tonnes: f64) -> Self {
        self.min_carbon_reduction_kg = tonnes * KG_PER_TONNE;
        self
    }

    pub fn with_max_investment(mut self, max_investment: f64) -> Self {
        self.max_investment = max_investment;
        self
    }

    pub fn with_max_timeline_years(mut self, years: f64) -> Self {
        self.max_timeline_years = years;
        self
    }

    /// Resolve a constraint object against the reference instant `now`.
    ///
    /// `carbonEmission` and `investment` must be numeric when present;
    /// anything unusable in the timeline keys just leaves the timeline open.
    pub fn from_value(value: &Value, now: NaiveDateTime) -> DecarbResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| DecarbError::validation("Constraints must be a JSON object"))?;

        let carbon_tonnes = required_number(object, "carbonEmission", 0.0)?;
        let max_investment = required_number(object, "investment", f64::INFINITY)?;
        let max_timeline_years =
            resolve_max_timeline(object.get("targetDate"), object.get("timeline"), now);

        Ok(Self {
            min_carbon_reduction_kg: carbon_tonnes * KG_PER_TONNE,
            max_investment,
            max_timeline_years,
        })
    }

    pub fn has_timeline_ceiling(&self) -> bool {
        self.max_timeline_years.is_finite()
    }

    pub fn has_investment_cap(&self) -> bool {
        self.max_investment.is_finite()
    }

    /// A tonnage so large that the kg floor overflowed; no finite selection meets it.
    pub fn carbon_floor_unreachable(&self) -> bool {
        self.min_carbon_reduction_kg == f64::INFINITY
    }
}

fn required_number(
    object: &Map<String, Value>,
    field: &'static str,
    default: f64,
) -> DecarbResult<f64> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(raw) => finite_number(raw).ok_or_else(|| DecarbError::InvalidConstraint {
            field,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_object_is_unconstrained() {
        let set = ConstraintSet::from_value(&json!({}), now()).unwrap();
        assert_eq!(set, ConstraintSet::unconstrained());
        assert!(!set.has_timeline_ceiling());
        assert!(!set.has_investment_cap());
    }

    #[test]
    fn test_carbon_emission_converted_to_kg() {
        let set = ConstraintSet::from_value(&json!({ "carbonEmission": 0.05 }), now()).unwrap();
        assert!((set.min_carbon_reduction_kg - 50.0).abs() < 1e-9);

        let set = ConstraintSet::from_value(&json!({ "carbonEmission": "12" }), now()).unwrap();
        assert_eq!(set.min_carbon_reduction_kg, 12_000.0);
    }

    #[test]
    fn test_investment_is_resolved_but_optional() {
        let set = ConstraintSet::from_value(&json!({ "investment": 5e6 }), now()).unwrap();
        assert_eq!(set.max_investment, 5e6);
        assert!(set.has_investment_cap());
    }

    #[test]
    fn test_malformed_carbon_emission_is_an_error() {
        let err = ConstraintSet::from_value(&json!({ "carbonEmission": "lots" }), now()).unwrap_err();
        assert!(matches!(
            err,
            DecarbError::InvalidConstraint {
                field: "carbonEmission",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_investment_is_an_error() {
        let err = ConstraintSet::from_value(&json!({ "investment": [1, 2] }), now()).unwrap_err();
        assert!(err.to_string().contains("investment"));
    }

    #[test]
    fn test_timeline_from_target_date_takes_priority() {
        let set = ConstraintSet::from_value(
            &json!({ "targetDate": "2026-01-01", "timeline": 10 }),
            now(),
        )
        .unwrap();
        assert!((set.max_timeline_years - 365.0 / 365.25).abs() < 1e-12);
    }

    #[test]
    fn test_timeline_explicit_fallback() {
        let set = ConstraintSet::from_value(&json!({ "timeline": 5 }), now()).unwrap();
        assert_eq!(set.max_timeline_years, 5.0);
    }

    #[test]
    fn test_huge_carbon_emission_overflows_to_unreachable_floor() {
        let set = ConstraintSet::from_value(&json!({ "carbonEmission": 1e306 }), now()).unwrap();
        assert!(set.carbon_floor_unreachable());

        let set = ConstraintSet::from_value(&json!({ "carbonEmission": 1e300 }), now()).unwrap();
        assert!(!set.carbon_floor_unreachable());
    }

    #[test]
    fn test_non_object_constraints_rejected() {
        assert!(ConstraintSet::from_value(&json!([1, 2, 3]), now()).is_err());
    }

    #[test]
    fn test_builder_methods() {
        let set = ConstraintSet::unconstrained()
            .with_carbon_floor_tonnes(2.0)
            .with_max_investment(1e5)
            .with_max_timeline_years(3.0);
        assert_eq!(set.min_carbon_reduction_kg, 2000.0);
        assert_eq!(set.max_investment, 1e5);
        assert_eq!(set.max_timeline_years, 3.0);
    }
}
