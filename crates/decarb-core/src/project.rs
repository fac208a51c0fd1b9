//! Candidate project records
//!
//! A project is whatever JSON object the caller sent. Three fields carry
//! numbers the optimizer needs; every other field is descriptive and is echoed
//! back untouched. Numeric fields are read leniently: a missing or malformed
//! value counts as zero rather than rejecting the project.

use crate::{DecarbError, DecarbResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The numeric fields the optimizer reads from each project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectField {
    /// Capital required (currency units)
    Investment,
    /// Annual carbon reduction (kg CO2 per year)
    CarbonReduction,
    /// Time to complete (years)
    Timeline,
}

impl ProjectField {
    /// JSON key used in project records.
    pub fn key(&self) -> &'static str {
        match self {
            ProjectField::Investment => "Estimated Investment in Rs.",
            ProjectField::CarbonReduction => "Estimated Carbon Reduction in Kg/CO2 per annum",
            ProjectField::Timeline => "Estimated Timeline",
        }
    }

    pub fn all() -> &'static [ProjectField] {
        &[
            ProjectField::Investment,
            ProjectField::CarbonReduction,
            ProjectField::Timeline,
        ]
    }
}

impl std::fmt::Display for ProjectField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Outcome of reading one numeric field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldQuality {
    /// Present and convertible to a finite number
    Valid(f64),
    /// Key not present (or explicitly null)
    Absent,
    /// Present but not a usable number; carries the raw JSON text
    Malformed(String),
}

impl FieldQuality {
    /// Numeric value the optimizer uses (zero unless valid).
    pub fn value(&self) -> f64 {
        match self {
            FieldQuality::Valid(v) => *v,
            FieldQuality::Absent | FieldQuality::Malformed(_) => 0.0,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, FieldQuality::Valid(_))
    }
}

/// Read a JSON value as a finite number.
///
/// Numbers are taken as is and strings are trimmed then parsed. Anything else,
/// including non-finite results, is `None`.
pub fn finite_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// One candidate project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Project {
    fields: Map<String, Value>,
}

impl Project {
    /// Wrap an existing JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a project from its three numeric fields.
    pub fn with_estimates(investment: f64, carbon_reduction: f64, timeline: f64) -> Self {
        let mut fields = Map::new();
        fields.insert(ProjectField::Investment.key().to_string(), investment.into());
        fields.insert(
            ProjectField::CarbonReduction.key().to_string(),
            carbon_reduction.into(),
        );
        fields.insert(ProjectField::Timeline.key().to_string(), timeline.into());
        Self { fields }
    }

    /// Attach a descriptive field (builder style).
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Convert a JSON value into a project; `index` is only used in the error.
    pub fn from_value(index: usize, value: &Value) -> DecarbResult<Self> {
        match value {
            Value::Object(map) => Ok(Self::new(map.clone())),
            other => Err(DecarbError::validation(format!(
                "Project at index {index} is not an object (found {})",
                json_kind(other)
            ))),
        }
    }

    /// Parse the `projects` entry of a payload.
    ///
    /// Fails when it is missing, not an array, or empty.
    pub fn list_from_value(value: Option<&Value>) -> DecarbResult<Vec<Self>> {
        let items = match value {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Err(DecarbError::validation("Invalid projects data")),
        };
        items
            .iter()
            .enumerate()
            .map(|(index, item)| Self::from_value(index, item))
            .collect()
    }

    /// Inspect how a numeric field was read.
    pub fn quality(&self, field: ProjectField) -> FieldQuality {
        match self.fields.get(field.key()) {
            None | Some(Value::Null) => FieldQuality::Absent,
            Some(raw) => match finite_number(raw) {
                Some(v) => FieldQuality::Valid(v),
                None => FieldQuality::Malformed(raw.to_string()),
            },
        }
    }

    /// Numeric value of a field, zero when absent or malformed.
    pub fn numeric(&self, field: ProjectField) -> f64 {
        self.quality(field).value()
    }

    pub fn investment(&self) -> f64 {
        self.numeric(ProjectField::Investment)
    }

    pub fn carbon_reduction(&self) -> f64 {
        self.numeric(ProjectField::CarbonReduction)
    }

    pub fn timeline(&self) -> f64 {
        self.numeric(ProjectField::Timeline)
    }

    /// Fields that were present but could not be read as numbers.
    pub fn malformed_fields(&self) -> Vec<(ProjectField, String)> {
        ProjectField::all()
            .iter()
            .filter_map(|field| match self.quality(*field) {
                FieldQuality::Malformed(raw) => Some((*field, raw)),
                _ => None,
            })
            .collect()
    }

    /// Raw access to any field, descriptive ones included.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
