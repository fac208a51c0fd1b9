//! # decarb-core: Inputs for carbon-reduction project selection
//!
//! This crate holds the data that flows into the project selection optimizer:
//!
//! - [`Project`]: one candidate project record, kept as the raw JSON object so
//!   descriptive fields survive unchanged into the decision report.
//! - [`ConstraintSet`]: the feasibility envelope (carbon floor, investment cap,
//!   timeline ceiling) resolved from the user-facing constraint object.
//! - [`timeline`]: converts a target calendar date into a maximum duration in
//!   fractional years relative to an injected reference instant.
//! - [`DecarbError`]: the error type shared across the workspace.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use decarb_core::{ConstraintSet, Project};
//! use serde_json::json;
//!
//! let now = NaiveDate::from_ymd_opt(2025, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//!
//! let projects = Project::list_from_value(Some(&json!([
//!     { "Estimated Investment in Rs.": 100, "Estimated Carbon Reduction in Kg/CO2 per annum": 50 }
//! ])))?;
//! let constraints = ConstraintSet::from_value(&json!({ "carbonEmission": 0.05 }), now)?;
//!
//! assert_eq!(projects[0].investment(), 100.0);
//! assert_eq!(constraints.min_carbon_reduction_kg, 50.0);
//! # Ok::<(), decarb_core::DecarbError>(())
//! ```

pub mod constraints;
pub mod error;
pub mod project;
pub mod timeline;

pub use constraints::{ConstraintSet, KG_PER_TONNE};
pub use error::{DecarbError, DecarbResult};
pub use project::{FieldQuality, Project, ProjectField};
pub use timeline::{resolve_max_timeline, years_until, TimelineError, DAYS_PER_YEAR};
