//! `decarb validate`: report how a request will be read without solving it.

use anyhow::{anyhow, Result};
use decarb_cli::payload::load_payload;
use decarb_cli::ValidateArgs;
use decarb_core::{ConstraintSet, FieldQuality, Project, ProjectField};

use super::reference_instant;

pub fn handle(args: &ValidateArgs) -> Result<()> {
    let payload = load_payload(&args.input)?;
    let projects = Project::list_from_value(payload.get("projects"))?;
    let constraints = payload
        .get("constraints")
        .ok_or_else(|| anyhow!("Missing constraints object"))?;
    let constraints = ConstraintSet::from_value(constraints, reference_instant(args.now))?;

    println!("Request payload is valid");
    println!("  {} projects", projects.len());

    let mut warnings = 0;
    for (i, project) in projects.iter().enumerate() {
        for field in ProjectField::all() {
            match project.quality(*field) {
                FieldQuality::Malformed(raw) => {
                    warnings += 1;
                    println!(
                        "  Warning: project {} field \"{}\" is not numeric ({}); read as 0",
                        i, field, raw
                    );
                }
                FieldQuality::Absent => {
                    println!("  Note: project {} has no \"{}\"; read as 0", i, field);
                }
                FieldQuality::Valid(_) => {}
            }
        }
    }

    println!(
        "  Carbon floor: {:.2} kg CO2/yr",
        constraints.min_carbon_reduction_kg
    );
    if constraints.has_timeline_ceiling() {
        println!(
            "  Timeline ceiling: {:.4} years (summed over selected projects)",
            constraints.max_timeline_years
        );
    } else {
        println!("  Timeline ceiling: none");
    }
    if constraints.has_investment_cap() {
        println!(
            "  Investment cap: {:.2} (only applied with --enforce-investment-cap)",
            constraints.max_investment
        );
    }
    println!("  {} warnings", warnings);
    Ok(())
}
