//! `decarb optimize`

use anyhow::{Context, Result};
use decarb_algo::select::{optimize_payload, OptimizationOutcome, SelectionConfig};
use decarb_cli::config::time_limit_from_secs;
use decarb_cli::payload::load_payload;
use decarb_cli::{DecarbConfig, OptimizeArgs, OutputFormat};
use tracing::info;

use super::reference_instant;

pub fn handle(args: &OptimizeArgs, config: &DecarbConfig) -> Result<()> {
    let payload = load_payload(&args.input)?;
    let selection = selection_config(args, config)?;
    let now = reference_instant(args.now);

    info!(
        solver = %selection.solver,
        time_limit = ?selection.time_limit,
        reference = %now,
        "running project selection"
    );
    let outcome = optimize_payload(&payload, now, &selection);

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string(&outcome).context("serializing result")?;
            println!("{json}");
        }
        OutputFormat::Summary => match &outcome {
            OptimizationOutcome::Report(report) => print!("{}", report.summary()),
            OptimizationOutcome::Error { error } => println!("{error}"),
        },
    }
    Ok(())
}

/// Config file values with command-line overrides applied.
fn selection_config(args: &OptimizeArgs, config: &DecarbConfig) -> Result<SelectionConfig> {
    let mut selection = config.selection_config()?;
    if let Some(solver) = args.solver {
        selection.solver = solver;
    }
    if let Some(secs) = args.time_limit {
        selection.time_limit = time_limit_from_secs(secs)?;
    }
    if args.enforce_investment_cap {
        selection.enforce_investment_cap = true;
    }
    Ok(selection)
}
