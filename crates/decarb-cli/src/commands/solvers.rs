//! `decarb solvers`

use anyhow::Result;
use decarb_algo::select::available_solvers;
use decarb_cli::DecarbConfig;
use decarb_solver_common::SolverId;

pub fn handle(config: &DecarbConfig) -> Result<()> {
    let available = available_solvers();
    let default = config.solver_id()?;

    println!("Solver backends:");
    for id in SolverId::all() {
        let status = if available.contains(id) {
            "[available]"
        } else {
            "[not compiled]"
        };
        let marker = if *id == default { " (default)" } else { "" };
        println!(
            "  {:<12} {:<44} {}{}",
            id.as_str(),
            id.description(),
            status,
            marker
        );
    }
    println!();
    println!("Enable more engines with: cargo build --features all-solvers");
    Ok(())
}
