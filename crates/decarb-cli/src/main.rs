use anyhow::{anyhow, Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use decarb_cli::{Cli, Commands, DecarbConfig};
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::FmtSubscriber;

mod commands;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => return main_error(&argument_error(&err)),
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => main_error(&format!("{err:#}")),
    }
}

/// Every failure still ends as one JSON object on stdout.
fn main_error(detail: &str) -> ExitCode {
    let payload = serde_json::json!({ "error": format!("Main error: {detail}") });
    println!("{payload}");
    ExitCode::FAILURE
}

/// First line of clap's rendered error, without the usage block.
fn argument_error(err: &clap::Error) -> String {
    err.render()
        .to_string()
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.trim_start_matches("error:").trim().to_string())
        .unwrap_or_else(|| "invalid arguments".to_string())
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    init_logging(cli.log_level, &config)?;

    match &cli.command {
        Commands::Optimize(args) => commands::optimize::handle(args, &config),
        Commands::Validate(args) => commands::validate::handle(args),
        Commands::Solvers => commands::solvers::handle(&config),
    }
}

fn load_config(path: Option<&Path>) -> Result<DecarbConfig> {
    match path {
        Some(path) => DecarbConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display())),
        None => Ok(DecarbConfig::default()),
    }
}

/// Logs go to stderr so stdout carries only the result.
fn init_logging(flag: Option<tracing::Level>, config: &DecarbConfig) -> Result<()> {
    let level = match flag {
        Some(level) => level,
        None => config.log_level()?,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("setting default subscriber failed: {e}"))?;

    debug!(%level, "logging initialised");
    Ok(())
}
