use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand, ValueEnum};
use decarb_solver_common::SolverId;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "decarb",
    author,
    version,
    about = "Select carbon-reduction projects at minimum total investment",
    long_about = None
)]
pub struct Cli {
    /// Set the logging level (logs go to stderr) [default: warn]
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select projects for a request payload and print the decision report
    Optimize(OptimizeArgs),
    /// Check a request payload and report fields that will be read as 0
    Validate(ValidateArgs),
    /// List solver backends and whether this build includes them
    Solvers,
}

/// Where the request JSON comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct PayloadArgs {
    /// Request JSON given inline
    #[arg(value_name = "PAYLOAD")]
    pub payload: Option<String>,

    /// Read the request from a file ('-' for stdin); wins over PAYLOAD
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub input: PayloadArgs,

    /// Solver backend (microlp, highs, cbc, exhaustive)
    #[arg(long, value_name = "ID")]
    pub solver: Option<SolverId>,

    /// Give up after this many seconds (0 = no limit)
    #[arg(long, value_name = "SECS")]
    pub time_limit: Option<f64>,

    /// Reference local time for targetDate (YYYY-MM-DDTHH:MM:SS) [default: now]
    #[arg(long, value_name = "DATETIME")]
    pub now: Option<NaiveDateTime>,

    /// Also require total investment <= constraints.investment
    #[arg(long)]
    pub enforce_investment_cap: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: PayloadArgs,

    /// Reference local time for targetDate (YYYY-MM-DDTHH:MM:SS) [default: now]
    #[arg(long, value_name = "DATETIME")]
    pub now: Option<NaiveDateTime>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object on stdout
    Json,
    /// Human-readable report
    Summary,
}
