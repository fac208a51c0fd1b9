pub mod cli;
pub mod config;
pub mod payload;

pub use cli::{Cli, Commands, OptimizeArgs, OutputFormat, PayloadArgs, ValidateArgs};
pub use config::{ConfigError, DecarbConfig};
