//! TOML configuration for the `decarb` binary.
//!
//! Every key is optional; command-line flags override what the file says.

use decarb_algo::select::SelectionConfig;
use decarb_solver_common::SolverId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DecarbConfig {
    /// Solver configuration
    #[serde(default)]
    pub solver: SolverSection,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSection,
}

/// `[solver]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverSection {
    /// Backend id: microlp, highs, cbc or exhaustive
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Wall-clock limit in seconds (0 = no limit)
    #[serde(default)]
    pub time_limit_seconds: f64,
    /// Largest candidate list the exhaustive backend accepts
    #[serde(default = "default_exhaustive_max_projects")]
    pub exhaustive_max_projects: usize,
    /// Add the investment cap row
    #[serde(default)]
    pub enforce_investment_cap: bool,
}

impl Default for SolverSection {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            time_limit_seconds: 0.0,
            exhaustive_max_projects: default_exhaustive_max_projects(),
            enforce_investment_cap: false,
        }
    }
}

fn default_backend() -> String {
    SelectionConfig::default().solver.as_str().to_string()
}

fn default_exhaustive_max_projects() -> usize {
    SelectionConfig::default().exhaustive_max_projects
}

/// `[logging]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl DecarbConfig {
    /// Load a configuration file. A missing file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn solver_id(&self) -> Result<SolverId, ConfigError> {
        self.solver
            .backend
            .parse()
            .map_err(|e: decarb_solver_common::SolverError| ConfigError::Invalid(e.to_string()))
    }

    pub fn log_level(&self) -> Result<tracing::Level, ConfigError> {
        self.logging.level.parse().map_err(|_| {
            ConfigError::Invalid(format!("unknown log level '{}'", self.logging.level))
        })
    }

    /// Selection settings described by the file.
    pub fn selection_config(&self) -> Result<SelectionConfig, ConfigError> {
        Ok(SelectionConfig {
            solver: self.solver_id()?,
            time_limit: time_limit_from_secs(self.solver.time_limit_seconds)?,
            exhaustive_max_projects: self.solver.exhaustive_max_projects,
            enforce_investment_cap: self.solver.enforce_investment_cap,
        })
    }
}

/// Convert a seconds value into a limit; 0 means none.
pub fn time_limit_from_secs(secs: f64) -> Result<Option<Duration>, ConfigError> {
    if secs == 0.0 {
        return Ok(None);
    }
    Duration::try_from_secs_f64(secs).map(Some).map_err(|_| {
        ConfigError::Invalid(format!(
            "time limit must be a non-negative number of seconds, got {secs}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = DecarbConfig::from_toml_str("").unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.solver.exhaustive_max_projects, 24);
        assert!(!config.solver.enforce_investment_cap);

        let selection = config.selection_config().unwrap();
        assert_eq!(selection.time_limit, None);
        assert_eq!(selection.solver, SelectionConfig::default().solver);
    }

    #[test]
    fn test_full_file() {
        let config = DecarbConfig::from_toml_str(
            r#"
            [solver]
            backend = "exhaustive"
            time_limit_seconds = 2
            exhaustive_max_projects = 16
            enforce_investment_cap = true

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        let selection = config.selection_config().unwrap();
        assert_eq!(selection.solver, SolverId::Exhaustive);
        assert_eq!(selection.time_limit, Some(Duration::from_secs(2)));
        assert_eq!(selection.exhaustive_max_projects, 16);
        assert!(selection.enforce_investment_cap);
        assert_eq!(config.log_level().unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let config = DecarbConfig::from_toml_str("[solver]\nbackend = \"gurobi\"\n").unwrap();
        assert!(matches!(config.selection_config(), Err(ConfigError::Invalid(_))));

        let config = DecarbConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(matches!(config.log_level(), Err(ConfigError::Invalid(_))));

        assert!(time_limit_from_secs(-1.0).is_err());
        assert!(time_limit_from_secs(f64::NAN).is_err());
        assert!(matches!(
            DecarbConfig::from_toml_str("[solver\n"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[solver]\nbackend = \"enumerate\"").unwrap();

        let config = DecarbConfig::load(file.path()).unwrap();
        assert_eq!(config.solver_id().unwrap(), SolverId::Exhaustive);

        let missing = DecarbConfig::load("/nonexistent/decarb.toml");
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
