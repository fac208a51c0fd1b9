//! Reading the request document.

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::PayloadArgs;

/// Where a request document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSource {
    Inline(String),
    File(PathBuf),
    Stdin,
}

impl PayloadSource {
    /// Pick the source: `--input` first, then the positional argument.
    pub fn from_args(args: &PayloadArgs) -> Result<Self> {
        if let Some(path) = &args.input {
            if args.payload.is_some() {
                debug!("both --input and PAYLOAD given; using --input");
            }
            if path == Path::new("-") {
                return Ok(PayloadSource::Stdin);
            }
            return Ok(PayloadSource::File(path.clone()));
        }
        match &args.payload {
            Some(text) => Ok(PayloadSource::Inline(text.clone())),
            None => Err(anyhow!("No input data provided")),
        }
    }

    pub fn read_to_string(&self) -> Result<String> {
        match self {
            PayloadSource::Inline(text) => Ok(text.clone()),
            PayloadSource::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("reading input file {}", path.display())),
            PayloadSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("reading input from stdin")?;
                Ok(buffer)
            }
        }
    }
}

/// Read and parse the request document.
pub fn load_payload(args: &PayloadArgs) -> Result<Value> {
    let source = PayloadSource::from_args(args)?;
    let text = source.read_to_string()?;
    serde_json::from_str(&text).context("parsing request JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(payload: Option<&str>, input: Option<&str>) -> PayloadArgs {
        PayloadArgs {
            payload: payload.map(String::from),
            input: input.map(PathBuf::from),
        }
    }

    #[test]
    fn test_input_flag_wins() {
        assert_eq!(
            PayloadSource::from_args(&args(Some("{}"), Some("req.json"))).unwrap(),
            PayloadSource::File(PathBuf::from("req.json"))
        );
        assert_eq!(
            PayloadSource::from_args(&args(None, Some("-"))).unwrap(),
            PayloadSource::Stdin
        );
        assert_eq!(
            PayloadSource::from_args(&args(Some("{}"), None)).unwrap(),
            PayloadSource::Inline("{}".to_string())
        );
    }

    #[test]
    fn test_no_source_is_an_error() {
        let err = PayloadSource::from_args(&args(None, None)).unwrap_err();
        assert_eq!(err.to_string(), "No input data provided");
    }

    #[test]
    fn test_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"projects": [], "constraints": {{}}}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let value = load_payload(&args(None, Some(&path))).unwrap();
        assert!(value["projects"].is_array());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = load_payload(&args(Some("{not json"), None)).unwrap_err();
        assert!(format!("{err:#}").starts_with("parsing request JSON"));
    }
}
