//! # Command-Line Arguments
//!
//! ## Usage
//! ```bash
//! # Breakdown of a batch export
//! stock-report --entries ./exports/batch_stock.json
//!
//! # Low-stock feed, watching cut rolls too
//! stock-report --levels ./exports/levels.json --threshold 8 --include-cut-rolls
//!
//! # Persist the effective settings to report.toml
//! stock-report --threshold 8 --save-config
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::config::DisplayStyle;

pub const USAGE: &str = "\
Usage: stock-report [OPTIONS]

Options:
  -e, --entries <FILE>      JSON array of stock entries to break down
  -l, --levels <FILE>       JSON array of stock levels for the low-stock feed
  -t, --threshold <N>       Low-stock threshold (dashboard range 1-20)
      --include-cut-rolls   Watch cut rolls as well as full rolls
  -s, --style <STYLE>       Breakdown labels: long | short
  -c, --config <FILE>       Config file (default: platform config dir)
      --save-config         Write the effective settings to the config file
  -h, --help                Print this help";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("{0} expects a value")]
    MissingValue(String),

    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: String, value: String },

    #[error("unknown argument '{0}'")]
    Unknown(String),
}

/// Parsed command line. `None` means "not given on the command line".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    pub entries: Option<PathBuf>,
    pub levels: Option<PathBuf>,
    pub threshold: Option<u32>,
    pub include_cut_rolls: bool,
    pub style: Option<DisplayStyle>,
    pub config: Option<PathBuf>,
    pub save_config: bool,
    pub help: bool,
}

impl Args {
    /// Parses arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--entries" | "-e" => parsed.entries = Some(value(&arg, args.next())?.into()),
                "--levels" | "-l" => parsed.levels = Some(value(&arg, args.next())?.into()),
                "--config" | "-c" => parsed.config = Some(value(&arg, args.next())?.into()),
                "--threshold" | "-t" => {
                    let raw = value(&arg, args.next())?;
                    let threshold = raw.parse().map_err(|_| ArgsError::InvalidValue {
                        flag: arg.clone(),
                        value: raw,
                    })?;
                    parsed.threshold = Some(threshold);
                }
                "--style" | "-s" => {
                    let raw = value(&arg, args.next())?;
                    let style = raw.parse().map_err(|_| ArgsError::InvalidValue {
                        flag: arg.clone(),
                        value: raw,
                    })?;
                    parsed.style = Some(style);
                }
                "--include-cut-rolls" => parsed.include_cut_rolls = true,
                "--save-config" => parsed.save_config = true,
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::Unknown(arg)),
            }
        }

        Ok(parsed)
    }
}

fn value(flag: &str, next: Option<String>) -> Result<String, ArgsError> {
    next.ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
}
