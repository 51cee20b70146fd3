//! # Rollstock Stock Report
//!
//! Prints the quantity breakdown and the low-stock feed for JSON exports
//! from the inventory service.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging                                                  │
//! │     • tracing-subscriber with env filter, output on stderr              │
//! │     • Default: info,rollstock=debug (override with RUST_LOG)            │
//! │                                                                         │
//! │  2. Parse Arguments                                                     │
//! │                                                                         │
//! │  3. Load Configuration                                                  │
//! │     • defaults → report.toml → ROLLSTOCK_* env → command-line flags     │
//! │                                                                         │
//! │  4. Read Exports                                                        │
//! │     • negative counts or lengths abort the report                       │
//! │                                                                         │
//! │  5. Print Report to stdout                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod args;
mod config;
mod error;
mod report;

use anyhow::Context;
use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::{Args, USAGE};
use crate::config::ReportConfig;
use crate::report::{load_entries, load_levels, Report};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse(std::env::args().skip(1)).context("Invalid arguments")?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let mut config = ReportConfig::load(args.config.clone())?;
    apply_args(&mut config, &args);

    if args.save_config {
        let path = config.save(args.config.clone())?;
        info!(?path, "Saved effective settings");
    }

    let entries = args.entries.as_deref().map(load_entries).transpose()?;
    let levels = args.levels.as_deref().map(load_levels).transpose()?;

    let report = Report::build(
        &config,
        entries.as_deref(),
        levels.as_deref(),
        Utc::now(),
    );
    print!("{}", report);

    Ok(())
}

/// Command-line flags win over file and environment settings.
fn apply_args(config: &mut ReportConfig, args: &Args) {
    if let Some(threshold) = args.threshold {
        config.alerts.threshold = threshold;
        config.warn_on_unusual_values();
    }
    if args.include_cut_rolls {
        config.alerts.include_cut_rolls = true;
    }
    if let Some(style) = args.style {
        config.display.style = style;
    }
}

/// Logs go to stderr so the report on stdout can be piped.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rollstock=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
