//! # Stock Report
//!
//! Builds the printable report from the loaded exports and settings.
//!
//! ## Report Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stock report (generated 2026-01-05 09:30 UTC)                         │
//! │                                                                         │
//! │  Stock on hand: 2 Rolls + 3 Cut Rolls + 1 Bundle + 12 Spares           │
//! │    Rolls: 5  Pieces: 22  Total items: 27                               │
//! │    Total length: 347 m                                                 │
//! │                                                                         │
//! │  By batch:                                                             │
//! │    HDPE-32-001       2 Rolls + 3 Cut Rolls                             │
//! │                                                                         │
//! │  Low stock (threshold 5, full rolls only): 1 item                      │
//! │    warning   2       HDPE-32-001  Aqua HDPE Pipe                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use rollstock_core::{
    aggregate, aggregate_by, format_long, format_meters, format_short, parse_stock_entries,
    parse_stock_levels, summarize, total_meters, FlaggedItem, LowStockPolicy, LowStockSummary,
    Meters, QuantityBreakdown, StockEntry, StockLevel,
};
use tracing::info;

use crate::config::{DisplayStyle, ReportConfig};
use crate::error::{ReportError, ReportResult};

// =============================================================================
// Input Loading
// =============================================================================

fn read_input(path: &Path) -> ReportResult<String> {
    std::fs::read_to_string(path).map_err(|source| ReportError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and validates a stock entry export.
pub fn load_entries(path: &Path) -> ReportResult<Vec<StockEntry>> {
    let entries = parse_stock_entries(&read_input(path)?).map_err(|source| {
        ReportError::InvalidInput {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!(?path, count = entries.len(), "Loaded stock entries");
    Ok(entries)
}

/// Reads a stock level export.
pub fn load_levels(path: &Path) -> ReportResult<Vec<StockLevel>> {
    let levels = parse_stock_levels(&read_input(path)?).map_err(|source| {
        ReportError::InvalidInput {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!(?path, count = levels.len(), "Loaded stock levels");
    Ok(levels)
}

// =============================================================================
// Report
// =============================================================================

/// Totals for one stock entry export.
#[derive(Debug, Clone, PartialEq)]
pub struct StockSection {
    pub breakdown: QuantityBreakdown,
    pub total_meters: Meters,
    pub by_batch: BTreeMap<Option<String>, QuantityBreakdown>,
}

impl StockSection {
    pub fn new(entries: &[StockEntry]) -> Self {
        StockSection {
            breakdown: aggregate(entries),
            total_meters: total_meters(entries),
            by_batch: aggregate_by(entries, |entry| entry.batch_code.clone()),
        }
    }
}

/// Flagged items for one stock level export.
#[derive(Debug, Clone, PartialEq)]
pub struct LowStockSection {
    pub policy: LowStockPolicy,
    pub flagged: Vec<FlaggedItem>,
    pub summary: LowStockSummary,
}

impl LowStockSection {
    pub fn new(policy: LowStockPolicy, levels: &[StockLevel]) -> Self {
        let flagged = policy.evaluate(levels);
        let summary = summarize(&flagged);
        LowStockSection {
            policy,
            flagged,
            summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub style: DisplayStyle,
    pub stock: Option<StockSection>,
    pub low_stock: Option<LowStockSection>,
}

impl Report {
    pub fn build(
        config: &ReportConfig,
        entries: Option<&[StockEntry]>,
        levels: Option<&[StockLevel]>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Report {
            generated_at,
            style: config.display.style,
            stock: entries.map(StockSection::new),
            low_stock: levels.map(|levels| LowStockSection::new(config.policy(), levels)),
        }
    }

    fn label(&self, breakdown: &QuantityBreakdown) -> String {
        match self.style {
            DisplayStyle::Long => format_long(breakdown),
            DisplayStyle::Short => format_short(breakdown),
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Stock report (generated {})",
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        )?;

        if self.stock.is_none() && self.low_stock.is_none() {
            writeln!(f)?;
            writeln!(f, "Nothing to report. Pass --entries and/or --levels.")?;
        }

        if let Some(stock) = &self.stock {
            let b = &stock.breakdown;
            writeln!(f)?;
            writeln!(f, "Stock on hand: {}", self.label(b))?;
            writeln!(
                f,
                "  Rolls: {}  Pieces: {}  Total items: {}",
                b.total_rolls(),
                b.total_pieces(),
                b.total_items
            )?;
            writeln!(f, "  Total length: {}", format_meters(stock.total_meters))?;

            let batches: Vec<_> = stock
                .by_batch
                .iter()
                .filter_map(|(code, b)| code.as_ref().map(|code| (code, b)))
                .filter(|(_, b)| !b.is_empty())
                .collect();
            if !batches.is_empty() {
                writeln!(f)?;
                writeln!(f, "By batch:")?;
                for (code, b) in batches {
                    writeln!(f, "  {:<16}  {}", code, self.label(b))?;
                }
            }
        }

        if let Some(low) = &self.low_stock {
            let watched = if low.policy.include_cut_rolls {
                "full and cut rolls"
            } else {
                "full rolls only"
            };
            writeln!(f)?;
            write!(
                f,
                "Low stock (threshold {}, {}): {}",
                low.policy.threshold,
                watched,
                plural(low.flagged.len(), "item")
            )?;
            if low.summary.total() > 0 {
                write!(
                    f,
                    " ({} critical, {} warning, {} low)",
                    low.summary.critical, low.summary.warning, low.summary.low
                )?;
            }
            writeln!(f)?;

            for item in &low.flagged {
                let level = &item.level;
                let product: Vec<&str> = [level.brand.as_deref(), level.product_type.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect();
                writeln!(
                    f,
                    "  {:<8}  {:<6}  {:<16}  {}",
                    item.severity.to_string(),
                    item.effective_quantity.normalize().to_string(),
                    level.batch_code.as_deref().unwrap_or("-"),
                    product.join(" ")
                )?;
            }
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
