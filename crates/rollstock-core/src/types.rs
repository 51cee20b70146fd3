//! # Domain Types
//!
//! Core domain types used throughout Rollstock.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌───────────────────┐   ┌─────────────────┐     │
//! │  │   StockEntry    │   │ QuantityBreakdown │   │   StockLevel    │     │
//! │  │  ─────────────  │   │  ───────────────  │   │  ─────────────  │     │
//! │  │  stock_type     │──►│  full_rolls       │   │  stock_type     │     │
//! │  │  quantity       │   │  cut_rolls        │   │  stock_quantity │     │
//! │  │  lengths (m)    │   │  bundles          │   │  batch_code ... │     │
//! │  │  piece counts   │   │  spare_pieces     │   └────────┬────────┘     │
//! │  └─────────────────┘   │  total_items      │            │              │
//! │                        └───────────────────┘            ▼              │
//! │  ┌─────────────────┐                         ┌─────────────────┐       │
//! │  │   StockType     │                         │   FlaggedItem   │       │
//! │  │  FULL_ROLL      │                         │  level          │       │
//! │  │  CUT_ROLL       │                         │  quantity       │       │
//! │  │  BUNDLE, SPARE  │                         │  severity       │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Wire names are camelCase; stock types are SCREAMING_SNAKE_CASE.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::ingest::{lenient_stock_type, null_as_default};
use crate::meters::Meters;

// =============================================================================
// Stock Type
// =============================================================================

/// The physical form a lot of stock takes.
///
/// Each variant has exactly one formula for its counts and its length; see
/// [`crate::aggregate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockType {
    /// A complete, uncut roll.
    FullRoll,
    /// A roll cut to a (possibly irregular) length.
    CutRoll,
    /// A pack of a fixed number of discrete pieces.
    Bundle,
    /// Loose pieces that do not make up a full bundle.
    Spare,
}

impl StockType {
    /// All stock types in display order.
    pub const ALL: [StockType; 4] = [
        StockType::FullRoll,
        StockType::CutRoll,
        StockType::Bundle,
        StockType::Spare,
    ];

    /// Singular label used in long-form breakdowns.
    pub const fn label(&self) -> &'static str {
        match self {
            StockType::FullRoll => "Roll",
            StockType::CutRoll => "Cut Roll",
            StockType::Bundle => "Bundle",
            StockType::Spare => "Spare",
        }
    }

    /// Code used in short-form breakdowns.
    pub const fn code(&self) -> &'static str {
        match self {
            StockType::FullRoll => "R",
            StockType::CutRoll => "CR",
            StockType::Bundle => "B",
            StockType::Spare => "SP",
        }
    }

    /// Wire name, e.g. `FULL_ROLL`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            StockType::FullRoll => "FULL_ROLL",
            StockType::CutRoll => "CUT_ROLL",
            StockType::Bundle => "BUNDLE",
            StockType::Spare => "SPARE",
        }
    }

    /// Returns true for full and cut rolls.
    pub const fn is_roll(&self) -> bool {
        matches!(self, StockType::FullRoll | StockType::CutRoll)
    }
}

impl fmt::Display for StockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a stock type leniently: case-insensitive, and `-` or spaces are
/// accepted in place of `_` (`"full roll"`, `"Cut-Roll"`).
impl FromStr for StockType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect();

        match normalized.as_str() {
            "FULL_ROLL" => Ok(StockType::FullRoll),
            "CUT_ROLL" => Ok(StockType::CutRoll),
            "BUNDLE" => Ok(StockType::Bundle),
            "SPARE" => Ok(StockType::Spare),
            _ => Err(ValidationError::InvalidFormat {
                field: "stockType".to_string(),
                reason: format!("unknown stock type '{}'", s),
            }),
        }
    }
}

// =============================================================================
// Stock Entry
// =============================================================================

/// One homogeneous lot of physical stock within a batch.
///
/// Counts are unsigned and lengths are [`Meters`], so a `StockEntry` cannot
/// hold negative data. Records from outside the crate come in through
/// [`crate::ingest`].
///
/// ## Which fields matter per type
/// | stock_type | count                      | length                                   |
/// |------------|----------------------------|------------------------------------------|
/// | FULL_ROLL  | quantity                   | quantity × length_per_unit               |
/// | CUT_ROLL   | quantity                   | total_cut_length, else qty × length      |
/// | BUNDLE     | quantity × pieces_per_bundle | pieces × piece_length_meters           |
/// | SPARE      | spare_piece_count, else qty | count × piece_length_meters             |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockEntry {
    pub stock_type: StockType,

    /// Count of units of this type (rolls, cut pieces, bundles, spare groups).
    pub quantity: u64,

    /// Length of one full roll, or nominal length of one cut roll.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_per_unit: Option<Meters>,

    /// Authoritative total length of a cut-roll lot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cut_length: Option<Meters>,

    /// Pieces in one bundle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pieces_per_bundle: Option<u64>,

    /// Length of one bundle or spare piece.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub piece_length_meters: Option<Meters>,

    /// Authoritative piece count of a spare lot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spare_piece_count: Option<u64>,

    /// Production batch this lot belongs to. Passthrough only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_code: Option<String>,
}

impl StockEntry {
    /// Creates an entry with only a type and a quantity.
    pub fn new(stock_type: StockType, quantity: u64) -> Self {
        StockEntry {
            stock_type,
            quantity,
            length_per_unit: None,
            total_cut_length: None,
            pieces_per_bundle: None,
            piece_length_meters: None,
            spare_piece_count: None,
            batch_code: None,
        }
    }

    pub fn with_length_per_unit(mut self, length: Meters) -> Self {
        self.length_per_unit = Some(length);
        self
    }

    pub fn with_total_cut_length(mut self, length: Meters) -> Self {
        self.total_cut_length = Some(length);
        self
    }

    pub fn with_pieces_per_bundle(mut self, pieces: u64) -> Self {
        self.pieces_per_bundle = Some(pieces);
        self
    }

    pub fn with_piece_length(mut self, length: Meters) -> Self {
        self.piece_length_meters = Some(length);
        self
    }

    pub fn with_spare_piece_count(mut self, pieces: u64) -> Self {
        self.spare_piece_count = Some(pieces);
        self
    }

    pub fn with_batch_code(mut self, batch_code: impl Into<String>) -> Self {
        self.batch_code = Some(batch_code.into());
        self
    }
}

// =============================================================================
// Quantity Breakdown
// =============================================================================

/// Per-category counts for a set of stock entries.
///
/// Computed on demand by [`crate::aggregate::aggregate`], never persisted.
///
/// ## `total_items` is unit-ambiguous
/// It adds rolls (counted as rolls) to bundle and spare *pieces*. Dashboards
/// have always shown it that way, so it is kept. New code should prefer
/// [`QuantityBreakdown::total_rolls`] and [`QuantityBreakdown::total_pieces`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuantityBreakdown {
    pub full_rolls: u64,
    pub cut_rolls: u64,
    pub bundles: u64,
    pub spare_pieces: u64,
    /// Pieces held inside bundles (bundles × pieces per bundle).
    #[serde(default)]
    pub bundle_pieces: u64,
    pub total_items: u64,
}

impl QuantityBreakdown {
    /// Count shown for a stock type (spare *pieces* for SPARE).
    pub const fn count(&self, stock_type: StockType) -> u64 {
        match stock_type {
            StockType::FullRoll => self.full_rolls,
            StockType::CutRoll => self.cut_rolls,
            StockType::Bundle => self.bundles,
            StockType::Spare => self.spare_pieces,
        }
    }

    /// Full rolls plus cut rolls.
    pub fn total_rolls(&self) -> u64 {
        self.full_rolls.saturating_add(self.cut_rolls)
    }

    /// Discrete pieces: pieces in bundles plus spare pieces.
    pub fn total_pieces(&self) -> u64 {
        self.bundle_pieces.saturating_add(self.spare_pieces)
    }

    /// True when every category count is zero.
    pub fn is_empty(&self) -> bool {
        StockType::ALL.iter().all(|t| self.count(*t) == 0)
    }
}

impl Add for QuantityBreakdown {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl AddAssign for QuantityBreakdown {
    fn add_assign(&mut self, other: Self) {
        self.full_rolls = self.full_rolls.saturating_add(other.full_rolls);
        self.cut_rolls = self.cut_rolls.saturating_add(other.cut_rolls);
        self.bundles = self.bundles.saturating_add(other.bundles);
        self.spare_pieces = self.spare_pieces.saturating_add(other.spare_pieces);
        self.bundle_pieces = self.bundle_pieces.saturating_add(other.bundle_pieces);
        self.total_items = self.total_items.saturating_add(other.total_items);
    }
}

// =============================================================================
// Stock Level
// =============================================================================

/// One row of the low-stock feed: current quantity of a product variant in a
/// batch, plus display metadata that is passed through untouched.
///
/// Deserialization is lenient: an unrecognized `stockType` becomes `None`
/// (the row is then never flagged), and `null` parameters become empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    #[serde(default, alias = "stock_type", deserialize_with = "lenient_stock_type")]
    pub stock_type: Option<StockType>,

    /// Preferred quantity source.
    #[serde(default, alias = "stock_quantity")]
    #[ts(as = "Option<String>")]
    pub stock_quantity: Option<Decimal>,

    /// Fallback quantity source when `stock_quantity` is absent.
    #[serde(default, alias = "current_quantity")]
    #[ts(as = "Option<String>")]
    pub current_quantity: Option<Decimal>,

    #[serde(default, alias = "batch_code")]
    pub batch_code: Option<String>,

    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default, alias = "product_type")]
    pub product_type: Option<String>,

    /// Product parameters such as outer diameter or pressure class.
    #[serde(default, deserialize_with = "null_as_default")]
    #[ts(type = "Record<string, unknown>")]
    pub parameters: BTreeMap<String, serde_json::Value>,
}

impl StockLevel {
    /// Creates a level row with a type and a stock quantity.
    pub fn new(stock_type: StockType, quantity: Decimal) -> Self {
        StockLevel {
            stock_type: Some(stock_type),
            stock_quantity: Some(quantity),
            ..Default::default()
        }
    }

    /// `stock_quantity`, else `current_quantity`, else zero.
    pub fn effective_quantity(&self) -> Decimal {
        self.stock_quantity
            .or(self.current_quantity)
            .unwrap_or(Decimal::ZERO)
    }
}

// =============================================================================
// Severity
// =============================================================================

/// Urgency tier of a low-stock item. Orders most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// At or below 30% of the threshold.
    Critical,
    /// Above 30%, at or below 60% of the threshold.
    Warning,
    /// Above 60% of the threshold.
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Warning => write!(f, "warning"),
            Severity::Low => write!(f, "low"),
        }
    }
}

// =============================================================================
// Flagged Item
// =============================================================================

/// A stock level that fell at or below the low-stock threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FlaggedItem {
    #[serde(flatten)]
    pub level: StockLevel,

    /// The quantity the threshold was tested against.
    #[ts(as = "String")]
    pub effective_quantity: Decimal,

    pub severity: Severity,
}

/// Flagged item counts per severity, for dashboard badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LowStockSummary {
    pub critical: usize,
    pub warning: usize,
    pub low: usize,
}

impl LowStockSummary {
    pub fn total(&self) -> usize {
        self.critical + self.warning + self.low
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
