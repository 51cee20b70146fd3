//! # Low-Stock Evaluator
//!
//! Picks the stock levels that need replenishing and ranks them.
//!
//! ## Evaluation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Vec<StockLevel>                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. quantity = stock_quantity ?? current_quantity ?? 0                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. eligible type?  FULL_ROLL always, CUT_ROLL if include_cut_rolls     │
//! │       │             (bundles, spares and unknown types never)           │
//! │       ▼                                                                 │
//! │  3. quantity ≤ threshold?                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. severity from quantity / threshold                                  │
//! │       ≤ 0.3 critical │ ≤ 0.6 warning │ otherwise low                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  5. sort ascending by quantity (stable)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The dashboard slider offers thresholds 1 to 20 (default 5). The evaluator
//! accepts any value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{FlaggedItem, LowStockSummary, Severity, StockLevel, StockType};
use crate::{DEFAULT_LOW_STOCK_THRESHOLD, MAX_UI_LOW_STOCK_THRESHOLD, MIN_UI_LOW_STOCK_THRESHOLD};

// =============================================================================
// Severity Classification
// =============================================================================

impl Severity {
    /// Classifies a quantity against a threshold.
    ///
    /// Compares `quantity × 10` against `threshold × 3` (and `× 6`) instead
    /// of dividing, so the 30% / 60% boundaries are exact and a zero
    /// threshold needs no special case: anything at or below zero is
    /// critical.
    ///
    /// ## Example
    /// ```rust
    /// use rollstock_core::Severity;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Severity::classify(Decimal::new(15, 1), 5), Severity::Critical); // 0.3
    /// assert_eq!(Severity::classify(Decimal::new(151, 2), 5), Severity::Warning);  // 1.51 / 5
    /// assert_eq!(Severity::classify(Decimal::from(4), 5), Severity::Low);
    /// ```
    pub fn classify(quantity: Decimal, threshold: u32) -> Severity {
        let scaled_quantity = quantity.saturating_mul(Decimal::TEN);
        let threshold = Decimal::from(threshold);

        if scaled_quantity <= threshold * Decimal::from(3) {
            Severity::Critical
        } else if scaled_quantity <= threshold * Decimal::from(6) {
            Severity::Warning
        } else {
            Severity::Low
        }
    }
}

// =============================================================================
// Policy
// =============================================================================

/// Threshold and roll-type inclusion for the low-stock feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LowStockPolicy {
    /// Items at or below this quantity are flagged.
    pub threshold: u32,

    /// Also watch cut rolls, not only full rolls.
    pub include_cut_rolls: bool,
}

impl Default for LowStockPolicy {
    fn default() -> Self {
        LowStockPolicy {
            threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            include_cut_rolls: false,
        }
    }
}

impl LowStockPolicy {
    pub fn new(threshold: u32, include_cut_rolls: bool) -> Self {
        LowStockPolicy {
            threshold,
            include_cut_rolls,
        }
    }

    /// Whether items of this type are watched at all.
    pub fn is_eligible(&self, stock_type: Option<StockType>) -> bool {
        match stock_type {
            Some(StockType::FullRoll) => true,
            Some(StockType::CutRoll) => self.include_cut_rolls,
            _ => false,
        }
    }

    /// Whether the threshold lies within what the dashboard slider offers.
    pub fn is_within_ui_range(&self) -> bool {
        (MIN_UI_LOW_STOCK_THRESHOLD..=MAX_UI_LOW_STOCK_THRESHOLD).contains(&self.threshold)
    }

    /// Flags and ranks the items that fall at or below the threshold.
    ///
    /// Input is not modified; flagged rows are cloned.
    pub fn evaluate<'a, I>(&self, items: I) -> Vec<FlaggedItem>
    where
        I: IntoIterator<Item = &'a StockLevel>,
    {
        let threshold = Decimal::from(self.threshold);

        let mut flagged: Vec<FlaggedItem> = items
            .into_iter()
            .filter(|level| self.is_eligible(level.stock_type))
            .filter_map(|level| {
                let quantity = level.effective_quantity();
                (quantity <= threshold).then(|| FlaggedItem {
                    level: level.clone(),
                    effective_quantity: quantity,
                    severity: Severity::classify(quantity, self.threshold),
                })
            })
            .collect();

        // sort_by is stable: equal quantities keep feed order
        flagged.sort_by(|a, b| a.effective_quantity.cmp(&b.effective_quantity));
        flagged
    }
}

// =============================================================================
// Free Functions
// =============================================================================

/// Flags stock levels at or below `threshold`, lowest stock first.
///
/// ## Example
/// ```rust
/// use rollstock_core::{evaluate, Severity, StockLevel, StockType};
/// use rust_decimal::Decimal;
///
/// let items = vec![
///     StockLevel::new(StockType::FullRoll, Decimal::from(2)),
///     StockLevel::new(StockType::FullRoll, Decimal::from(10)),
///     StockLevel::new(StockType::CutRoll, Decimal::from(1)),
/// ];
///
/// // Cut rolls are not watched; 10 is above the threshold
/// let flagged = evaluate(&items, 5, false);
/// assert_eq!(flagged.len(), 1);
/// assert_eq!(flagged[0].effective_quantity, Decimal::from(2));
/// assert_eq!(flagged[0].severity, Severity::Warning); // 2 / 5 = 0.4
/// ```
pub fn evaluate<'a, I>(items: I, threshold: u32, include_cut_rolls: bool) -> Vec<FlaggedItem>
where
    I: IntoIterator<Item = &'a StockLevel>,
{
    LowStockPolicy::new(threshold, include_cut_rolls).evaluate(items)
}

/// Counts flagged items per severity.
pub fn summarize(flagged: &[FlaggedItem]) -> LowStockSummary {
    flagged
        .iter()
        .fold(LowStockSummary::default(), |mut summary, item| {
            match item.severity {
                Severity::Critical => summary.critical += 1,
                Severity::Warning => summary.warning += 1,
                Severity::Low => summary.low += 1,
            }
            summary
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
