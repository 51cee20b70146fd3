//! # Quantity Aggregator
//!
//! Reduces stock entries to a [`QuantityBreakdown`] and to a total length.
//!
//! ## Per-type rules
//! ```text
//! ┌────────────┬──────────────────────────┬─────────────────────────┬──────────────────────────────────────┐
//! │ stock type │ category count           │ total_items             │ meters                               │
//! ├────────────┼──────────────────────────┼─────────────────────────┼──────────────────────────────────────┤
//! │ FULL_ROLL  │ full_rolls   += qty      │ += qty                  │ qty × length_per_unit                │
//! │ CUT_ROLL   │ cut_rolls    += qty      │ += qty                  │ total_cut_length, else qty × length  │
//! │ BUNDLE     │ bundles      += qty      │ += qty × pieces/bundle  │ qty × pieces/bundle × piece length   │
//! │ SPARE      │ spare_pieces += spares   │ += spares               │ spares × piece length                │
//! └────────────┴──────────────────────────┴─────────────────────────┴──────────────────────────────────────┘
//!   spares = spare_piece_count if present, else qty
//!   any missing number counts as 0
//! ```
//!
//! The two override fields replace, never add to, the value they override:
//! a cut-roll lot with `total_cut_length` ignores `qty × length_per_unit`,
//! and a spare lot with `spare_piece_count` ignores `quantity`.

use std::collections::BTreeMap;

use crate::meters::Meters;
use crate::types::{QuantityBreakdown, StockEntry, StockType};

// =============================================================================
// Per-Entry Quantities
// =============================================================================

impl StockEntry {
    /// Piece count of a spare lot: `spare_piece_count`, else `quantity`.
    #[inline]
    pub fn effective_spare_count(&self) -> u64 {
        self.spare_piece_count.unwrap_or(self.quantity)
    }

    /// Pieces held in a bundle lot: `quantity × pieces_per_bundle`.
    #[inline]
    pub fn bundle_pieces(&self) -> u64 {
        self.quantity.saturating_mul(self.pieces_per_bundle.unwrap_or(0))
    }

    /// Length this entry contributes to [`total_meters`].
    ///
    /// ## Example
    /// ```rust
    /// use rollstock_core::{Meters, StockEntry, StockType};
    ///
    /// let cut = StockEntry::new(StockType::CutRoll, 3)
    ///     .with_length_per_unit(Meters::from_whole(6))
    ///     .with_total_cut_length(Meters::from_whole(15));
    ///
    /// // The recorded total wins over 3 × 6
    /// assert_eq!(cut.meters(), Meters::from_whole(15));
    /// ```
    pub fn meters(&self) -> Meters {
        let unit_length = self.length_per_unit.unwrap_or_default();
        let piece_length = self.piece_length_meters.unwrap_or_default();

        match self.stock_type {
            StockType::FullRoll => unit_length.times(self.quantity),
            StockType::CutRoll => self
                .total_cut_length
                .unwrap_or_else(|| unit_length.times(self.quantity)),
            StockType::Bundle => piece_length.times(self.bundle_pieces()),
            StockType::Spare => piece_length.times(self.effective_spare_count()),
        }
    }
}

impl QuantityBreakdown {
    /// Adds one entry to the breakdown.
    pub fn add_entry(&mut self, entry: &StockEntry) {
        match entry.stock_type {
            StockType::FullRoll => {
                self.full_rolls = self.full_rolls.saturating_add(entry.quantity);
                self.total_items = self.total_items.saturating_add(entry.quantity);
            }
            StockType::CutRoll => {
                self.cut_rolls = self.cut_rolls.saturating_add(entry.quantity);
                self.total_items = self.total_items.saturating_add(entry.quantity);
            }
            StockType::Bundle => {
                let pieces = entry.bundle_pieces();
                self.bundles = self.bundles.saturating_add(entry.quantity);
                self.bundle_pieces = self.bundle_pieces.saturating_add(pieces);
                self.total_items = self.total_items.saturating_add(pieces);
            }
            StockType::Spare => {
                let spares = entry.effective_spare_count();
                self.spare_pieces = self.spare_pieces.saturating_add(spares);
                self.total_items = self.total_items.saturating_add(spares);
            }
        }
    }
}

impl<'a> Extend<&'a StockEntry> for QuantityBreakdown {
    fn extend<I: IntoIterator<Item = &'a StockEntry>>(&mut self, entries: I) {
        for entry in entries {
            self.add_entry(entry);
        }
    }
}

impl<'a> FromIterator<&'a StockEntry> for QuantityBreakdown {
    fn from_iter<I: IntoIterator<Item = &'a StockEntry>>(entries: I) -> Self {
        let mut breakdown = QuantityBreakdown::default();
        breakdown.extend(entries);
        breakdown
    }
}

// =============================================================================
// Reductions
// =============================================================================

/// Reduces entries to per-category counts.
///
/// An empty input gives an all-zero breakdown.
///
/// ## Example
/// ```rust
/// use rollstock_core::{aggregate, StockEntry, StockType};
///
/// let entries = vec![
///     StockEntry::new(StockType::Bundle, 3).with_pieces_per_bundle(10),
///     StockEntry::new(StockType::Spare, 1).with_spare_piece_count(12),
/// ];
///
/// let breakdown = aggregate(&entries);
/// assert_eq!(breakdown.bundles, 3);
/// assert_eq!(breakdown.spare_pieces, 12);
/// assert_eq!(breakdown.total_items, 42);
/// ```
pub fn aggregate<'a, I>(entries: I) -> QuantityBreakdown
where
    I: IntoIterator<Item = &'a StockEntry>,
{
    entries.into_iter().collect()
}

/// Sums the length of every entry.
///
/// Entries without length data contribute zero.
pub fn total_meters<'a, I>(entries: I) -> Meters
where
    I: IntoIterator<Item = &'a StockEntry>,
{
    entries.into_iter().map(StockEntry::meters).sum()
}

/// Groups entries by a key and aggregates each group.
///
/// ## Example
/// ```rust
/// use rollstock_core::{aggregate_by, StockEntry, StockType};
///
/// let entries = vec![
///     StockEntry::new(StockType::FullRoll, 2).with_batch_code("B-001"),
///     StockEntry::new(StockType::FullRoll, 1).with_batch_code("B-002"),
///     StockEntry::new(StockType::CutRoll, 4).with_batch_code("B-001"),
/// ];
///
/// let by_batch = aggregate_by(&entries, |e| e.batch_code.clone());
/// assert_eq!(by_batch[&Some("B-001".to_string())].total_rolls(), 6);
/// assert_eq!(by_batch[&Some("B-002".to_string())].full_rolls, 1);
/// ```
pub fn aggregate_by<'a, I, K, F>(entries: I, mut key: F) -> BTreeMap<K, QuantityBreakdown>
where
    I: IntoIterator<Item = &'a StockEntry>,
    K: Ord,
    F: FnMut(&StockEntry) -> K,
{
    let mut groups: BTreeMap<K, QuantityBreakdown> = BTreeMap::new();
    for entry in entries {
        groups.entry(key(entry)).or_default().add_entry(entry);
    }
    groups
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn m(value: i64, scale: u32) -> Meters {
        Meters::new(Decimal::new(value, scale)).unwrap()
    }

    #[test]
    fn test_empty() {
        let entries: Vec<StockEntry> = Vec::new();
        assert_eq!(aggregate(&entries), QuantityBreakdown::default());
        assert_eq!(total_meters(&entries), Meters::zero());
    }

    #[test]
    fn test_full_roll() {
        let entries =
            vec![StockEntry::new(StockType::FullRoll, 4).with_length_per_unit(m(1005, 1))];
        let breakdown = aggregate(&entries);
        assert_eq!(breakdown.full_rolls, 4);
        assert_eq!(breakdown.total_items, 4);
        assert_eq!(total_meters(&entries), m(402, 0));
    }

    #[test]
    fn test_full_roll_without_length() {
        let entries = vec![StockEntry::new(StockType::FullRoll, 4)];
        assert_eq!(aggregate(&entries).full_rolls, 4);
        assert_eq!(total_meters(&entries), Meters::zero());
    }

    #[test]
    fn test_bundle_scales_by_pieces() {
        let entries = vec![StockEntry::new(StockType::Bundle, 3).with_pieces_per_bundle(10)];
        let breakdown = aggregate(&entries);
        assert_eq!(breakdown.bundles, 3);
        assert_eq!(breakdown.bundle_pieces, 30);
        assert_eq!(breakdown.total_items, 30);
    }

    #[test]
    fn test_bundle_without_pieces_per_bundle() {
        let entries = vec![StockEntry::new(StockType::Bundle, 3).with_piece_length(m(6, 0))];
        let breakdown = aggregate(&entries);
        assert_eq!(breakdown.bundles, 3);
        assert_eq!(breakdown.total_items, 0);
        assert_eq!(total_meters(&entries), Meters::zero());
    }

    #[test]
    fn test_bundle_meters() {
        let entry = StockEntry::new(StockType::Bundle, 2)
            .with_pieces_per_bundle(10)
            .with_piece_length(m(6, 0));
        assert_eq!(entry.meters(), m(120, 0));
    }

    #[test]
    fn test_spare_override_replaces_quantity() {
        let entries = vec![StockEntry::new(StockType::Spare, 1)
            .with_spare_piece_count(12)
            .with_piece_length(m(6, 0))];
        let breakdown = aggregate(&entries);
        assert_eq!(breakdown.spare_pieces, 12);
        assert_eq!(breakdown.total_items, 12);
        assert_eq!(total_meters(&entries), m(72, 0));
    }

    #[test]
    fn test_spare_without_override_uses_quantity() {
        let entries = vec![StockEntry::new(StockType::Spare, 5).with_piece_length(m(25, 1))];
        assert_eq!(aggregate(&entries).spare_pieces, 5);
        assert_eq!(total_meters(&entries), m(125, 1));
    }

    #[test]
    fn test_spare_override_of_zero_wins() {
        let entry = StockEntry::new(StockType::Spare, 5).with_spare_piece_count(0);
        assert_eq!(aggregate([&entry]).spare_pieces, 0);
    }

    #[test]
    fn test_cut_roll_override_replaces_product() {
        let entries = vec![StockEntry::new(StockType::CutRoll, 3)
            .with_length_per_unit(m(6, 0))
            .with_total_cut_length(m(15, 0))];
        assert_eq!(total_meters(&entries), m(15, 0));
        assert_eq!(aggregate(&entries).cut_rolls, 3);
    }

    #[test]
    fn test_cut_roll_without_override() {
        let entry = StockEntry::new(StockType::CutRoll, 3).with_length_per_unit(m(6, 0));
        assert_eq!(entry.meters(), m(18, 0));
    }

    #[test]
    fn test_zero_quantity_contributes_nothing() {
        let entries = vec![
            StockEntry::new(StockType::FullRoll, 0).with_length_per_unit(m(100, 0)),
            StockEntry::new(StockType::Bundle, 0).with_pieces_per_bundle(10),
        ];
        let breakdown = aggregate(&entries);
        assert!(breakdown.is_empty());
        assert_eq!(breakdown.total_items, 0);
        assert_eq!(total_meters(&entries), Meters::zero());
    }

    #[test]
    fn test_mixed_batch() {
        let entries = vec![
            StockEntry::new(StockType::FullRoll, 2).with_length_per_unit(m(100, 0)),
            StockEntry::new(StockType::CutRoll, 1).with_total_cut_length(m(375, 1)),
            StockEntry::new(StockType::Bundle, 1)
                .with_pieces_per_bundle(10)
                .with_piece_length(m(6, 0)),
            StockEntry::new(StockType::Spare, 1)
                .with_spare_piece_count(3)
                .with_piece_length(m(6, 0)),
        ];

        let breakdown = aggregate(&entries);
        assert_eq!(
            breakdown,
            QuantityBreakdown {
                full_rolls: 2,
                cut_rolls: 1,
                bundles: 1,
                spare_pieces: 3,
                bundle_pieces: 10,
                total_items: 16,
            }
        );
        assert_eq!(breakdown.total_rolls(), 3);
        assert_eq!(breakdown.total_pieces(), 13);
        // 200 + 37.5 + 60 + 18
        assert_eq!(total_meters(&entries), m(3155, 1));
    }

    #[test]
    fn test_saturates_instead_of_overflowing() {
        let entries = vec![
            StockEntry::new(StockType::Bundle, u64::MAX).with_pieces_per_bundle(2),
            StockEntry::new(StockType::FullRoll, 1),
        ];
        assert_eq!(aggregate(&entries).total_items, u64::MAX);
    }

    #[test]
    fn test_aggregate_by_batch() {
        let entries = vec![
            StockEntry::new(StockType::FullRoll, 2).with_batch_code("B-1"),
            StockEntry::new(StockType::Spare, 4),
            StockEntry::new(StockType::FullRoll, 1).with_batch_code("B-1"),
        ];
        let groups = aggregate_by(&entries, |e| e.batch_code.clone());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&Some("B-1".to_string())].full_rolls, 3);
        assert_eq!(groups[&None].spare_pieces, 4);

        let total = groups.values().fold(QuantityBreakdown::default(), |acc, b| acc + *b);
        assert_eq!(total, aggregate(&entries));
    }
}
