//! # Display Formatter
//!
//! Human-readable breakdown strings for tables, dispatch slips and reports.
//!
//! ```text
//! QuantityBreakdown { full_rolls: 2, cut_rolls: 0, bundles: 1, spare_pieces: 5 }
//!      │
//!      ├── format_long  → "2 Rolls + 1 Bundle + 5 Spares"
//!      └── format_short → "2R + 1B + 5SP"
//! ```
//!
//! Categories always appear in the order Roll, Cut Roll, Bundle, Spare; zero
//! categories are left out; an empty breakdown is `"0"`.

use std::fmt;

use crate::meters::Meters;
use crate::types::{QuantityBreakdown, StockType};

const SEPARATOR: &str = " + ";
const EMPTY: &str = "0";

/// Joins the phrases of every non-zero category.
fn join_categories<F>(breakdown: &QuantityBreakdown, phrase: F) -> String
where
    F: Fn(u64, StockType) -> String,
{
    let parts: Vec<String> = StockType::ALL
        .iter()
        .filter_map(|&stock_type| {
            let count = breakdown.count(stock_type);
            (count > 0).then(|| phrase(count, stock_type))
        })
        .collect();

    if parts.is_empty() {
        EMPTY.to_string()
    } else {
        parts.join(SEPARATOR)
    }
}

/// Long form, e.g. `"2 Rolls + 1 Cut Roll + 1 Bundle"`.
///
/// ## Example
/// ```rust
/// use rollstock_core::{format_long, QuantityBreakdown};
///
/// let breakdown = QuantityBreakdown { full_rolls: 2, bundles: 1, ..Default::default() };
/// assert_eq!(format_long(&breakdown), "2 Rolls + 1 Bundle");
/// assert_eq!(format_long(&QuantityBreakdown::default()), "0");
/// ```
pub fn format_long(breakdown: &QuantityBreakdown) -> String {
    join_categories(breakdown, |count, stock_type| {
        let plural = if count == 1 { "" } else { "s" };
        format!("{} {}{}", count, stock_type.label(), plural)
    })
}

/// Short form, e.g. `"1R + 5SP"`. Codes are never pluralized.
///
/// ## Example
/// ```rust
/// use rollstock_core::{format_short, QuantityBreakdown};
///
/// let breakdown = QuantityBreakdown { full_rolls: 1, spare_pieces: 5, ..Default::default() };
/// assert_eq!(format_short(&breakdown), "1R + 5SP");
/// ```
pub fn format_short(breakdown: &QuantityBreakdown) -> String {
    join_categories(breakdown, |count, stock_type| {
        format!("{}{}", count, stock_type.code())
    })
}

/// Total length for reports, e.g. `"1250.5 m"`.
pub fn format_meters(meters: Meters) -> String {
    meters.to_string()
}

/// Displays the long form.
impl fmt::Display for QuantityBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_long(self))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn breakdown(full: u64, cut: u64, bundles: u64, spares: u64) -> QuantityBreakdown {
        QuantityBreakdown {
            full_rolls: full,
            cut_rolls: cut,
            bundles,
            spare_pieces: spares,
            ..Default::default()
        }
    }

    #[test]
    fn test_all_zero() {
        assert_eq!(format_long(&breakdown(0, 0, 0, 0)), "0");
        assert_eq!(format_short(&breakdown(0, 0, 0, 0)), "0");
    }

    #[test]
    fn test_long_pluralization() {
        assert_eq!(format_long(&breakdown(2, 0, 1, 0)), "2 Rolls + 1 Bundle");
        assert_eq!(format_long(&breakdown(1, 1, 0, 0)), "1 Roll + 1 Cut Roll");
        assert_eq!(
            format_long(&breakdown(3, 2, 4, 1)),
            "3 Rolls + 2 Cut Rolls + 4 Bundles + 1 Spare"
        );
        assert_eq!(format_long(&breakdown(0, 0, 0, 12)), "12 Spares");
    }

    #[test]
    fn test_short_codes() {
        assert_eq!(format_short(&breakdown(1, 0, 0, 5)), "1R + 5SP");
        assert_eq!(format_short(&breakdown(2, 3, 1, 0)), "2R + 3CR + 1B");
    }

    #[test]
    fn test_ignores_total_items() {
        let mut b = breakdown(0, 0, 0, 0);
        b.total_items = 40;
        b.bundle_pieces = 40;
        assert_eq!(format_long(&b), "0");
    }

    #[test]
    fn test_display_is_long_form() {
        assert_eq!(breakdown(2, 0, 1, 0).to_string(), "2 Rolls + 1 Bundle");
    }

    #[test]
    fn test_format_meters() {
        let meters = Meters::new(Decimal::new(125050, 2)).unwrap();
        assert_eq!(format_meters(meters), "1250.5 m");
        assert_eq!(format_meters(Meters::zero()), "0 m");
    }
}
