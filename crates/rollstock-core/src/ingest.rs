//! # Ingestion Boundary
//!
//! Maps loosely typed records from the inventory service onto the strict
//! domain types. This is the only place where input is validated.
//!
//! ## Record Flow
//! ```text
//! JSON array from the inventory service
//!      │
//!      ▼
//! Vec<RawStockEntry>          numbers as Decimal, stockType as free text,
//!      │                      nulls and missing fields tolerated
//!      ▼
//! RawStockEntry::into_entry   negative / fractional counts → error
//!      │                      unknown stockType            → dropped
//!      ▼
//! Vec<StockEntry>             u64 counts, Meters lengths
//! ```
//!
//! Both camelCase (`lengthPerUnit`) and snake_case (`length_per_unit`)
//! field names are accepted.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::types::{StockEntry, StockLevel, StockType};
use crate::validation::{
    validate_count, validate_optional_count, validate_optional_length, ValidationResult,
};

// =============================================================================
// Raw Stock Entry
// =============================================================================

/// A stock entry exactly as the inventory service sent it.
///
/// Counts are decimals here so that `3`, `3.0` and `"3"` all parse, and so
/// that a bad value is reported as a validation error naming the field
/// rather than as a JSON shape error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStockEntry {
    #[serde(default, alias = "stock_type")]
    pub stock_type: Option<String>,

    #[serde(default)]
    pub quantity: Option<Decimal>,

    #[serde(default, alias = "length_per_unit")]
    pub length_per_unit: Option<Decimal>,

    #[serde(default, alias = "total_cut_length")]
    pub total_cut_length: Option<Decimal>,

    #[serde(default, alias = "pieces_per_bundle")]
    pub pieces_per_bundle: Option<Decimal>,

    #[serde(default, alias = "piece_length_meters")]
    pub piece_length_meters: Option<Decimal>,

    #[serde(default, alias = "spare_piece_count")]
    pub spare_piece_count: Option<Decimal>,

    #[serde(default, alias = "batch_code")]
    pub batch_code: Option<String>,
}

impl RawStockEntry {
    /// Validates the record and converts it to a [`StockEntry`].
    ///
    /// ## Returns
    /// - `Ok(Some(entry))` for a valid record
    /// - `Ok(None)` when `stockType` is missing or not recognized
    /// - `Err(_)` when any count or length is negative, or a count is not a
    ///   whole number
    ///
    /// Numbers are checked before the stock type, so a corrupt record is
    /// reported even when its type would have been ignored.
    pub fn into_entry(self) -> ValidationResult<Option<StockEntry>> {
        let quantity = match self.quantity {
            Some(q) => validate_count("quantity", q)?,
            None => 0,
        };
        let length_per_unit = validate_optional_length("lengthPerUnit", self.length_per_unit)?;
        let total_cut_length = validate_optional_length("totalCutLength", self.total_cut_length)?;
        let pieces_per_bundle = validate_optional_count("piecesPerBundle", self.pieces_per_bundle)?;
        let piece_length_meters =
            validate_optional_length("pieceLengthMeters", self.piece_length_meters)?;
        let spare_piece_count = validate_optional_count("sparePieceCount", self.spare_piece_count)?;

        let stock_type = match self.stock_type.as_deref().map(str::parse::<StockType>) {
            Some(Ok(stock_type)) => stock_type,
            Some(Err(_)) | None => {
                debug!(
                    stock_type = ?self.stock_type,
                    "Skipping entry with unrecognized stock type"
                );
                return Ok(None);
            }
        };

        Ok(Some(StockEntry {
            stock_type,
            quantity,
            length_per_unit,
            total_cut_length,
            pieces_per_bundle,
            piece_length_meters,
            spare_piece_count,
            batch_code: self.batch_code,
        }))
    }
}

// =============================================================================
// Batch Ingestion
// =============================================================================

/// Validates a list of raw records.
///
/// Fails on the first invalid record, reporting its position. Records with
/// unrecognized stock types are dropped.
pub fn ingest_entries<I>(raw: I) -> CoreResult<Vec<StockEntry>>
where
    I: IntoIterator<Item = RawStockEntry>,
{
    let mut entries = Vec::new();
    let mut dropped = 0usize;

    for (index, record) in raw.into_iter().enumerate() {
        match record
            .into_entry()
            .map_err(|source| CoreError::InvalidStockEntry { index, source })?
        {
            Some(entry) => entries.push(entry),
            None => dropped += 1,
        }
    }

    debug!(accepted = entries.len(), dropped, "Ingested stock entries");
    Ok(entries)
}

/// Parses a JSON array of stock entries.
///
/// `null` is treated as an empty list.
///
/// ## Example
/// ```rust
/// use rollstock_core::{parse_stock_entries, CoreError, StockType};
///
/// let entries = parse_stock_entries(
///     r#"[{"stockType": "BUNDLE", "quantity": 3, "piecesPerBundle": 10},
///         {"stockType": "PALLET", "quantity": 1}]"#,
/// ).unwrap();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].stock_type, StockType::Bundle);
///
/// let err = parse_stock_entries(r#"[{"stockType": "FULL_ROLL", "quantity": -1}]"#);
/// assert!(matches!(err, Err(CoreError::InvalidStockEntry { index: 0, .. })));
/// ```
pub fn parse_stock_entries(json: &str) -> CoreResult<Vec<StockEntry>> {
    let raw: Option<Vec<RawStockEntry>> = serde_json::from_str(json)?;
    ingest_entries(raw.unwrap_or_default())
}

/// Parses a JSON array of stock levels for the low-stock feed.
///
/// `null` is treated as an empty list. Rows with unrecognized stock types
/// are kept with `stock_type: None`.
pub fn parse_stock_levels(json: &str) -> CoreResult<Vec<StockLevel>> {
    let levels: Option<Vec<StockLevel>> = serde_json::from_str(json)?;
    let levels = levels.unwrap_or_default();
    debug!(count = levels.len(), "Parsed stock levels");
    Ok(levels)
}

// =============================================================================
// Serde Helpers
// =============================================================================

/// Deserializes an optional stock type, mapping unrecognized names to `None`.
pub(crate) fn lenient_stock_type<'de, D>(deserializer: D) -> Result<Option<StockType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|name| match name.parse::<StockType>() {
        Ok(stock_type) => Some(stock_type),
        Err(_) => {
            debug!(stock_type = %name, "Unrecognized stock type in stock level");
            None
        }
    }))
}

/// Deserializes `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::meters::Meters;

    fn raw(stock_type: &str, quantity: i64) -> RawStockEntry {
        RawStockEntry {
            stock_type: Some(stock_type.to_string()),
            quantity: Some(Decimal::from(quantity)),
            ..Default::default()
        }
    }

    #[test]
    fn test_into_entry_valid() {
        let mut record = raw("CUT_ROLL", 3);
        record.length_per_unit = Some(Decimal::from(6));
        record.total_cut_length = Some(Decimal::from(15));

        let entry = record.into_entry().unwrap().unwrap();
        assert_eq!(entry.stock_type, StockType::CutRoll);
        assert_eq!(entry.quantity, 3);
        assert_eq!(entry.total_cut_length, Some(Meters::from_whole(15)));
    }

    #[test]
    fn test_missing_quantity_is_zero() {
        let record = RawStockEntry {
            stock_type: Some("SPARE".to_string()),
            ..Default::default()
        };
        let entry = record.into_entry().unwrap().unwrap();
        assert_eq!(entry.quantity, 0);
    }

    #[test]
    fn test_unknown_type_is_dropped() {
        assert_eq!(raw("PALLET", 4).into_entry().unwrap(), None);
        assert_eq!(RawStockEntry::default().into_entry().unwrap(), None);
    }

    #[test]
    fn test_negative_fields_rejected() {
        assert_eq!(
            raw("FULL_ROLL", -1).into_entry().unwrap_err(),
            ValidationError::negative("quantity", "-1")
        );

        let mut spare = raw("SPARE", 1);
        spare.spare_piece_count = Some(Decimal::from(-12));
        assert_eq!(
            spare.into_entry().unwrap_err(),
            ValidationError::negative("sparePieceCount", "-12")
        );

        let mut cut = raw("CUT_ROLL", 1);
        cut.total_cut_length = Some(Decimal::new(-5, 1));
        assert_eq!(
            cut.into_entry().unwrap_err(),
            ValidationError::negative("totalCutLength", "-0.5")
        );
    }

    #[test]
    fn test_negative_rejected_even_for_unknown_type() {
        assert!(raw("PALLET", -3).into_entry().is_err());
    }

    #[test]
    fn test_ingest_reports_index() {
        let records = vec![raw("FULL_ROLL", 1), raw("PALLET", 1), raw("BUNDLE", -2)];
        match ingest_entries(records) {
            Err(CoreError::InvalidStockEntry { index, source }) => {
                assert_eq!(index, 2);
                assert_eq!(source, ValidationError::negative("quantity", "-2"));
            }
            other => panic!("expected InvalidStockEntry, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_accepts_snake_case_and_strings() {
        let entries = parse_stock_entries(
            r#"[{"stock_type": "full_roll", "quantity": "2", "length_per_unit": 100.5}]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quantity, 2);
        assert_eq!(entries[0].length_per_unit.map(|m| m.value()), Some(Decimal::new(1005, 1)));
    }

    #[test]
    fn test_parse_null_and_empty() {
        assert!(parse_stock_entries("null").unwrap().is_empty());
        assert!(parse_stock_entries("[]").unwrap().is_empty());
        assert!(parse_stock_levels("null").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(parse_stock_entries("{"), Err(CoreError::Malformed(_))));
        assert!(matches!(
            parse_stock_entries(r#"{"stockType": "BUNDLE"}"#),
            Err(CoreError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_levels_lenient() {
        let levels = parse_stock_levels(
            r#"[
                {"stockType": "FULL_ROLL", "stockQuantity": 2, "batchCode": "B-1",
                 "parameters": {"OD": "32mm"}},
                {"stock_type": "PALLET", "current_quantity": "4.5", "parameters": null}
            ]"#,
        )
        .unwrap();

        assert_eq!(levels[0].stock_type, Some(StockType::FullRoll));
        assert_eq!(levels[0].batch_code.as_deref(), Some("B-1"));
        assert_eq!(levels[0].parameters["OD"], "32mm");

        assert_eq!(levels[1].stock_type, None);
        assert_eq!(levels[1].effective_quantity(), Decimal::new(45, 1));
        assert!(levels[1].parameters.is_empty());
    }
}
