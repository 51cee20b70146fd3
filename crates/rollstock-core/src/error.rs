//! # Error Types
//!
//! Domain-specific error types for rollstock-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rollstock-core errors (this file)                                     │
//! │  ├── CoreError        - Ingestion failures                             │
//! │  └── ValidationError  - Single-field validation failures               │
//! │                                                                         │
//! │  stock-report errors (app)                                             │
//! │  └── ReportError, ArgsError, anyhow at the edge                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError::InvalidStockEntry → caller         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The accounting math itself never fails. Missing lengths, missing counts
//! and unknown stock types contribute nothing. The only rejected input is
//! corrupt data: a negative count or length means the upstream record is
//! broken, and absorbing it as zero would hide that.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while bringing external records into the core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A stock entry failed validation.
    ///
    /// ## When This Occurs
    /// - `quantity` is negative
    /// - `sparePieceCount` or `piecesPerBundle` is negative
    /// - `totalCutLength`, `lengthPerUnit` or `pieceLengthMeters` is negative
    ///
    /// `index` is the record's position in the input array.
    #[error("Invalid stock entry at index {index}: {source}")]
    InvalidStockEntry {
        index: usize,
        source: ValidationError,
    },

    /// The input was not well-formed JSON, or had the wrong shape.
    #[error("Malformed stock data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Validation error outside of a record list.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Single-field validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A count or length that must be zero or more was negative.
    #[error("{field} must not be negative (got {value})")]
    Negative { field: String, value: String },

    /// Invalid format (e.g., unparseable stock type, fractional count).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a Negative error for a field and the offending value.
    pub fn negative(field: impl Into<String>, value: impl ToString) -> Self {
        ValidationError::Negative {
            field: field.into(),
            value: value.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidStockEntry {
            index: 3,
            source: ValidationError::negative("quantity", -2),
        };
        assert_eq!(
            err.to_string(),
            "Invalid stock entry at index 3: quantity must not be negative (got -2)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::InvalidFormat {
            field: "stockType".to_string(),
            reason: "unknown stock type 'PALLET'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "stockType has invalid format: unknown stock type 'PALLET'"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::negative("totalCutLength", "-1.5").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
