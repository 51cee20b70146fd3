//! # Validation Module
//!
//! Field-level checks applied once, when records enter the core.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Inventory service / front-end forms                          │
//! │  └── Whatever they enforce (not trusted)                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: ingest (Rust)                                                │
//! │  ├── Shape: serde into RawStockEntry                                   │
//! │  └── THIS MODULE: counts are whole and ≥ 0, lengths ≥ 0                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Types                                                        │
//! │  └── u64 counts and Meters cannot go negative after this point        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rollstock_core::validation::{validate_count, validate_length};
//! use rust_decimal::Decimal;
//!
//! assert_eq!(validate_count("quantity", Decimal::from(3)).unwrap(), 3);
//! assert!(validate_count("quantity", Decimal::from(-1)).is_err());
//! assert!(validate_length("lengthPerUnit", Decimal::new(-5, 1)).is_err());
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::meters::Meters;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Counts
// =============================================================================

/// Validates a count of discrete units (rolls, bundles, pieces).
///
/// ## Rules
/// - Must not be negative
/// - Must be a whole number (`3.0` is fine, `2.5` is not)
/// - Must fit in a `u64`
pub fn validate_count(field: &str, value: Decimal) -> ValidationResult<u64> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::negative(field, value));
    }

    if !value.fract().is_zero() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("must be a whole number (got {})", value),
        });
    }

    value.to_u64().ok_or_else(|| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("too large (got {})", value),
    })
}

/// Validates an optional count; `None` stays `None`.
pub fn validate_optional_count(
    field: &str,
    value: Option<Decimal>,
) -> ValidationResult<Option<u64>> {
    value.map(|v| validate_count(field, v)).transpose()
}

// =============================================================================
// Lengths
// =============================================================================

/// Validates a length in meters.
///
/// ## Rules
/// - Must not be negative
/// - Zero is allowed (it simply contributes nothing)
pub fn validate_length(field: &str, value: Decimal) -> ValidationResult<Meters> {
    Meters::new(value).map_err(|_| ValidationError::negative(field, value))
}

/// Validates an optional length; `None` stays `None`.
pub fn validate_optional_length(
    field: &str,
    value: Option<Decimal>,
) -> ValidationResult<Option<Meters>> {
    value.map(|v| validate_length(field, v)).transpose()
}

// =============================================================================
// Unit Tests
// =============================================================================
