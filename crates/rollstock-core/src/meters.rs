//! # Meters Module
//!
//! Provides the `Meters` type for lengths of rolls and pieces.
//!
//! ## Why Decimal Meters?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    3 × 6.1 = 18.299999999999997  ❌ shows up on a dispatch slip         │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    3 × 6.1 = 18.3 exactly                                              │
//! │                                                                         │
//! │  AND: lengths are never negative. A negative length coming from the    │
//! │  inventory service is corrupt data and is rejected on construction.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rollstock_core::meters::Meters;
//! use rust_decimal::Decimal;
//!
//! let roll = Meters::new(Decimal::new(61, 1)).unwrap(); // 6.1 m
//! assert_eq!(roll.times(3).to_string(), "18.3 m");
//!
//! assert!(Meters::new(Decimal::new(-1, 0)).is_err());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Meters Type
// =============================================================================

/// A non-negative length in meters.
///
/// ## Design Decisions
/// - **Decimal**: exact base-10 arithmetic, so totals match what people
///   compute by hand from the batch sheet
/// - **Private field**: the only way in is [`Meters::new`] (or serde, which
///   goes through the same check), so a `Meters` is never negative
/// - **Saturating arithmetic**: accumulation never panics
///
/// ## Where Meters is Used
/// ```text
/// StockEntry.length_per_unit ────┐
/// StockEntry.total_cut_length ───┼──► StockEntry::meters() ──► total_meters()
/// StockEntry.piece_length_meters ┘                               │
///                                                                ▼
///                                                   "1250.5 m" in reports
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
#[ts(export)]
pub struct Meters(#[ts(type = "string")] Decimal);

impl Meters {
    /// Creates a length, rejecting negative values.
    ///
    /// ## Example
    /// ```rust
    /// use rollstock_core::meters::Meters;
    /// use rust_decimal::Decimal;
    ///
    /// assert!(Meters::new(Decimal::new(125, 1)).is_ok()); // 12.5 m
    /// assert!(Meters::new(Decimal::ZERO).is_ok());
    /// assert!(Meters::new(Decimal::new(-5, 0)).is_err());
    /// ```
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value.is_zero() {
            return Ok(Meters::zero());
        }
        if value.is_sign_negative() {
            return Err(ValidationError::negative("meters", value));
        }
        Ok(Meters(value))
    }

    /// Creates a length from a whole number of meters.
    #[inline]
    pub fn from_whole(meters: u64) -> Self {
        Meters(Decimal::from(meters))
    }

    /// Zero length.
    #[inline]
    pub const fn zero() -> Self {
        Meters(Decimal::ZERO)
    }

    /// Returns the underlying decimal value.
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Checks if the length is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiplies the length by a count of units.
    ///
    /// ## Example
    /// ```rust
    /// use rollstock_core::meters::Meters;
    ///
    /// let roll = Meters::from_whole(100);
    /// assert_eq!(roll.times(4), Meters::from_whole(400));
    /// assert_eq!(roll.times(0), Meters::zero());
    /// ```
    #[inline]
    pub fn times(&self, count: u64) -> Self {
        Meters(self.0.saturating_mul(Decimal::from(count)))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the length with trailing zeros removed, e.g. `18.3 m`, `0 m`.
impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} m", self.0.normalize())
    }
}

impl TryFrom<Decimal> for Meters {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Meters::new(value)
    }
}

impl From<Meters> for Decimal {
    fn from(meters: Meters) -> Self {
        meters.0
    }
}

impl Add for Meters {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Meters(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Meters {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sum for Meters {
    fn sum<I: Iterator<Item = Meters>>(iter: I) -> Self {
        iter.fold(Meters::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
