//! # rollstock-core: Pure Stock Accounting for Rollstock
//!
//! This crate is the single source of truth for how production stock is
//! counted. Every screen that shows "2 Rolls + 1 Bundle", every report that
//! sums meters, and every low-stock alert goes through these functions.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rollstock Data Flow                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Inventory service (REST / DB export / file)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ untyped JSON records                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ rollstock-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │   │
//! │  │   │  ingest  │─►│ aggregate │─►│  format   │  │ low_stock │    │   │
//! │  │   │ validate │  │ breakdown │  │ long/short│  │ severity  │    │   │
//! │  │   └──────────┘  │  meters   │  └───────────┘  └───────────┘    │   │
//! │  │                 └───────────┘                                   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        stock-report CLI / dashboard / dispatch screens          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (StockEntry, QuantityBreakdown, StockLevel, ...)
//! - [`meters`] - Exact, non-negative length type
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level checks used at the ingestion boundary
//! - [`ingest`] - Loosely typed records → validated domain types
//! - [`aggregate`] - Breakdown and total-length reductions
//! - [`format`] - Human-readable breakdown strings
//! - [`low_stock`] - Threshold filtering and severity tiers
//!
//! ## Example Usage
//!
//! ```rust
//! use rollstock_core::{aggregate, format_long, format_short, total_meters};
//! use rollstock_core::{Meters, StockEntry, StockType};
//!
//! let entries = vec![
//!     StockEntry::new(StockType::FullRoll, 2).with_length_per_unit(Meters::from_whole(100)),
//!     StockEntry::new(StockType::Bundle, 1)
//!         .with_pieces_per_bundle(10)
//!         .with_piece_length(Meters::from_whole(6)),
//! ];
//!
//! let breakdown = aggregate(&entries);
//! assert_eq!(format_long(&breakdown), "2 Rolls + 1 Bundle");
//! assert_eq!(format_short(&breakdown), "2R + 1B");
//! assert_eq!(total_meters(&entries), Meters::from_whole(260));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod error;
pub mod format;
pub mod ingest;
pub mod low_stock;
pub mod meters;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use aggregate::{aggregate, aggregate_by, total_meters};
pub use error::{CoreError, CoreResult, ValidationError};
pub use format::{format_long, format_meters, format_short};
pub use ingest::{parse_stock_entries, parse_stock_levels, RawStockEntry};
pub use low_stock::{evaluate, summarize, LowStockPolicy};
pub use meters::Meters;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default low-stock threshold (in units of stock quantity).
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// Smallest threshold the dashboard slider offers.
///
/// Advisory only: [`evaluate`] accepts any threshold.
pub const MIN_UI_LOW_STOCK_THRESHOLD: u32 = 1;

/// Largest threshold the dashboard slider offers.
pub const MAX_UI_LOW_STOCK_THRESHOLD: u32 = 20;
