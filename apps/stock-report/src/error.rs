//! # Report Error Types
//!
//! Errors raised while loading configuration and reading input files.
//! Accounting errors come from `rollstock_core::CoreError` and are wrapped
//! here so `main` sees a single type per failure.

use std::path::PathBuf;

use rollstock_core::CoreError;
use thiserror::Error;

/// Result type alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A config value is present but unusable.
    #[error("Invalid report configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Input Errors
    // =========================================================================
    /// An input file could not be read.
    #[error("Failed to read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file was read but its records were rejected.
    #[error("Rejected {path}: {source}")]
    InvalidInput {
        path: PathBuf,
        #[source]
        source: CoreError,
    },
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ReportError {
    fn from(err: toml::de::Error) -> Self {
        ReportError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ReportError {
    fn from(err: toml::ser::Error) -> Self {
        ReportError::ConfigSaveFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollstock_core::ValidationError;

    #[test]
    fn test_invalid_input_message() {
        let err = ReportError::InvalidInput {
            path: PathBuf::from("stock.json"),
            source: CoreError::InvalidStockEntry {
                index: 3,
                source: ValidationError::negative("quantity", "-1"),
            },
        };
        assert_eq!(
            err.to_string(),
            "Rejected stock.json: Invalid stock entry at index 3: quantity must not be negative (got -1)"
        );
    }
}
