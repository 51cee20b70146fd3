//! # Report Configuration
//!
//! Low-stock and display settings for the stock report.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --threshold 8 --include-cut-rolls                                  │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     ROLLSTOCK_LOW_STOCK_THRESHOLD=8                                    │
//! │     ROLLSTOCK_INCLUDE_CUT_ROLLS=true                                   │
//! │     ROLLSTOCK_DISPLAY_STYLE=short                                      │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/rollstock/report.toml (Linux)                            │
//! │     ~/Library/Application Support/com.rollstock.report/ (macOS)        │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     threshold 5, full rolls only, long labels                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # report.toml
//! [alerts]
//! threshold = 5
//! include_cut_rolls = false
//!
//! [display]
//! style = "long"  # long | short
//! ```

use std::path::PathBuf;

use rollstock_core::{
    LowStockPolicy, DEFAULT_LOW_STOCK_THRESHOLD, MAX_UI_LOW_STOCK_THRESHOLD,
    MIN_UI_LOW_STOCK_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ReportError, ReportResult};

pub const ENV_THRESHOLD: &str = "ROLLSTOCK_LOW_STOCK_THRESHOLD";
pub const ENV_INCLUDE_CUT_ROLLS: &str = "ROLLSTOCK_INCLUDE_CUT_ROLLS";
pub const ENV_DISPLAY_STYLE: &str = "ROLLSTOCK_DISPLAY_STYLE";

// =============================================================================
// Display Style
// =============================================================================

/// How breakdowns are labelled in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStyle {
    /// "2 Rolls + 1 Bundle"
    #[default]
    Long,

    /// "2R + 1B"
    Short,
}

impl std::fmt::Display for DisplayStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayStyle::Long => write!(f, "long"),
            DisplayStyle::Short => write!(f, "short"),
        }
    }
}

impl std::str::FromStr for DisplayStyle {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "long" | "full" => Ok(DisplayStyle::Long),
            "short" | "compact" => Ok(DisplayStyle::Short),
            other => Err(ReportError::InvalidConfig(format!(
                "Unknown display style: '{}'. Valid options: long, short",
                other
            ))),
        }
    }
}

// =============================================================================
// Alert Settings
// =============================================================================

/// Low-stock alert settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSettings {
    /// Items at or below this quantity are flagged.
    #[serde(default = "default_threshold")]
    pub threshold: u32,

    /// Watch cut rolls as well as full rolls.
    #[serde(default)]
    pub include_cut_rolls: bool,
}

fn default_threshold() -> u32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

impl Default for AlertSettings {
    fn default() -> Self {
        AlertSettings {
            threshold: default_threshold(),
            include_cut_rolls: false,
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default)]
    pub style: DisplayStyle,
}

// =============================================================================
// Main Report Configuration
// =============================================================================

/// Complete report configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub alerts: AlertSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl ReportConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (report.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ReportResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading report config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.warn_on_unusual_values();

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ReportResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ReportError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ReportError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .map_err(|e| ReportError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Report config saved");
        Ok(path)
    }

    /// The evaluator accepts any threshold; the dashboard only offers 1 to 20.
    /// Values outside that range still apply but are worth a warning.
    pub fn warn_on_unusual_values(&self) {
        if !self.policy().is_within_ui_range() {
            warn!(
                threshold = self.alerts.threshold,
                min = MIN_UI_LOW_STOCK_THRESHOLD,
                max = MAX_UI_LOW_STOCK_THRESHOLD,
                "Low-stock threshold is outside the dashboard range"
            );
        }
    }

    /// The low-stock policy these settings describe.
    pub fn policy(&self) -> LowStockPolicy {
        LowStockPolicy::new(self.alerts.threshold, self.alerts.include_cut_rolls)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from a variable lookup. Unparseable values are
    /// logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(threshold) = lookup(ENV_THRESHOLD) {
            match threshold.trim().parse::<u32>() {
                Ok(t) => {
                    debug!(threshold = t, "Overriding low-stock threshold from environment");
                    self.alerts.threshold = t;
                }
                Err(_) => warn!(value = %threshold, "Ignoring unparseable {}", ENV_THRESHOLD),
            }
        }

        if let Some(include) = lookup(ENV_INCLUDE_CUT_ROLLS) {
            match parse_flag(&include) {
                Some(flag) => self.alerts.include_cut_rolls = flag,
                None => warn!(value = %include, "Ignoring unparseable {}", ENV_INCLUDE_CUT_ROLLS),
            }
        }

        if let Some(style) = lookup(ENV_DISPLAY_STYLE) {
            match style.parse() {
                Ok(parsed) => self.display.style = parsed,
                Err(e) => warn!(error = %e, "Ignoring {}", ENV_DISPLAY_STYLE),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "rollstock", "report")
            .map(|dirs| dirs.config_dir().join("report.toml"))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// A fresh directory under the system temp dir for one test.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "rollstock-report-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_display_style_parsing() {
        assert_eq!("long".parse::<DisplayStyle>().unwrap(), DisplayStyle::Long);
        assert_eq!("SHORT".parse::<DisplayStyle>().unwrap(), DisplayStyle::Short);
        assert_eq!("compact".parse::<DisplayStyle>().unwrap(), DisplayStyle::Short);
        assert!("wide".parse::<DisplayStyle>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.alerts.threshold, 5);
        assert!(!config.alerts.include_cut_rolls);
        assert_eq!(config.display.style, DisplayStyle::Long);
        assert_eq!(config.policy(), LowStockPolicy::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ReportConfig = toml::from_str("[alerts]\ninclude_cut_rolls = true\n").unwrap();
        assert_eq!(config.alerts.threshold, 5);
        assert!(config.alerts.include_cut_rolls);
        assert_eq!(config.display.style, DisplayStyle::Long);
    }

    #[test]
    fn test_overrides() {
        let mut config = ReportConfig::default();
        config.apply_overrides(lookup(&[
            (ENV_THRESHOLD, "12"),
            (ENV_INCLUDE_CUT_ROLLS, "yes"),
            (ENV_DISPLAY_STYLE, "short"),
        ]));

        assert_eq!(config.alerts.threshold, 12);
        assert!(config.alerts.include_cut_rolls);
        assert_eq!(config.display.style, DisplayStyle::Short);
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let mut config = ReportConfig::default();
        config.apply_overrides(lookup(&[
            (ENV_THRESHOLD, "-3"),
            (ENV_INCLUDE_CUT_ROLLS, "maybe"),
            (ENV_DISPLAY_STYLE, "wide"),
        ]));
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = scratch_dir("save-load");
        let path = dir.join("nested").join("report.toml");

        let mut config = ReportConfig::default();
        config.alerts.threshold = 8;
        config.display.style = DisplayStyle::Short;

        let saved = config.save(Some(path.clone())).unwrap();
        assert_eq!(saved, path);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[alerts]"));
        assert!(contents.contains("[display]"));

        let loaded: ReportConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_reports_write_failure_as_save_error() {
        let dir = scratch_dir("save-blocked");
        std::fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let err = ReportConfig::default()
            .save(Some(blocker.join("report.toml")))
            .unwrap_err();
        assert!(matches!(err, ReportError::ConfigSaveFailed(_)));
        assert!(err.to_string().starts_with("Failed to save config"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = scratch_dir("missing");
        assert!(!dir.join("absent.toml").exists());
        assert!(ReportConfig::load(Some(dir.join("absent.toml"))).is_ok());
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = scratch_dir("bad-toml");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.toml");
        std::fs::write(&path, "[alerts]\nthreshold = \"five\"\n").unwrap();

        let err = ReportConfig::load(Some(path)).unwrap_err();
        assert!(matches!(err, ReportError::ConfigLoadFailed(_)));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag(""), None);
    }
}
