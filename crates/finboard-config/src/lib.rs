//! Configuration management for finboard
//!
//! This module handles loading, validation, and management of
//! finboard configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigErrorCode, ConfigResult};

/// Number of rows shown before the list is expanded
pub const DEFAULT_COLLAPSED_ROWS: usize = 7;

/// Number of fills shown in the trade history table
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Number of stocks shown in the watchlist
pub const DEFAULT_WATCHLIST_LIMIT: usize = 15;

// ==================== Configuration Types ====================

/// Data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the data directory
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Dataset file name (relative to data path)
    #[serde(default = "default_dataset_file")]
    pub dataset_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            dataset_file: default_dataset_file(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_dataset_file() -> String {
    "dashboard.yaml".to_string()
}

/// Table display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Rows visible in the transaction list while collapsed
    #[serde(default = "default_collapsed_rows")]
    pub collapsed_rows: usize,
    /// Most recent fills shown in the trade history table
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Stocks shown in the watchlist
    #[serde(default = "default_watchlist_limit")]
    pub watchlist_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            collapsed_rows: DEFAULT_COLLAPSED_ROWS,
            history_limit: DEFAULT_HISTORY_LIMIT,
            watchlist_limit: DEFAULT_WATCHLIST_LIMIT,
        }
    }
}

fn default_collapsed_rows() -> usize {
    DEFAULT_COLLAPSED_ROWS
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_watchlist_limit() -> usize {
    DEFAULT_WATCHLIST_LIMIT
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Data directory settings
    #[serde(default)]
    pub data: DataConfig,
    /// Table display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::IoError)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        let limits = [
            ("display.collapsed_rows", self.display.collapsed_rows),
            ("display.history_limit", self.display.history_limit),
            ("display.watchlist_limit", self.display.watchlist_limit),
        ];
        for (field, value) in limits {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "Value must be greater than 0".to_string(),
                });
            }
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Get the full path to the dataset file
    pub fn dataset_path(&self) -> PathBuf {
        self.data.path.join(&self.data.dataset_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.display.collapsed_rows, 7);
        assert_eq!(config.display.history_limit, 20);
        assert_eq!(config.display.watchlist_limit, 15);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.dataset_path(), PathBuf::from("./data/dashboard.yaml"));
    }

    #[test]
    fn test_default_template_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.display.collapsed_rows, DEFAULT_COLLAPSED_ROWS);
        assert_eq!(config.data.dataset_file, "dashboard.yaml");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = Config::from_yaml("display:\n  history_limit: 5\n").unwrap();
        assert_eq!(config.display.history_limit, 5);
        assert_eq!(config.display.collapsed_rows, 7);
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let err = Config::from_yaml("display:\n  collapsed_rows: 0\n").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidValue);
        let details = err.to_details();
        assert_eq!(details.field.as_deref(), Some("display.collapsed_rows"));
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        let err = Config::from_yaml("logging:\n  level: loud\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "logging.level"));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = Config::from_yaml("display: [").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidYaml);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/finboard.yaml")).unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::FileNotFound);
        assert_eq!(err.to_details().suggestions.len(), 2);
    }
}
