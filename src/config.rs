//! Configuration management for sitewatch
//!
//! This module provides a small configuration layer that loads settings from
//! environment variables with sensible defaults.
//!
//! # Environment Variables
//!
//! - `SITEWATCH_LOG_LEVEL`: Logging level (trace|debug|info|warn|error) - default: "info"
//! - `SITEWATCH_TASK_LABEL`: Task tag stamped on requests built without an
//!   explicit task - default: "environmental_assessment"
//!
//! # Example
//!
//! ```
//! use sitewatch::SitewatchConfig;
//!
//! let config = SitewatchConfig::from_env();
//! config.validate().expect("Invalid configuration");
//! ```

use std::env;
use thiserror::Error;
use tracing::Level;

use crate::util::logging::parse_level;

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_TASK_LABEL: &str = "environmental_assessment";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid log level name
    #[error("Invalid log level: {0}. Valid options: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Task label must be non-empty
    #[error("Task label cannot be empty")]
    EmptyTaskLabel,
}

/// Runtime configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct SitewatchConfig {
    /// Logging level name (validated, parsed via [`Self::log_level`])
    pub log_level: String,

    /// Task tag applied to requests that do not carry one
    pub task_label: String,
}

impl Default for SitewatchConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            task_label: DEFAULT_TASK_LABEL.to_string(),
        }
    }
}

impl SitewatchConfig {
    /// Loads configuration from environment variables, applying defaults for
    /// anything unset.
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("SITEWATCH_LOG_LEVEL")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
            task_label: env::var("SITEWATCH_TASK_LABEL")
                .unwrap_or_else(|_| DEFAULT_TASK_LABEL.to_string()),
        }
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }
        if self.task_label.trim().is_empty() {
            return Err(ConfigError::EmptyTaskLabel);
        }
        Ok(())
    }

    /// Returns the parsed tracing level.
    pub fn log_level(&self) -> Level {
        parse_level(&self.log_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SitewatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.log_level(), Level::INFO);
        assert_eq!(config.task_label, "environmental_assessment");
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let config = SitewatchConfig {
            log_level: "verbose".to_string(),
            ..Default::default()
        };
        match config.validate() {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "verbose"),
            other => panic!("Expected InvalidLogLevel, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_task_label_rejected() {
        let config = SitewatchConfig {
            task_label: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyTaskLabel)));
    }
}
