//! Structured logging setup for sitewatch
//!
//! This module provides initialization and configuration for structured
//! logging using the `tracing` ecosystem. It supports console and JSON
//! output, filtering, and runtime configuration via environment variables.
//!
//! # Features
//!
//! - Console output with pretty formatting (default)
//! - Optional JSON output for production environments
//! - Environment-based configuration via `RUST_LOG`
//! - Thread-safe, can only be initialized once
//!
//! # Example
//!
//! ```no_run
//! use sitewatch::util::logging;
//!
//! // Initialize with default configuration
//! logging::init_default();
//!
//! // Or initialize from environment variables
//! logging::init_from_env();
//!
//! // Now use tracing macros throughout your code
//! use tracing::{info, debug};
//!
//! info!("Assessment service started");
//! debug!(site = "SITE-001", "Processing request");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Configuration for logging initialization
///
/// Controls the minimum log level, output format, and what metadata is
/// included in log messages.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format (for structured logging in production)
    pub use_json: bool,

    /// Include the module target (e.g., sitewatch::pipeline) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,

    /// Include thread ID and name in logs
    pub include_thread_ids: bool,
}

impl Default for LoggingConfig {
    /// Creates a default logging configuration
    ///
    /// Defaults:
    /// - Level: INFO
    /// - JSON: false (pretty console output)
    /// - Target: true
    /// - Location: false (for cleaner output)
    /// - Thread IDs: false
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
        }
    }
}

impl LoggingConfig {
    /// Creates a logging configuration with the specified level
    ///
    /// # Example
    ///
    /// ```
    /// use sitewatch::util::LoggingConfig;
    /// use tracing::Level;
    ///
    /// let config = LoggingConfig::with_level(Level::DEBUG);
    /// ```
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Creates a logging configuration for production use
    ///
    /// This enables JSON output and includes more metadata for structured logging.
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
            include_thread_ids: true,
        }
    }

    /// Creates a logging configuration for development use
    ///
    /// This uses pretty console output with debug level and minimal metadata.
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
        }
    }
}

/// Parses a log level from a string
///
/// Returns the corresponding `Level`, or `Level::INFO` if parsing fails.
///
/// # Example
///
/// ```
/// use sitewatch::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("INFO"), Level::INFO);
/// assert_eq!(parse_level("invalid"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Initializes the logging system with the provided configuration
///
/// Sets up the `tracing` subscriber with the specified configuration. It can
/// only be called once - subsequent calls are ignored.
///
/// # Example
///
/// ```no_run
/// use sitewatch::util::{init_logging, LoggingConfig};
/// use tracing::Level;
///
/// let config = LoggingConfig::with_level(Level::DEBUG);
/// init_logging(config);
/// ```
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new(format!("sitewatch={}", config.level)),
        };

        if config.use_json {
            // JSON output for production/structured logging
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids),
                )
                .init();
        } else {
            // Pretty console output for development
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids),
                )
                .init();
        }
    });
}

/// Initializes logging with default configuration
///
/// Convenience function: INFO level, pretty console output, respects
/// `RUST_LOG` when set.
pub fn init_default() {
    init_logging(LoggingConfig::default());
}

/// Initializes logging from environment variables
///
/// Reads `SITEWATCH_LOG_LEVEL` for the level and `SITEWATCH_LOG_FORMAT=json`
/// for JSON output, falling back to defaults when unset.
pub fn init_from_env() {
    let level = env::var("SITEWATCH_LOG_LEVEL")
        .map(|s| parse_level(&s))
        .unwrap_or(Level::INFO);

    let use_json = env::var("SITEWATCH_LOG_FORMAT")
        .map(|s| s.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    init_logging(LoggingConfig {
        level,
        use_json,
        ..Default::default()
    });
}
