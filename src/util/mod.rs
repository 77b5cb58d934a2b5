//! Utility modules for sitewatch
//!
//! This module provides various utility functions and helpers including:
//! - Structured logging setup and configuration
//! - Shared numeric rounding used by the scoring stages

pub mod logging;
pub mod rounding;

// Re-export commonly used items
pub use logging::{init_default, init_from_env, init_logging, LoggingConfig};
pub use rounding::round_to;
