//! Library configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, default endpoints)
//! - The `Config` struct and its validation
//! - Log level and format selection

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{ArchiveEndpoints, Config, ConfigError, LogFormat, LogLevel};
