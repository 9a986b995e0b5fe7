//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (caller-facing errors and per-probe failures)
//! - Categorization of transport errors and HTTP statuses
//! - Processing statistics tracking for a run

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{
    categorize_reqwest_error, categorize_status, root_cause_message, to_probe_error,
    update_error_stats,
};
pub use stats::ProcessingStats;
pub use types::{ErrorType, InitializationError, ProbeError};
