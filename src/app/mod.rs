//! Run-level reporting helpers.
//!
//! This module provides the progress and statistics logging used at the end
//! of every scheduler run.

pub mod logging;
pub mod statistics;

// Re-export public API
pub use logging::log_progress;
pub use statistics::print_error_statistics;
