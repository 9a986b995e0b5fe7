//! Probe execution.
//!
//! This module provides:
//! - The five-value probe status taxonomy and the tagged outcome type
//! - `ProbeExecutor`, which performs one bounded-time request per target

mod executor;
mod types;

pub use executor::ProbeExecutor;
pub use types::{ProbeOutcome, ProbeResult, ProbeStatus};

/// Pure status classification: 200 is `Found`, 404 `NotFound`, anything else
/// `Unknown`.
pub fn classify_status(status: u16) -> ProbeStatus {
    ProbeOutcome::from_http_status(status).status()
}
