//! Report aggregation.
//!
//! This module provides:
//! - `ReportRecord`, implemented by every row type that can be reported
//! - `ReportAggregator` and the finalized `InvestigationReport`
//! - `ReportSummary` with counts, rates and distributions
//! - `SessionStats`, the shared per-session counters

mod aggregator;
mod record;
mod session;
mod summary;

pub use aggregator::{InvestigationReport, ReportAggregator};
pub use record::ReportRecord;
pub use session::{SessionSnapshot, SessionStats};
pub use summary::ReportSummary;
