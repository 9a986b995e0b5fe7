//! Archived-capture resolution for social handles.
//!
//! This module provides:
//! - `ArchiveResolver`, the two-stage snapshot/timemap lookup
//! - Snapshot entry types and timestamp decoding
//! - Post-hoc relevance, date-range and content filters

mod filters;
mod resolver;
mod types;

pub use filters::{filter_date_range, filter_relevant, flag_content, ArchiveFilters, DateRange};
pub use resolver::{normalize_handle, ArchiveResolver};
pub use types::{ArchiveSnapshot, ContentMatch, SnapshotDate, SnapshotKind, SnapshotStatus};
