//! Configuration constants.
//!
//! This module defines the constants used throughout the crate, including
//! timeouts, size limits and the default archive endpoints.

use std::time::Duration;

// Probe timeouts
/// Default timeout for a single platform probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);
/// Timeout for the "available snapshot" lookup (archive stage 1).
pub const ARCHIVE_AVAILABLE_TIMEOUT: Duration = Duration::from_secs(8);
/// Timeout for the timemap/calendar lookup (archive stage 2).
pub const ARCHIVE_TIMEMAP_TIMEOUT: Duration = Duration::from_secs(10);
/// TCP connect timeout applied to the shared client.
///
/// Per-request timeouts still bound the whole call; this only makes dead hosts
/// fail before the request timeout does.
pub const TCP_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

// Scheduling
/// Default number of probes allowed in flight at once.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;
/// Delay each worker waits before issuing its request.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(100);

/// Default User-Agent string for outbound requests.
///
/// A fixed browser string is sent with every probe so that trivial
/// user-agent based blocking does not turn every hit into an `Unknown`.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Limits
/// Maximum length of a transport error detail kept on a probe result.
pub const MAX_ERROR_DETAIL_CHARS: usize = 50;
/// Maximum length of a request error quoted in an archive entry source.
pub const MAX_ARCHIVE_ERROR_CHARS: usize = 100;
/// Maximum number of timemap rows turned into archive entries (header excluded).
pub const MAX_TIMEMAP_ENTRIES: usize = 100;
/// Maximum number of entries kept by the relevance filter.
pub const MAX_RELEVANT_ENTRIES: usize = 10;

// Archive endpoints
/// Host serving the `wayback/available` API.
pub const DEFAULT_ARCHIVE_AVAILABLE_BASE: &str = "https://archive.org";
/// Host serving the timemap API and the archived pages themselves.
pub const DEFAULT_ARCHIVE_TIMEMAP_BASE: &str = "https://web.archive.org";
/// Secondary archive service offered as an alternative.
pub const DEFAULT_ARCHIVE_ALTERNATE_BASE: &str = "https://archive.ph";
/// Site whose archived pages are looked up for a handle.
pub const DEFAULT_ARCHIVE_TARGET_PREFIX: &str = "twitter.com";

/// Placeholder substituted with the identifier in every URL template.
pub const IDENTIFIER_PLACEHOLDER: &str = "{identifier}";

// Output
/// Timestamp format used in generated filenames and session identifiers.
pub const FILENAME_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
/// Display format for decoded archive timestamps.
pub const SNAPSHOT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
