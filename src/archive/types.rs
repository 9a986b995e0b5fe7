//! Archive snapshot types.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;
use strum_macros::{Display, EnumIter};

use crate::config::SNAPSHOT_DATE_FORMAT;

/// What an entry of a resolver run represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, Serialize)]
pub enum SnapshotKind {
    /// Closest capture reported by the availability API
    #[strum(serialize = "Latest Archive")]
    LatestArchive,
    /// Capture listed by the timemap
    Archive,
    /// Manual search URL offered when nothing was captured
    Suggestion,
    /// Same target on a secondary archive service
    Alternative,
    /// Informational message
    Note,
    /// Stage-2 failure; stage-1 entries are kept
    Warning,
    /// Stage-1 failure that ended the lookup
    Error,
}

impl SnapshotKind {
    /// Kinds that describe the lookup rather than a capture. Filters never
    /// remove them.
    pub fn is_metadata(&self) -> bool {
        matches!(
            self,
            SnapshotKind::Suggestion
                | SnapshotKind::Alternative
                | SnapshotKind::Note
                | SnapshotKind::Error
        )
    }

    /// Kinds that point at an actual capture.
    pub fn is_capture(&self) -> bool {
        matches!(self, SnapshotKind::LatestArchive | SnapshotKind::Archive)
    }
}

/// Availability of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, Serialize)]
pub enum SnapshotStatus {
    /// The capture can be opened
    Available,
    /// No capture exists
    #[strum(serialize = "Not Found")]
    NotFound,
    /// The archive service could not be reached
    #[strum(serialize = "Connection Error")]
    ConnectionError,
    /// The request exceeded its deadline
    Timeout,
    /// Non-200 status or undecodable body
    #[strum(serialize = "API Error")]
    ApiError,
    /// Notes, suggestions and alternatives
    Info,
}

/// Result of the advisory content filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum ContentMatch {
    /// Not inspected
    Unknown,
    /// An available capture that may contain the text
    Possible,
    /// Inspected without a match
    #[strum(serialize = "None")]
    NotMatched,
}

/// Capture time of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SnapshotDate {
    /// Decoded `YYYYMMDDHHMMSS` token
    Parsed(NaiveDateTime),
    /// Token that could not be decoded, kept verbatim
    Raw(String),
    /// No timestamp applies (suggestions, notes, errors)
    Unknown,
}

impl SnapshotDate {
    /// Decodes a 14-digit archive timestamp.
    ///
    /// Tokens longer than 14 digits (some services append milliseconds) are
    /// cut to 14. Anything that does not decode is kept as `Raw`; an empty
    /// token is `Unknown`.
    pub fn decode(token: &str) -> Self {
        let token = token.trim();
        if token.is_empty() {
            return SnapshotDate::Unknown;
        }
        let digits = token
            .get(..14)
            .filter(|d| d.bytes().all(|b| b.is_ascii_digit()));
        match digits.and_then(|d| NaiveDateTime::parse_from_str(d, "%Y%m%d%H%M%S").ok()) {
            Some(parsed) => SnapshotDate::Parsed(parsed),
            None => SnapshotDate::Raw(token.to_string()),
        }
    }

    /// The decoded date, if any.
    pub fn parsed(&self) -> Option<NaiveDateTime> {
        match self {
            SnapshotDate::Parsed(date) => Some(*date),
            _ => None,
        }
    }
}

impl fmt::Display for SnapshotDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotDate::Parsed(date) => write!(f, "{}", date.format(SNAPSHOT_DATE_FORMAT)),
            SnapshotDate::Raw(raw) => f.write_str(raw),
            SnapshotDate::Unknown => f.write_str("N/A"),
        }
    }
}

/// One entry produced by the archive resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSnapshot {
    /// What the entry represents
    pub kind: SnapshotKind,
    /// Capture time
    pub timestamp: SnapshotDate,
    /// Capture, suggestion or failing request URL; `N/A` for notes
    pub archive_url: String,
    /// Availability
    pub status: SnapshotStatus,
    /// Provenance or human-readable message
    pub source: String,
    /// Set only by the content filter
    pub content_match: Option<ContentMatch>,
}

impl ArchiveSnapshot {
    /// Builds an entry without a content match.
    pub fn new(
        kind: SnapshotKind,
        timestamp: SnapshotDate,
        archive_url: impl Into<String>,
        status: SnapshotStatus,
        source: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            timestamp,
            archive_url: archive_url.into(),
            status,
            source: source.into(),
            content_match: None,
        }
    }

    /// Informational note without a URL or date.
    pub fn note(message: impl Into<String>) -> Self {
        Self::new(
            SnapshotKind::Note,
            SnapshotDate::Unknown,
            "N/A",
            SnapshotStatus::Info,
            message,
        )
    }

    /// A capture that can be opened.
    pub fn is_available_capture(&self) -> bool {
        self.kind.is_capture() && self.status == SnapshotStatus::Available
    }
}
