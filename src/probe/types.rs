//! Probe result types.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::{Display, EnumIter};

use crate::registry::ProbeTarget;

/// The five-value status taxonomy of a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, Serialize)]
pub enum ProbeStatus {
    /// HTTP 200
    #[strum(serialize = "Found")]
    Found,
    /// HTTP 404
    #[strum(serialize = "Not Found")]
    NotFound,
    /// Any other HTTP status
    #[strum(serialize = "Unknown")]
    Unknown,
    /// No response before the deadline
    #[strum(serialize = "Timeout")]
    Timeout,
    /// Transport failure or malformed target
    #[strum(serialize = "Error")]
    Error,
}

/// Terminal outcome of one probe.
///
/// The variants carry exactly the data their status allows: an HTTP status
/// for answered requests and a non-empty detail for errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Answered with 200
    Found {
        /// Always 200
        http_status: u16,
    },
    /// Answered with 404
    NotFound {
        /// Always 404
        http_status: u16,
    },
    /// Answered with another status
    Unknown {
        /// Status as received
        http_status: u16,
    },
    /// No response before the deadline
    Timeout,
    /// Failed without a response
    Error {
        /// Failure description; never blank
        detail: String,
    },
}

impl ProbeOutcome {
    /// Classifies an HTTP status code.
    ///
    /// 200 is a hit, 404 a miss, anything else is kept as `Unknown` with the
    /// code preserved for diagnostics.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            200 => ProbeOutcome::Found {
                http_status: status,
            },
            404 => ProbeOutcome::NotFound {
                http_status: status,
            },
            _ => ProbeOutcome::Unknown {
                http_status: status,
            },
        }
    }

    /// Builds an error outcome; an empty detail is replaced so the detail is
    /// never blank.
    pub fn error(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        let detail = if detail.trim().is_empty() {
            "unknown error".to_string()
        } else {
            detail
        };
        ProbeOutcome::Error { detail }
    }

    /// The status taxonomy value of this outcome.
    pub fn status(&self) -> ProbeStatus {
        match self {
            ProbeOutcome::Found { .. } => ProbeStatus::Found,
            ProbeOutcome::NotFound { .. } => ProbeStatus::NotFound,
            ProbeOutcome::Unknown { .. } => ProbeStatus::Unknown,
            ProbeOutcome::Timeout => ProbeStatus::Timeout,
            ProbeOutcome::Error { .. } => ProbeStatus::Error,
        }
    }

    /// The HTTP status, present only for answered requests.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ProbeOutcome::Found { http_status }
            | ProbeOutcome::NotFound { http_status }
            | ProbeOutcome::Unknown { http_status } => Some(*http_status),
            ProbeOutcome::Timeout | ProbeOutcome::Error { .. } => None,
        }
    }

    /// The failure detail of `Error` outcomes.
    pub fn error_detail(&self) -> Option<&str> {
        match self {
            ProbeOutcome::Error { detail } => Some(detail),
            _ => None,
        }
    }
}

/// Result of probing one target for one identifier.
///
/// Created once per target per run and never modified.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// Target that was probed (shared with the registry)
    pub target: Arc<ProbeTarget>,
    /// URL that was requested; the raw template when substitution failed
    pub url: String,
    /// Terminal outcome
    pub outcome: ProbeOutcome,
    /// When the outcome was observed
    pub observed_at: DateTime<Utc>,
}

impl ProbeResult {
    /// Stamps the outcome with the current time.
    pub fn new(target: Arc<ProbeTarget>, url: impl Into<String>, outcome: ProbeOutcome) -> Self {
        Self {
            target,
            url: url.into(),
            outcome,
            observed_at: Utc::now(),
        }
    }

    /// Shorthand for `self.outcome.status()`.
    pub fn status(&self) -> ProbeStatus {
        self.outcome.status()
    }

    /// See [`ProbeOutcome::http_status`].
    pub fn http_status(&self) -> Option<u16> {
        self.outcome.http_status()
    }

    /// See [`ProbeOutcome::error_detail`].
    pub fn error_detail(&self) -> Option<&str> {
        self.outcome.error_detail()
    }
}
