//! Error categorization.
//!
//! This module maps transport errors and HTTP statuses onto the crate's error
//! taxonomy and onto the per-run error counters.

use std::error::Error as StdError;

use super::stats::ProcessingStats;
use super::types::{ErrorType, ProbeError};
use crate::config::MAX_ERROR_DETAIL_CHARS;
use crate::utils::sanitize::sanitize_and_truncate;

/// Categorizes a `reqwest::Error` into an `ErrorType`.
///
/// Timeouts are checked before connect failures: a connect timeout reports
/// both, and it must be counted as a timeout.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.is_timeout() {
        ErrorType::ProbeTimeout
    } else if error.is_connect() {
        ErrorType::ProbeConnectError
    } else if error.is_redirect() {
        ErrorType::ProbeRedirectError
    } else if error.is_body() || error.is_decode() {
        ErrorType::ProbeBodyError
    } else if error.is_request() {
        ErrorType::ProbeRequestError
    } else {
        ErrorType::ProbeOtherError
    }
}

/// Converts a `reqwest::Error` into a `ProbeError`.
///
/// Anything that is not a timeout becomes `TransportError` carrying the
/// innermost cause, sanitized and cut to `MAX_ERROR_DETAIL_CHARS`.
pub fn to_probe_error(error: &reqwest::Error) -> ProbeError {
    if error.is_timeout() {
        return ProbeError::TransportTimeout;
    }
    ProbeError::TransportError(sanitize_and_truncate(
        &root_cause_message(error),
        MAX_ERROR_DETAIL_CHARS,
    ))
}

/// Returns the message of the innermost error in the source chain.
///
/// reqwest's top-level message only says a request failed; the useful part
/// ("dns error", "Connection refused") lives in the deepest source.
pub fn root_cause_message(error: &(dyn StdError + 'static)) -> String {
    let mut current: &(dyn StdError + 'static) = error;
    while let Some(source) = current.source() {
        current = source;
    }
    let message = current.to_string();
    if message.trim().is_empty() {
        error.to_string()
    } else {
        message
    }
}

/// Error category for an HTTP status that the probe classifies as `Unknown`.
///
/// Returns `None` for 200 and 404, which are definitive answers.
pub fn categorize_status(status: u16) -> Option<ErrorType> {
    match status {
        200 | 404 => None,
        429 => Some(ErrorType::TooManyRequests),
        _ => Some(ErrorType::UnexpectedStatus),
    }
}

/// Updates processing statistics based on a `reqwest::Error`.
pub fn update_error_stats(stats: &ProcessingStats, error: &reqwest::Error) {
    stats.increment_error(categorize_reqwest_error(error));
}
