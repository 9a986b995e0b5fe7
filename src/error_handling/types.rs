//! Error type definitions.
//!
//! This module defines the error enums returned to callers and the
//! categories used to tally per-probe failures.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failure of a single outbound call.
///
/// These never escape a run: the executor and the archive resolver turn
/// them into a terminal status on the affected entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The request did not complete within its timeout.
    #[error("request timed out")]
    TransportTimeout,

    /// DNS failure, refused connection or another network-level failure.
    #[error("transport error: {0}")]
    TransportError(String),

    /// The remote answered with a status the caller treats as a failure.
    #[error("remote returned status {0}")]
    RemoteStatus(u16),

    /// Substituting the identifier did not produce a usable URL.
    #[error("malformed template")]
    MalformedTarget,

    /// A timestamp or JSON body could not be decoded.
    #[error("decode error: {0}")]
    DecodeError(String),
}

/// Types of per-probe failures tallied during a run.
///
/// Every variant corresponds to a probe that ended in `Timeout`, `Error` or
/// `Unknown`; found and not-found outcomes are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Transport errors
    /// Request exceeded the per-probe timeout
    ProbeTimeout,
    /// TCP or TLS connection failed
    ProbeConnectError,
    /// Request could not be sent
    ProbeRequestError,
    /// Redirect limit or loop
    ProbeRedirectError,
    /// Response body could not be read
    ProbeBodyError,
    /// Any other transport failure
    ProbeOtherError,
    // Target errors
    /// Template did not expand to an http(s) URL
    MalformedTarget,
    // Response classification
    /// Status other than 200, 404 and 429
    UnexpectedStatus,
    /// 429 responses
    TooManyRequests,
    // Scheduling
    /// Worker task panicked before producing a result
    TaskPanicked,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Returns a human-readable string representation of the error type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::ProbeTimeout => "Probe timeout",
            ErrorType::ProbeConnectError => "Probe connect error",
            ErrorType::ProbeRequestError => "Probe request error",
            ErrorType::ProbeRedirectError => "Probe redirect error",
            ErrorType::ProbeBodyError => "Probe body error",
            ErrorType::ProbeOtherError => "Probe other error",
            ErrorType::MalformedTarget => "Malformed target template",
            ErrorType::UnexpectedStatus => "Unexpected HTTP status",
            ErrorType::TooManyRequests => "Too many requests (429)",
            ErrorType::TaskPanicked => "Probe task panicked",
        }
    }
}
