//! Export types.

use std::str::FromStr;

use thiserror::Error;

/// Export format options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Full record list with a summary block and a session id
    Json,
    /// Flat table, one row per record (flat reports only)
    Csv,
    /// Self-contained styled document with a header, a table and a footer
    Html,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Html => "html",
        }
    }

    /// Content type of the payload.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Html => "text/html",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "html" | "htm" => Ok(ExportFormat::Html),
            other => Err(ExportError::UnsupportedExport {
                format: other.to_string(),
                reason: "unknown format",
            }),
        }
    }
}

/// A rendered export, ready to be offered for download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Rendered document
    pub payload: String,
    /// `{report_type}_report_{YYYYMMDD_HHMMSS}.{ext}`
    pub filename: String,
    /// Same as `ExportFormat::mime_type`
    pub mime_type: &'static str,
}

/// Export failures. `UnsupportedExport` is a caller error.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The format does not apply to this kind of report.
    #[error("unsupported export {format}: {reason}")]
    UnsupportedExport {
        /// Requested format
        format: String,
        /// Why it cannot be produced
        reason: &'static str,
    },

    /// JSON serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV buffer could not be recovered or was not UTF-8.
    #[error("CSV buffer error: {0}")]
    Buffer(String),
}
