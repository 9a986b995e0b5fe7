//! Utility functions.
//!
//! This module provides:
//! - String sanitization and truncation for error details
//! - Timestamp helpers for generated identifiers and filenames

pub mod sanitize;

use chrono::{DateTime, Utc};

use crate::config::FILENAME_TIMESTAMP_FORMAT;

/// Formats a point in time the way generated filenames and session ids use it.
pub fn file_timestamp(at: DateTime<Utc>) -> String {
    at.format(FILENAME_TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_file_timestamp_format() {
        let at = Utc
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 1)
            .single()
            .expect("valid date");
        assert_eq!(file_timestamp(at), "20240309_070501");
    }
}
