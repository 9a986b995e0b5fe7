//! The record trait shared by every report row type.

use serde_json::{Map, Value};

use crate::archive::ArchiveSnapshot;
use crate::config::SNAPSHOT_DATE_FORMAT;
use crate::probe::{ProbeResult, ProbeStatus};
use crate::registry::RiskTier;

/// A flat row that can be aggregated and exported.
pub trait ReportRecord: Clone + Send + Sync {
    /// Identity used to make `add` idempotent.
    fn key(&self) -> String;

    /// Whether the row counts as a hit.
    fn is_found(&self) -> bool;

    /// Status label for the per-status counts.
    fn status_label(&self) -> String;

    /// Category label for the per-category counts. Rows without a
    /// category are not counted there.
    fn category_label(&self) -> Option<String> {
        None
    }

    /// Risk tier used for the high-risk hit count.
    fn risk_tier(&self) -> Option<RiskTier> {
        None
    }

    /// Confidence label for the per-confidence counts.
    fn confidence_label(&self) -> Option<String> {
        None
    }

    /// Column names, in export order.
    fn columns() -> &'static [&'static str];

    /// Cell values matching `columns()`.
    fn row(&self) -> Vec<String>;

    /// JSON object for the `data` array of a JSON export.
    fn to_json(&self) -> Value {
        let object: Map<String, Value> = Self::columns()
            .iter()
            .zip(self.row())
            .map(|(column, cell)| (column.to_string(), Value::String(cell)))
            .collect();
        Value::Object(object)
    }
}

const PROBE_COLUMNS: &[&str] = &[
    "platform",
    "category",
    "url",
    "status",
    "http_status",
    "risk_level",
    "info_type",
    "error_detail",
    "observed_at",
];

impl ReportRecord for ProbeResult {
    fn key(&self) -> String {
        format!("{}/{}", self.target.category, self.target.name)
    }

    fn is_found(&self) -> bool {
        self.status() == ProbeStatus::Found
    }

    fn status_label(&self) -> String {
        self.status().to_string()
    }

    fn category_label(&self) -> Option<String> {
        Some(self.target.category.to_string())
    }

    fn risk_tier(&self) -> Option<RiskTier> {
        Some(self.target.risk_tier)
    }

    fn columns() -> &'static [&'static str] {
        PROBE_COLUMNS
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.target.name.clone(),
            self.target.category.to_string(),
            self.url.clone(),
            self.status().to_string(),
            self.http_status().map(|s| s.to_string()).unwrap_or_default(),
            self.target.risk_tier.to_string(),
            self.target.info_type.clone(),
            self.error_detail().unwrap_or_default().to_string(),
            self.observed_at.to_rfc3339(),
        ]
    }

    fn to_json(&self) -> Value {
        serde_json::json!({
            "platform": self.target.name,
            "category": self.target.category.to_string(),
            "url": self.url,
            "status": self.status().to_string(),
            "http_status": self.http_status(),
            "risk_level": self.target.risk_tier.to_string(),
            "info_type": self.target.info_type,
            "error_detail": self.error_detail(),
            "observed_at": self.observed_at.to_rfc3339(),
        })
    }
}

const SNAPSHOT_COLUMNS: &[&str] = &["type", "date", "url", "status", "source", "content_match"];

impl ReportRecord for ArchiveSnapshot {
    fn key(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.kind, self.timestamp, self.archive_url, self.source
        )
    }

    fn is_found(&self) -> bool {
        self.is_available_capture()
    }

    fn status_label(&self) -> String {
        self.status.to_string()
    }

    fn category_label(&self) -> Option<String> {
        Some(self.kind.to_string())
    }

    fn columns() -> &'static [&'static str] {
        SNAPSHOT_COLUMNS
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.kind.to_string(),
            self.timestamp.to_string(),
            self.archive_url.clone(),
            self.status.to_string(),
            self.source.clone(),
            self.content_match
                .map(|m| m.to_string())
                .unwrap_or_default(),
        ]
    }

    fn to_json(&self) -> Value {
        serde_json::json!({
            "type": self.kind.to_string(),
            "date": self
                .timestamp
                .parsed()
                .map(|d| d.format(SNAPSHOT_DATE_FORMAT).to_string())
                .unwrap_or_else(|| self.timestamp.to_string()),
            "url": self.archive_url,
            "status": self.status.to_string(),
            "source": self.source,
            "content_match": self.content_match.map(|m| m.to_string()),
        })
    }
}
