//! JSON export functionality.

use serde::Serialize;
use serde_json::{Map, Value};

use super::types::ExportError;
use crate::report::SessionSnapshot;

/// Top-level layout of a JSON export.
#[derive(Serialize)]
pub(super) struct JsonReport<'a> {
    pub report_type: &'a str,
    /// ISO-8601
    pub generated_at: String,
    pub session_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<&'a str>,
    pub data: &'a Value,
    pub summary: Map<String, Value>,
}

/// Summary block: record count and session counters, followed by any
/// report-specific fields.
pub(super) fn summary_block(
    total_records: usize,
    session: Option<&SessionSnapshot>,
    extra: Option<Value>,
) -> Map<String, Value> {
    let mut summary = Map::new();
    summary.insert("total_records".to_string(), Value::from(total_records));
    summary.insert(
        "successful_searches".to_string(),
        Value::from(session.map_or(0, |s| s.successful_searches)),
    );
    summary.insert(
        "platforms_checked".to_string(),
        Value::from(session.map_or(0, |s| s.platforms_checked)),
    );
    if let Some(Value::Object(extra)) = extra {
        for (key, value) in extra {
            summary.entry(key).or_insert(value);
        }
    }
    summary
}

/// Number of records a nested document holds: its length when it is an
/// array, the length of its `results` array when it has one, 0 otherwise.
pub(super) fn document_record_count(document: &Value) -> usize {
    match document {
        Value::Array(items) => items.len(),
        Value::Object(map) => map
            .get("results")
            .and_then(Value::as_array)
            .map_or(0, Vec::len),
        _ => 0,
    }
}

pub(super) fn render_json(report: &JsonReport<'_>) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(report)?)
}
