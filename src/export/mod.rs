//! Report export.
//!
//! This module renders finalized reports as JSON, CSV or HTML and names the
//! resulting file `{report_type}_report_{YYYYMMDD_HHMMSS}.{ext}`.

mod csv;
mod html;
mod json;
mod types;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::debug;
use serde_json::Value;

use crate::report::{InvestigationReport, ReportRecord, SessionStats};
use crate::utils::file_timestamp;

pub use types::{ExportArtifact, ExportError, ExportFormat};

use html::{HtmlBody, HtmlTable};
use json::JsonReport;

/// Renders reports, stamping them with the session counters when a session
/// is attached.
#[derive(Clone, Default)]
pub struct Exporter {
    session: Option<Arc<SessionStats>>,
}

impl Exporter {
    /// An exporter without a session; session counters are exported as 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// An exporter that stamps every export with `session`.
    pub fn with_session(session: Arc<SessionStats>) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Exports a flat report in any supported format.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if serialization fails.
    pub fn export<R: ReportRecord>(
        &self,
        report: &InvestigationReport<R>,
        format: ExportFormat,
    ) -> Result<ExportArtifact, ExportError> {
        self.export_at(report, format, Utc::now())
    }

    /// Same as `export`, with an explicit generation time.
    pub fn export_at<R: ReportRecord>(
        &self,
        report: &InvestigationReport<R>,
        format: ExportFormat,
        at: DateTime<Utc>,
    ) -> Result<ExportArtifact, ExportError> {
        let records = report.records();
        debug!(
            "Exporting {} records of {} as {:?}",
            records.len(),
            report.report_type(),
            format
        );

        let payload = match format {
            ExportFormat::Json => {
                let data = Value::Array(records.iter().map(ReportRecord::to_json).collect());
                let session = self.session.as_ref().map(|s| s.snapshot());
                let extra = serde_json::to_value(report.summary())?;
                let session_id = session_id(at);
                json::render_json(&JsonReport {
                    report_type: report.report_type(),
                    generated_at: at.to_rfc3339(),
                    session_id: &session_id,
                    identifier: Some(report.identifier()),
                    data: &data,
                    summary: json::summary_block(records.len(), session.as_ref(), Some(extra)),
                })?
            }
            ExportFormat::Csv => csv::render_csv(records)?,
            ExportFormat::Html => {
                let summary = report.summary();
                let line = format!(
                    "{} of {} found ({:.1}% hit rate) for \"{}\", {} high risk",
                    summary.found_count,
                    summary.total_targets,
                    summary.success_rate,
                    report.identifier(),
                    summary.high_risk_found_count
                );
                let body = HtmlBody::Table(HtmlTable {
                    columns: R::columns().iter().map(|c| c.to_string()).collect(),
                    rows: records.iter().map(|r| (r.is_found(), r.row())).collect(),
                });
                html::render_html(report.report_type(), at, Some(&line), &body)
            }
        };

        Ok(artifact(report.report_type(), format, at, payload))
    }

    /// Exports a nested document (e.g. a WHOIS or DNS result supplied by an
    /// external client).
    ///
    /// # Errors
    ///
    /// CSV is not defined for nested documents and returns
    /// `ExportError::UnsupportedExport`.
    pub fn export_document(
        &self,
        report_type: &str,
        document: &Value,
        format: ExportFormat,
    ) -> Result<ExportArtifact, ExportError> {
        let at = Utc::now();
        let payload = match format {
            ExportFormat::Json => {
                let session = self.session.as_ref().map(|s| s.snapshot());
                let session_id = session_id(at);
                json::render_json(&JsonReport {
                    report_type,
                    generated_at: at.to_rfc3339(),
                    session_id: &session_id,
                    identifier: None,
                    data: document,
                    summary: json::summary_block(
                        json::document_record_count(document),
                        session.as_ref(),
                        None,
                    ),
                })?
            }
            ExportFormat::Csv => {
                return Err(ExportError::UnsupportedExport {
                    format: "csv".to_string(),
                    reason: "nested documents have no tabular form",
                })
            }
            ExportFormat::Html => {
                html::render_html(report_type, at, None, &html::document_body(document))
            }
        };
        Ok(artifact(report_type, format, at, payload))
    }
}

/// `session_{YYYYMMDD_HHMMSS}`.
pub fn session_id(at: DateTime<Utc>) -> String {
    format!("session_{}", file_timestamp(at))
}

/// `{report_type}_report_{YYYYMMDD_HHMMSS}.{ext}`.
pub fn report_filename(report_type: &str, format: ExportFormat, at: DateTime<Utc>) -> String {
    format!(
        "{}_report_{}.{}",
        report_type,
        file_timestamp(at),
        format.extension()
    )
}

fn artifact(
    report_type: &str,
    format: ExportFormat,
    at: DateTime<Utc>,
    payload: String,
) -> ExportArtifact {
    ExportArtifact {
        payload,
        filename: report_filename(report_type, format, at),
        mime_type: format.mime_type(),
    }
}
