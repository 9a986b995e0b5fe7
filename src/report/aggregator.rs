//! Incremental report building.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::record::ReportRecord;
use super::summary::ReportSummary;

/// Folds records into a report as they arrive.
///
/// Adding a record whose key is already present is a no-op, so a result
/// delivered twice is counted once.
#[derive(Debug, Clone)]
pub struct ReportAggregator<R> {
    records: Vec<R>,
    keys: HashSet<String>,
}

impl<R: ReportRecord> Default for ReportAggregator<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ReportRecord> ReportAggregator<R> {
    /// An empty aggregator.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            keys: HashSet::new(),
        }
    }

    /// Adds a record. Returns `false` when a record with the same key was
    /// already added.
    pub fn add(&mut self, record: R) -> bool {
        if !self.keys.insert(record.key()) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Adds every record in order; duplicates are skipped.
    pub fn extend(&mut self, records: impl IntoIterator<Item = R>) {
        for record in records {
            self.add(record);
        }
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Number of distinct records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True before the first record is added.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Metrics over the records added so far.
    pub fn summary(&self) -> ReportSummary {
        ReportSummary::from_records(&self.records)
    }

    /// Records matching `predicate`, in insertion order.
    pub fn filter<P>(&self, predicate: P) -> Vec<R>
    where
        P: Fn(&R) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).cloned().collect()
    }

    /// Freezes the records into a read-only report.
    pub fn finalize(
        self,
        report_type: impl Into<String>,
        identifier: impl Into<String>,
    ) -> InvestigationReport<R> {
        let summary = self.summary();
        InvestigationReport {
            report_type: report_type.into(),
            identifier: identifier.into(),
            records: self.records,
            summary,
            generated_at: Utc::now(),
        }
    }
}

/// A finalized, read-only report.
#[derive(Debug, Clone)]
pub struct InvestigationReport<R> {
    report_type: String,
    identifier: String,
    records: Vec<R>,
    summary: ReportSummary,
    generated_at: DateTime<Utc>,
}

impl<R: ReportRecord> InvestigationReport<R> {
    /// Short label such as `username_intelligence`, used in exports.
    pub fn report_type(&self) -> &str {
        &self.report_type
    }

    /// The identifier that was investigated.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Metrics computed when the report was finalized.
    pub fn summary(&self) -> &ReportSummary {
        &self.summary
    }

    /// When the report was finalized.
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Records matching `predicate`, in insertion order. The report itself
    /// is left unchanged.
    pub fn filter<P>(&self, predicate: P) -> Vec<R>
    where
        P: Fn(&R) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).cloned().collect()
    }
}
