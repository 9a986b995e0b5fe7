//! Summary metrics over a set of report records.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::record::ReportRecord;
use crate::registry::RiskTier;

/// Derived counters of a report.
///
/// `found_count <= total_targets` and `high_risk_found_count <= found_count`
/// hold by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ReportSummary {
    /// Number of records
    pub total_targets: usize,
    /// Records that are hits
    pub found_count: usize,
    /// Hits on high-risk targets
    pub high_risk_found_count: usize,
    /// Distinct categories with at least one hit
    pub categories_found: usize,
    /// Hits as a percentage of all records; 0 for an empty report
    pub success_rate: f64,
    /// True when at least one record is a hit
    pub success: bool,
    /// All records per status label
    pub status_counts: BTreeMap<String, usize>,
    /// Hits per category
    pub category_counts: BTreeMap<String, usize>,
    /// Hits per risk tier
    pub risk_distribution: BTreeMap<String, usize>,
    /// All records per confidence level
    pub confidence_distribution: BTreeMap<String, usize>,
}

impl ReportSummary {
    /// Computes every metric in one pass over `records`.
    pub fn from_records<R: ReportRecord>(records: &[R]) -> Self {
        let mut summary = ReportSummary {
            total_targets: records.len(),
            ..Default::default()
        };
        let mut categories = BTreeSet::new();

        for record in records {
            *summary.status_counts.entry(record.status_label()).or_default() += 1;
            if let Some(confidence) = record.confidence_label() {
                *summary
                    .confidence_distribution
                    .entry(confidence)
                    .or_default() += 1;
            }
            if !record.is_found() {
                continue;
            }

            summary.found_count += 1;
            if let Some(category) = record.category_label() {
                *summary.category_counts.entry(category.clone()).or_default() += 1;
                categories.insert(category);
            }
            if let Some(risk) = record.risk_tier() {
                *summary.risk_distribution.entry(risk.to_string()).or_default() += 1;
                if risk == RiskTier::High {
                    summary.high_risk_found_count += 1;
                }
            }
        }

        summary.categories_found = categories.len();
        summary.success = summary.found_count > 0;
        summary.success_rate = if summary.total_targets == 0 {
            0.0
        } else {
            summary.found_count as f64 / summary.total_targets as f64 * 100.0
        };
        summary
    }
}
