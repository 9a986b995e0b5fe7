//! Session-wide search counters.
//!
//! Counters are shared through an `Arc` and updated with atomics. The
//! orchestrating caller records each completed investigation once; the
//! scheduler never touches them.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::summary::ReportSummary;

/// Thread-safe counters for one operator session.
#[derive(Debug)]
pub struct SessionStats {
    total_searches: AtomicUsize,
    successful_searches: AtomicUsize,
    platforms_checked: AtomicUsize,
    started_at_ms: AtomicI64,
}

/// Point-in-time copy of the session counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Completed investigations
    pub total_searches: usize,
    /// Investigations with at least one hit
    pub successful_searches: usize,
    /// Records across all investigations
    pub platforms_checked: usize,
    /// Session start, or last reset
    pub started_at: DateTime<Utc>,
    /// Successful searches as a percentage; 0 before any search
    pub success_rate: f64,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStats {
    /// Zeroed counters with the clock started now.
    pub fn new() -> Self {
        Self {
            total_searches: AtomicUsize::new(0),
            successful_searches: AtomicUsize::new(0),
            platforms_checked: AtomicUsize::new(0),
            started_at_ms: AtomicI64::new(Utc::now().timestamp_millis()),
        }
    }

    /// Records one completed investigation.
    pub fn record(&self, summary: &ReportSummary) {
        self.total_searches.fetch_add(1, Ordering::SeqCst);
        if summary.success {
            self.successful_searches.fetch_add(1, Ordering::SeqCst);
        }
        self.platforms_checked
            .fetch_add(summary.total_targets, Ordering::SeqCst);
    }

    /// Zeroes every counter and restarts the session clock.
    pub fn reset(&self) {
        self.total_searches.store(0, Ordering::SeqCst);
        self.successful_searches.store(0, Ordering::SeqCst);
        self.platforms_checked.store(0, Ordering::SeqCst);
        self.started_at_ms
            .store(Utc::now().timestamp_millis(), Ordering::SeqCst);
    }

    /// Reads every counter.
    pub fn snapshot(&self) -> SessionSnapshot {
        let total_searches = self.total_searches.load(Ordering::SeqCst);
        let successful_searches = self.successful_searches.load(Ordering::SeqCst);
        let started_at = DateTime::from_timestamp_millis(self.started_at_ms.load(Ordering::SeqCst))
            .unwrap_or_else(Utc::now);
        SessionSnapshot {
            total_searches,
            successful_searches,
            platforms_checked: self.platforms_checked.load(Ordering::SeqCst),
            started_at,
            success_rate: if total_searches == 0 {
                0.0
            } else {
                successful_searches as f64 / total_searches as f64 * 100.0
            },
        }
    }
}
