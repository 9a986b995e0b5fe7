//! Single-target probe execution.

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use super::types::{ProbeOutcome, ProbeResult};
use crate::error_handling::{
    categorize_status, to_probe_error, update_error_stats, ErrorType, ProbeError,
    ProcessingStats,
};
use crate::registry::{render_url, ProbeTarget};

/// Issues one bounded-time GET per target and classifies the outcome.
///
/// The executor holds no mutable state besides optional failure counters, so
/// one instance is shared by every worker of a run.
#[derive(Clone)]
pub struct ProbeExecutor {
    client: Arc<reqwest::Client>,
    stats: Option<Arc<ProcessingStats>>,
}

impl ProbeExecutor {
    /// An executor on the shared client, without failure counters.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self {
            client,
            stats: None,
        }
    }

    /// Attaches failure counters that every probe updates.
    pub fn with_stats(mut self, stats: Arc<ProcessingStats>) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Probes `target` for `identifier`.
    ///
    /// Never fails: transport problems become `Timeout` or `Error` outcomes.
    /// There are no retries; a failed probe is final for the run.
    pub async fn probe(
        &self,
        target: &Arc<ProbeTarget>,
        identifier: &str,
        timeout: Duration,
    ) -> ProbeResult {
        let url = match render_url(&target.url_template, identifier) {
            Ok(url) => url,
            Err(e) => {
                debug!("Skipping {}: {}", target.name, e);
                self.record(ErrorType::MalformedTarget);
                return ProbeResult::new(
                    Arc::clone(target),
                    target.url_template.clone(),
                    ProbeOutcome::error(e.to_string()),
                );
            }
        };

        debug!("Probing {} ({}) at {}", target.name, target.category, url);
        let outcome = match self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status().as_u16();
                if let Some(error_type) = categorize_status(status) {
                    self.record(error_type);
                }
                ProbeOutcome::from_http_status(status)
            }
            Err(e) => {
                if let Some(stats) = &self.stats {
                    update_error_stats(stats, &e);
                }
                match to_probe_error(&e) {
                    ProbeError::TransportTimeout => ProbeOutcome::Timeout,
                    other => ProbeOutcome::error(error_detail(other)),
                }
            }
        };
        debug!("{} -> {}", target.name, outcome.status());

        ProbeResult::new(Arc::clone(target), url.to_string(), outcome)
    }

    fn record(&self, error_type: ErrorType) {
        if let Some(stats) = &self.stats {
            stats.increment_error(error_type);
        }
    }
}

fn error_detail(error: ProbeError) -> String {
    match error {
        ProbeError::TransportError(detail) | ProbeError::DecodeError(detail) => detail,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeStatus;
    use crate::registry::{Category, RiskTier};

    fn executor() -> ProbeExecutor {
        ProbeExecutor::new(Arc::new(reqwest::Client::new()))
    }

    #[tokio::test]
    async fn test_malformed_template_fails_fast() {
        let stats = Arc::new(ProcessingStats::new());
        let executor = executor().with_stats(Arc::clone(&stats));
        let target = Arc::new(ProbeTarget::new(
            "Broken",
            Category::Social,
            "ftp://example.com/{identifier}",
            RiskTier::Low,
            "Nothing",
        ));
        let result = executor
            .probe(&target, "octocat", Duration::from_secs(1))
            .await;
        assert_eq!(result.status(), ProbeStatus::Error);
        assert_eq!(result.error_detail(), Some("malformed template"));
        assert_eq!(result.url, "ftp://example.com/{identifier}");
        assert!(Arc::ptr_eq(&result.target, &target));
        assert_eq!(stats.get_error_count(ErrorType::MalformedTarget), 1);
    }

    #[tokio::test]
    async fn test_connection_refused_is_error_with_short_detail() {
        let executor = executor();
        let target = Arc::new(ProbeTarget::new(
            "Closed",
            Category::Social,
            "http://127.0.0.1:9/{identifier}",
            RiskTier::Low,
            "Nothing",
        ));
        let result = executor
            .probe(&target, "octocat", Duration::from_secs(2))
            .await;
        assert_eq!(result.status(), ProbeStatus::Error);
        let detail = result.error_detail().expect("error detail");
        assert!(!detail.is_empty());
        assert!(detail.chars().count() <= crate::config::MAX_ERROR_DETAIL_CHARS);
        assert_eq!(result.http_status(), None);
    }

    #[test]
    fn test_error_detail_unwraps_transport_message() {
        assert_eq!(
            error_detail(ProbeError::TransportError("dns error".to_string())),
            "dns error"
        );
        assert_eq!(error_detail(ProbeError::MalformedTarget), "malformed template");
    }
}
