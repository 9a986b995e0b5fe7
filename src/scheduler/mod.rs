//! Bounded worker pool driving one probe per target.
//!
//! Every target gets its own tokio task. A semaphore caps how many probes are
//! in flight, each worker sleeps the throttle delay before its request, and
//! results are collected by a single loop that also delivers progress
//! callbacks, so `completed` increases by exactly one per callback.
//!
//! Cancellation is observed between probes: workers that have not started
//! return immediately, in-flight tasks are aborted, and results already
//! collected are returned unchanged.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{info, warn};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::app::{log_progress, print_error_statistics};
use crate::config::Config;
use crate::error_handling::{ErrorType, ProcessingStats};
use crate::initialization::init_semaphore;
use crate::probe::{ProbeExecutor, ProbeOutcome, ProbeResult};
use crate::registry::ProbeTarget;

/// Called with `(completed, total)` after every collected result.
pub type ProgressCallback = Option<Arc<dyn Fn(usize, usize) + Send + Sync>>;

/// Detail stored on the result of a probe task that panicked.
pub const TASK_PANIC_DETAIL: &str = "probe task panicked";

/// Results of one scheduler run.
#[derive(Debug)]
pub struct RunOutcome {
    /// Collected results in completion order
    pub results: Vec<ProbeResult>,
    /// Targets scheduled
    pub total: usize,
    /// True when the run was cancelled before every target completed
    pub cancelled: bool,
    /// Failure counters for this run
    pub errors: Arc<ProcessingStats>,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunOutcome {
    /// Number of collected results.
    pub fn completed(&self) -> usize {
        self.results.len()
    }
}

/// Runs the executor over a target set.
pub struct Scheduler {
    executor: ProbeExecutor,
    max_concurrency: usize,
    timeout: Duration,
    throttle: Duration,
}

impl Scheduler {
    /// Builds a scheduler using the concurrency, probe timeout and throttle
    /// from `config`.
    pub fn new(executor: ProbeExecutor, config: &Config) -> Self {
        Self {
            executor,
            max_concurrency: config.max_concurrency.max(1),
            timeout: config.probe_timeout,
            throttle: config.throttle,
        }
    }

    /// Overrides the per-probe timeout (slower endpoint classes).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Probes every target once for `identifier`.
    ///
    /// A failing target never aborts the run. Result order follows
    /// completion, not submission; callers identify results by their target.
    pub async fn run(
        &self,
        targets: &[Arc<ProbeTarget>],
        identifier: &str,
        on_progress: ProgressCallback,
        cancel: &CancellationToken,
    ) -> RunOutcome {
        let start_time = Instant::now();
        let total = targets.len();
        let errors = Arc::new(ProcessingStats::new());
        let executor = self.executor.clone().with_stats(Arc::clone(&errors));
        let semaphore = init_semaphore(self.max_concurrency);
        let identifier: Arc<str> = Arc::from(identifier.trim());

        info!(
            "Probing {} targets for '{}' (concurrency {})",
            total, identifier, self.max_concurrency
        );

        let mut tasks = FuturesUnordered::new();
        let mut abort_handles = Vec::with_capacity(total);
        for target in targets {
            let handle = tokio::spawn(probe_task(
                executor.clone(),
                Arc::clone(&semaphore),
                cancel.clone(),
                Arc::clone(target),
                Arc::clone(&identifier),
                self.timeout,
                self.throttle,
            ));
            abort_handles.push(handle.abort_handle());
            let target = Arc::clone(target);
            tasks.push(async move { (target, handle.await) });
        }

        let mut results = Vec::with_capacity(total);
        let mut cancelled = false;
        loop {
            // Every task has been collected; a late cancellation changes nothing
            if tasks.is_empty() {
                break;
            }
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    cancelled = true;
                    break;
                }
                next = tasks.next() => next,
            };
            let Some((target, joined)) = next else {
                break;
            };

            let result = match joined {
                Ok(Some(result)) => result,
                // Worker saw the cancellation before probing
                Ok(None) => continue,
                Err(join_error) if join_error.is_panic() => {
                    warn!("Probe task for {} panicked: {:?}", target.name, join_error);
                    errors.increment_error(ErrorType::TaskPanicked);
                    let url = target.url_template.clone();
                    ProbeResult::new(target, url, ProbeOutcome::error(TASK_PANIC_DETAIL))
                }
                Err(_) => continue,
            };
            results.push(result);
            if let Some(callback) = &on_progress {
                callback(results.len(), total);
            }
        }

        if cancelled {
            for handle in &abort_handles {
                handle.abort();
            }
            warn!(
                "Run cancelled after {} of {} targets completed",
                results.len(),
                total
            );
        }

        log_progress(start_time, results.len(), total);
        print_error_statistics(&errors);

        RunOutcome {
            results,
            total,
            cancelled,
            errors,
            elapsed: start_time.elapsed(),
        }
    }
}

async fn probe_task(
    executor: ProbeExecutor,
    semaphore: Arc<Semaphore>,
    cancel: CancellationToken,
    target: Arc<ProbeTarget>,
    identifier: Arc<str>,
    timeout: Duration,
    throttle: Duration,
) -> Option<ProbeResult> {
    let _permit = tokio::select! {
        biased;
        _ = cancel.cancelled() => return None,
        permit = semaphore.acquire_owned() => permit.ok()?,
    };

    if !throttle.is_zero() {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return None,
            _ = tokio::time::sleep(throttle) => {}
        }
    }
    if cancel.is_cancelled() {
        return None;
    }

    Some(executor.probe(&target, &identifier, timeout).await)
}
