//! osint_probe library: fan an identifier out to many web endpoints
//!
//! This library checks one identifier (a username, a person's name, an email
//! address, a social handle) against a catalogue of remote endpoints, classifies
//! every outcome into a fixed status taxonomy, aggregates the results into a
//! report with derived metrics and exports it as JSON, CSV or HTML.
//!
//! # Example
//!
//! ```no_run
//! use osint_probe::{Config, ExportFormat, InvestigationKind, Investigator, SessionStats};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Arc::new(SessionStats::new());
//! let investigator = Investigator::new(Config::default(), Arc::clone(&session))?;
//!
//! let report = investigator
//!     .investigate(&InvestigationKind::Username, "octocat", None, &CancellationToken::new())
//!     .await?;
//! println!(
//!     "{} of {} platforms found",
//!     report.summary().found_count,
//!     report.summary().total_targets
//! );
//!
//! let artifact = investigator.exporter().export(&report, ExportFormat::Json)?;
//! std::fs::write(&artifact.filename, artifact.payload)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
pub mod archive;
pub mod config;
mod error_handling;
pub mod export;
pub mod harvest;
pub mod initialization;
pub mod probe;
pub mod registry;
pub mod report;
pub mod scheduler;
mod utils;

// Re-export public API
pub use archive::{ArchiveFilters, ArchiveResolver, ArchiveSnapshot, DateRange};
pub use config::{Config, ConfigError, LogFormat, LogLevel};
pub use error_handling::{ErrorType, InitializationError, ProbeError, ProcessingStats};
pub use export::{ExportArtifact, ExportError, ExportFormat, Exporter};
pub use harvest::{EmailFinding, EmailSource, HarvestOptions};
pub use initialization::{init_logger, init_logger_with};
pub use probe::{ProbeExecutor, ProbeOutcome, ProbeResult, ProbeStatus};
pub use registry::{Category, InvestigationKind, ProbeTarget, RegistryError, RiskTier, TargetRegistry};
pub use report::{InvestigationReport, ReportAggregator, ReportRecord, ReportSummary, SessionStats};
pub use run::{Investigator, ARCHIVE_REPORT_TYPE, HARVEST_REPORT_TYPE};
pub use scheduler::{ProgressCallback, RunOutcome, Scheduler};

// Internal run module (ties the registry, scheduler, resolver and reports together)
mod run {
    use std::sync::Arc;

    use anyhow::{bail, Context, Result};
    use log::info;
    use tokio_util::sync::CancellationToken;

    use crate::archive::{ArchiveFilters, ArchiveResolver, ArchiveSnapshot};
    use crate::config::Config;
    use crate::export::Exporter;
    use crate::harvest::{harvest, EmailFinding, EmailSource, HarvestOptions};
    use crate::initialization::init_client;
    use crate::probe::{ProbeExecutor, ProbeResult};
    use crate::registry::{InvestigationKind, TargetRegistry};
    use crate::report::{InvestigationReport, ReportAggregator, SessionStats};
    use crate::scheduler::{ProgressCallback, Scheduler};

    /// Report type of archive lookups.
    pub const ARCHIVE_REPORT_TYPE: &str = "wayback_tweets";

    /// Report type of email harvests.
    pub const HARVEST_REPORT_TYPE: &str = "email_harvest";

    /// Entry point for investigations.
    ///
    /// Owns the shared HTTP client and records every completed investigation
    /// once in the session counters it was given.
    pub struct Investigator {
        config: Config,
        client: Arc<reqwest::Client>,
        session: Arc<SessionStats>,
    }

    impl Investigator {
        /// Validates `config` and builds the shared HTTP client.
        ///
        /// # Errors
        ///
        /// Returns an error if the configuration is invalid or the HTTP client
        /// cannot be built.
        pub fn new(config: Config, session: Arc<SessionStats>) -> Result<Self> {
            config
                .validate()
                .context("Configuration validation failed")?;
            let client = init_client(&config).context("Failed to initialize HTTP client")?;
            Ok(Self {
                config,
                client,
                session,
            })
        }

        /// The validated configuration.
        pub fn config(&self) -> &Config {
            &self.config
        }

        /// Session counters updated by every completed investigation.
        pub fn session(&self) -> &Arc<SessionStats> {
            &self.session
        }

        /// An exporter stamped with this investigator's session counters.
        pub fn exporter(&self) -> Exporter {
            Exporter::with_session(Arc::clone(&self.session))
        }

        /// Probes every target of `kind` for `identifier`.
        ///
        /// A cancelled run still returns a report of the results completed so
        /// far, but it is not recorded in the session counters.
        ///
        /// # Errors
        ///
        /// Returns an error for an empty identifier or an inconsistent
        /// built-in catalogue. Individual probe failures never fail the run.
        pub async fn investigate(
            &self,
            kind: &InvestigationKind,
            identifier: &str,
            on_progress: ProgressCallback,
            cancel: &CancellationToken,
        ) -> Result<InvestigationReport<ProbeResult>> {
            let identifier = identifier.trim();
            if identifier.is_empty() {
                bail!("identifier must not be empty");
            }
            let registry = TargetRegistry::for_investigation(kind)
                .context("Failed to build target registry")?;

            let scheduler = Scheduler::new(ProbeExecutor::new(Arc::clone(&self.client)), &self.config);
            let outcome = scheduler
                .run(&registry.targets_for(None), identifier, on_progress, cancel)
                .await;

            let mut aggregator = ReportAggregator::new();
            aggregator.extend(outcome.results);
            let report = aggregator.finalize(kind.report_type(), identifier);

            if outcome.cancelled {
                info!(
                    "{} for '{}' cancelled; session counters unchanged",
                    kind.report_type(),
                    identifier
                );
            } else {
                self.session.record(report.summary());
            }
            info!(
                "{} for '{}': {} of {} found",
                kind.report_type(),
                identifier,
                report.summary().found_count,
                report.summary().total_targets
            );
            Ok(report)
        }

        /// Resolves archived captures of a social handle and applies `filters`.
        ///
        /// # Errors
        ///
        /// Returns an error for an empty handle.
        pub async fn archive_lookup(
            &self,
            handle: &str,
            filters: &ArchiveFilters,
        ) -> Result<InvestigationReport<ArchiveSnapshot>> {
            let normalized = crate::archive::normalize_handle(handle);
            if normalized.is_empty() {
                bail!("handle must not be empty");
            }

            let resolver = ArchiveResolver::new(Arc::clone(&self.client), &self.config);
            let entries = filters.apply(resolver.resolve(handle).await);

            let mut aggregator = ReportAggregator::new();
            aggregator.extend(entries);
            let report = aggregator.finalize(ARCHIVE_REPORT_TYPE, normalized);
            self.session.record(report.summary());
            Ok(report)
        }

        /// Collects email addresses for `domain` from `sources`.
        ///
        /// # Errors
        ///
        /// Returns an error when `domain` is not a host name.
        pub fn harvest_emails(
            &self,
            domain: &str,
            sources: &[&dyn EmailSource],
            options: HarvestOptions,
        ) -> Result<InvestigationReport<EmailFinding>> {
            let findings = harvest(domain, sources, options).context("Email harvest failed")?;
            let domain = crate::harvest::normalize_domain(domain).unwrap_or_default();

            let mut aggregator = ReportAggregator::new();
            aggregator.extend(findings);
            let report = aggregator.finalize(HARVEST_REPORT_TYPE, domain);
            self.session.record(report.summary());
            Ok(report)
        }
    }
}
