//! Two-stage lookup against the snapshot archive.
//!
//! Stage 1 asks the availability API for the closest capture of the handle.
//! Only when one exists does stage 2 enumerate older captures through the
//! timemap API. Stage 1 failures end the lookup; stage 2 failures degrade to
//! a warning. An alternative archive link is appended in every case.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use serde::Deserialize;
use url::Url;

use super::types::{ArchiveSnapshot, SnapshotDate, SnapshotKind, SnapshotStatus};
use crate::config::{ArchiveEndpoints, Config, MAX_ARCHIVE_ERROR_CHARS, MAX_TIMEMAP_ENTRIES};
use crate::error_handling::{categorize_reqwest_error, root_cause_message, ErrorType};
use crate::utils::sanitize::sanitize_and_truncate;

const WAYBACK_SOURCE: &str = "Wayback Machine";

#[derive(Debug, Deserialize)]
struct AvailableResponse {
    #[serde(default)]
    archived_snapshots: Option<ArchivedSnapshots>,
}

#[derive(Debug, Deserialize)]
struct ArchivedSnapshots {
    #[serde(default)]
    closest: Option<ClosestSnapshot>,
}

#[derive(Debug, Deserialize)]
struct ClosestSnapshot {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
}

/// Outcome of stage 1.
enum LatestLookup {
    Found(ArchiveSnapshot),
    /// Terminal entries; stage 2 must not run
    Stopped(Vec<ArchiveSnapshot>),
}

/// Resolves archived captures of a handle.
#[derive(Clone)]
pub struct ArchiveResolver {
    client: Arc<reqwest::Client>,
    endpoints: ArchiveEndpoints,
    available_timeout: Duration,
    timemap_timeout: Duration,
}

/// Trims whitespace, lowercases and strips one leading `@`.
pub fn normalize_handle(handle: &str) -> String {
    let handle = handle.trim().to_lowercase();
    match handle.strip_prefix('@') {
        Some(stripped) => stripped.to_string(),
        None => handle,
    }
}

impl ArchiveResolver {
    /// Builds a resolver on the shared client.
    ///
    /// Endpoint bases lose any trailing `/`; both stage timeouts come from
    /// `config`.
    pub fn new(client: Arc<reqwest::Client>, config: &Config) -> Self {
        let trim = |base: &str| base.trim_end_matches('/').to_string();
        Self {
            client,
            endpoints: ArchiveEndpoints {
                available_base: trim(&config.archive.available_base),
                timemap_base: trim(&config.archive.timemap_base),
                alternate_base: trim(&config.archive.alternate_base),
                target_prefix: config.archive.target_prefix.trim_matches('/').to_string(),
            },
            available_timeout: config.archive_timeout,
            timemap_timeout: config.timemap_timeout,
        }
    }

    /// Runs stages 1 and 2 for `handle` and returns the entries in insertion
    /// order. Never fails; every failure is an entry.
    pub async fn resolve(&self, handle: &str) -> Vec<ArchiveSnapshot> {
        let handle = normalize_handle(handle);
        let target = format!("{}/{}", self.endpoints.target_prefix, handle);
        info!("Resolving archived captures of {}", target);

        let mut entries = Vec::new();
        match self.lookup_latest(&handle, &target).await {
            LatestLookup::Found(latest) => {
                entries.push(latest);
                entries.extend(self.lookup_timemap(&target).await);
                if entries.len() == 1 {
                    entries.push(ArchiveSnapshot::note(
                        "No additional archives found for this Twitter account",
                    ));
                }
            }
            LatestLookup::Stopped(stopped) => entries.extend(stopped),
        }
        entries.push(ArchiveSnapshot::new(
            SnapshotKind::Alternative,
            SnapshotDate::Unknown,
            self.alternate_url(&target),
            SnapshotStatus::Info,
            "archive.today",
        ));

        debug!("Archive lookup for {} produced {} entries", target, entries.len());
        entries
    }

    async fn lookup_latest(&self, handle: &str, target: &str) -> LatestLookup {
        let profile_url = format!("https://{}", target);
        let error = |status: SnapshotStatus, message: String| {
            LatestLookup::Stopped(vec![ArchiveSnapshot::new(
                SnapshotKind::Error,
                SnapshotDate::Unknown,
                profile_url.clone(),
                status,
                message,
            )])
        };

        let url = match self.available_url(target) {
            Ok(url) => url,
            Err(e) => {
                return error(
                    SnapshotStatus::ApiError,
                    format!("Invalid archive endpoint: {}", e),
                )
            }
        };

        let response = match self
            .client
            .get(url)
            .timeout(self.available_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Snapshot lookup for {} failed: {}", target, e);
                return match categorize_reqwest_error(&e) {
                    ErrorType::ProbeTimeout => error(
                        SnapshotStatus::Timeout,
                        "Wayback Machine API timed out".to_string(),
                    ),
                    ErrorType::ProbeConnectError => error(
                        SnapshotStatus::ConnectionError,
                        "Network error when connecting to Wayback Machine".to_string(),
                    ),
                    _ => error(SnapshotStatus::ApiError, request_error_message(&e)),
                };
            }
        };

        let status = response.status().as_u16();
        if status != 200 {
            warn!("Snapshot lookup for {} returned status {}", target, status);
            return LatestLookup::Stopped(vec![ArchiveSnapshot::new(
                SnapshotKind::Error,
                SnapshotDate::Unknown,
                self.broad_search_url(target),
                SnapshotStatus::ApiError,
                format!("Wayback Machine API returned status code {}", status),
            )]);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => {
                warn!("Snapshot lookup for {} timed out reading the body", target);
                return error(
                    SnapshotStatus::Timeout,
                    "Wayback Machine API timed out".to_string(),
                );
            }
            Err(e) => return error(SnapshotStatus::ApiError, request_error_message(&e)),
        };
        let parsed: AvailableResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Snapshot lookup for {} returned invalid JSON: {}", target, e);
                return error(
                    SnapshotStatus::ApiError,
                    sanitize_and_truncate(
                        &format!("Invalid response from Wayback Machine API: {}", e),
                        MAX_ARCHIVE_ERROR_CHARS,
                    ),
                );
            }
        };

        let Some(closest) = parsed.archived_snapshots.and_then(|s| s.closest) else {
            info!("No archived captures of {}", target);
            return LatestLookup::Stopped(vec![
                ArchiveSnapshot::new(
                    SnapshotKind::Error,
                    SnapshotDate::Unknown,
                    profile_url.clone(),
                    SnapshotStatus::NotFound,
                    "No archives found in Wayback Machine",
                ),
                ArchiveSnapshot::new(
                    SnapshotKind::Suggestion,
                    SnapshotDate::Unknown,
                    self.broad_search_url(target),
                    SnapshotStatus::Info,
                    "Try broader Wayback Machine search",
                ),
                ArchiveSnapshot::new(
                    SnapshotKind::Suggestion,
                    SnapshotDate::Unknown,
                    self.alternate_url(target),
                    SnapshotStatus::Info,
                    "Try archive.today",
                ),
            ]);
        };

        let token = closest.timestamp.unwrap_or_default();
        let archive_url = closest
            .url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| self.capture_url(&token, target));
        debug!("Latest capture of {} ({}): {}", handle, token, archive_url);
        LatestLookup::Found(ArchiveSnapshot::new(
            SnapshotKind::LatestArchive,
            SnapshotDate::decode(&token),
            archive_url,
            SnapshotStatus::Available,
            WAYBACK_SOURCE,
        ))
    }

    async fn lookup_timemap(&self, target: &str) -> Vec<ArchiveSnapshot> {
        let url = match self.timemap_url(target) {
            Ok(url) => url,
            Err(e) => {
                warn!("Invalid timemap endpoint: {}", e);
                return Vec::new();
            }
        };
        let warning = |status: SnapshotStatus, message: String| {
            vec![ArchiveSnapshot::new(
                SnapshotKind::Warning,
                SnapshotDate::Unknown,
                url.to_string(),
                status,
                message,
            )]
        };

        let response = match self
            .client
            .get(url.clone())
            .timeout(self.timemap_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Timemap lookup for {} failed: {}", target, e);
                return match categorize_reqwest_error(&e) {
                    ErrorType::ProbeTimeout => warning(
                        SnapshotStatus::Timeout,
                        "Calendar API request timed out".to_string(),
                    ),
                    ErrorType::ProbeConnectError => warning(
                        SnapshotStatus::ConnectionError,
                        "Network error when connecting to calendar API".to_string(),
                    ),
                    _ => warning(SnapshotStatus::ApiError, request_error_message(&e)),
                };
            }
        };

        let status = response.status().as_u16();
        if status != 200 {
            warn!("Calendar API returned status code {}", status);
            return Vec::new();
        }

        // A body that times out mid-read is still a transport failure
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => {
                return warning(
                    SnapshotStatus::Timeout,
                    "Calendar API request timed out".to_string(),
                )
            }
            Err(e) => return warning(SnapshotStatus::ApiError, request_error_message(&e)),
        };
        let rows: Vec<Vec<serde_json::Value>> = match serde_json::from_str(&body) {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Error parsing calendar JSON data for {}: {}", target, e);
                return Vec::new();
            }
        };

        // First row is the header
        rows.iter()
            .skip(1)
            .take(MAX_TIMEMAP_ENTRIES)
            .filter(|row| row.len() >= 2)
            .map(|row| {
                let token = row[0].as_str().unwrap_or_default();
                let original = row[1].as_str().unwrap_or(target);
                ArchiveSnapshot::new(
                    SnapshotKind::Archive,
                    SnapshotDate::decode(token),
                    self.capture_url(token, original),
                    SnapshotStatus::Available,
                    WAYBACK_SOURCE,
                )
            })
            .collect()
    }

    fn available_url(&self, target: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("{}/wayback/available", self.endpoints.available_base))?;
        url.query_pairs_mut().append_pair("url", target);
        Ok(url)
    }

    fn timemap_url(&self, target: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("{}/web/timemap/json", self.endpoints.timemap_base))?;
        url.query_pairs_mut()
            .append_pair("url", target)
            .append_pair("matchType", "prefix")
            .append_pair("collapse", "timestamp:4");
        Ok(url)
    }

    fn capture_url(&self, token: &str, original: &str) -> String {
        format!("{}/web/{}/{}", self.endpoints.timemap_base, token, original)
    }

    fn broad_search_url(&self, target: &str) -> String {
        format!("{}/web/*/{}/*", self.endpoints.timemap_base, target)
    }

    fn alternate_url(&self, target: &str) -> String {
        format!("{}/{}", self.endpoints.alternate_base, target)
    }
}

fn request_error_message(error: &reqwest::Error) -> String {
    sanitize_and_truncate(
        &format!("Request error: {}", root_cause_message(error)),
        MAX_ARCHIVE_ERROR_CHARS,
    )
}
