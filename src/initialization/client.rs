//! HTTP client initialization.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::{Config, TCP_CONNECT_TIMEOUT};

/// Initializes the shared HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - The fixed User-Agent header from the configuration
/// - A connect timeout, so a dead host cannot hold a worker past its probe timeout
/// - Default redirect following
///
/// No overall timeout is set here: every request carries its own, because
/// platform probes and archive lookups use different limits.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .connect_timeout(TCP_CONNECT_TIMEOUT.min(config.probe_timeout))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
