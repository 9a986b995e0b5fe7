//! Configuration types.
//!
//! This module defines the library configuration struct and the enums used to
//! select log verbosity and format.

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::constants::{
    ARCHIVE_AVAILABLE_TIMEOUT, ARCHIVE_TIMEMAP_TIMEOUT, DEFAULT_ARCHIVE_ALTERNATE_BASE,
    DEFAULT_ARCHIVE_AVAILABLE_BASE, DEFAULT_ARCHIVE_TARGET_PREFIX, DEFAULT_ARCHIVE_TIMEMAP_BASE,
    DEFAULT_MAX_CONCURRENCY, DEFAULT_PROBE_TIMEOUT, DEFAULT_THROTTLE, DEFAULT_USER_AGENT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Endpoints used by the archive resolver.
///
/// All bases are scheme + host (no trailing slash). Tests point them at a
/// local mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEndpoints {
    /// Base of the `wayback/available` API
    pub available_base: String,
    /// Base of the timemap API and of archived page URLs
    pub timemap_base: String,
    /// Base of the secondary archive service
    pub alternate_base: String,
    /// Site prefix the handle is appended to (e.g. `twitter.com`)
    pub target_prefix: String,
}

impl Default for ArchiveEndpoints {
    fn default() -> Self {
        Self {
            available_base: DEFAULT_ARCHIVE_AVAILABLE_BASE.to_string(),
            timemap_base: DEFAULT_ARCHIVE_TIMEMAP_BASE.to_string(),
            alternate_base: DEFAULT_ARCHIVE_ALTERNATE_BASE.to_string(),
            target_prefix: DEFAULT_ARCHIVE_TARGET_PREFIX.to_string(),
        }
    }
}

/// Library configuration.
///
/// Constructed programmatically; the crate has no CLI of its own.
///
/// # Examples
///
/// ```
/// use osint_probe::Config;
/// use std::time::Duration;
///
/// let config = Config {
///     max_concurrency: 16,
///     probe_timeout: Duration::from_secs(3),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Per-probe timeout for platform targets
    pub probe_timeout: Duration,

    /// Timeout for the archive snapshot lookup
    pub archive_timeout: Duration,

    /// Timeout for the archive timemap lookup
    pub timemap_timeout: Duration,

    /// Maximum probes in flight at once
    pub max_concurrency: usize,

    /// Delay each worker waits before its request (zero disables throttling)
    pub throttle: Duration,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Archive service endpoints
    pub archive: ArchiveEndpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            archive_timeout: ARCHIVE_AVAILABLE_TIMEOUT,
            timemap_timeout: ARCHIVE_TIMEMAP_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            throttle: DEFAULT_THROTTLE,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            archive: ArchiveEndpoints::default(),
        }
    }
}

/// Configuration validation failures.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The worker pool needs at least one permit.
    #[error("max_concurrency must be at least 1")]
    ZeroConcurrency,

    /// A timeout of zero would fail every request immediately.
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    /// The User-Agent header must not be empty.
    #[error("user_agent must not be empty")]
    EmptyUserAgent,

    /// An archive endpoint base is not an absolute URL.
    #[error("invalid archive endpoint {name}: {value}")]
    InvalidEndpoint {
        /// Field name
        name: &'static str,
        /// Offending value
        value: String,
    },
}

impl Config {
    /// Checks the configuration for values that would make every run fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        for (name, timeout) in [
            ("probe_timeout", self.probe_timeout),
            ("archive_timeout", self.archive_timeout),
            ("timemap_timeout", self.timemap_timeout),
        ] {
            if timeout.is_zero() {
                return Err(ConfigError::ZeroTimeout(name));
            }
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::EmptyUserAgent);
        }
        for (name, value) in [
            ("available_base", &self.archive.available_base),
            ("timemap_base", &self.archive.timemap_base),
            ("alternate_base", &self.archive.alternate_base),
        ] {
            if Url::parse(value).is_err() {
                return Err(ConfigError::InvalidEndpoint {
                    name,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.probe_timeout, Duration::from_secs(5));
        assert_eq!(config.archive_timeout, Duration::from_secs(8));
        assert_eq!(config.timemap_timeout, Duration::from_secs(10));
        assert_eq!(config.max_concurrency, 8);
        assert_eq!(config.throttle, Duration::from_millis(100));
        assert_eq!(config.archive.target_prefix, "twitter.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let config = Config {
            max_concurrency: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroConcurrency));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config {
            timemap_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroTimeout("timemap_timeout"))
        );
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let mut config = Config::default();
        config.archive.alternate_base = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEndpoint {
                name: "alternate_base",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_user_agent() {
        let config = Config {
            user_agent: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyUserAgent));
    }
}
