//! Email address discovery for a domain.
//!
//! Findings come from pluggable `EmailSource`s: results of external lookups
//! (WHOIS, certificate logs, crawlers) are handed in through `StaticSource`,
//! and `RolePatternSource` adds common role addresses. `harvest` merges them.

mod types;

use std::collections::HashMap;
use std::sync::LazyLock;

use log::{debug, info};
use regex::Regex;
use thiserror::Error;

pub use types::{Confidence, EmailFinding, Validity};

/// Role mailboxes most organisations run.
pub const COMMON_ROLE_PATTERNS: &[&str] = &["sales", "support", "hello", "contact", "info"];

/// Subdomains that commonly host their own mailboxes.
pub const COMMON_MAIL_SUBDOMAINS: &[&str] = &["mail", "webmail", "support"];

static EMAIL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").ok()
});

/// Caller errors of `harvest`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HarvestError {
    /// Nothing usable was left after normalising the domain.
    #[error("invalid domain: {0:?}")]
    InvalidDomain(String),
}

/// A provider of candidate addresses for a domain.
pub trait EmailSource: Send + Sync {
    /// Name recorded on findings that do not carry their own.
    fn name(&self) -> &str;

    /// Candidate findings for `domain` (already normalised).
    fn findings(&self, domain: &str) -> Vec<EmailFinding>;
}

/// Common role addresses (`info@`, `sales@`, ...) at low confidence.
#[derive(Debug, Clone, Default)]
pub struct RolePatternSource;

impl EmailSource for RolePatternSource {
    fn name(&self) -> &str {
        "Pattern Analysis"
    }

    fn findings(&self, domain: &str) -> Vec<EmailFinding> {
        COMMON_ROLE_PATTERNS
            .iter()
            .map(|role| {
                EmailFinding::new(
                    format!("{}@{}", role, domain),
                    self.name(),
                    Confidence::Low,
                    Validity::Unknown,
                    "Common Pattern",
                    format!("{}@domain", role),
                )
            })
            .collect()
    }
}

/// Findings fetched elsewhere, e.g. by a WHOIS client.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    findings: Vec<EmailFinding>,
}

impl StaticSource {
    /// A source named `name` that returns `findings` for every domain.
    pub fn new(name: impl Into<String>, findings: Vec<EmailFinding>) -> Self {
        Self {
            name: name.into(),
            findings,
        }
    }

    /// Wraps plain addresses, e.g. the `emails` field of a WHOIS record.
    pub fn from_addresses<I, S>(
        name: impl Into<String>,
        addresses: I,
        confidence: Confidence,
        validity: Validity,
        kind: &str,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let findings = addresses
            .into_iter()
            .map(|address| {
                EmailFinding::new(address, name.clone(), confidence, validity, kind, name.clone())
            })
            .collect();
        Self { name, findings }
    }
}

impl EmailSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn findings(&self, _domain: &str) -> Vec<EmailFinding> {
        self.findings.clone()
    }
}

/// Options for `harvest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestOptions {
    /// Add `info@` addresses on common mail subdomains
    pub include_subdomains: bool,
    /// Keep source-reported validity; otherwise every finding is `Unknown`
    pub check_validity: bool,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            include_subdomains: false,
            check_validity: true,
        }
    }
}

/// Reduces user input to a lowercase host name: scheme, path, query and port
/// are removed. Returns `None` when no dotted host name remains.
pub fn normalize_domain(domain: &str) -> Option<String> {
    let domain = domain.trim().to_lowercase();
    let domain = domain
        .strip_prefix("https://")
        .or_else(|| domain.strip_prefix("http://"))
        .unwrap_or(&domain);
    let host = domain
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default()
        .split(':')
        .next()
        .unwrap_or_default()
        .trim_matches('.');
    let valid = !host.is_empty()
        && host.contains('.')
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    valid.then(|| host.to_string())
}

/// Syntactic address check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .map_or(false, |pattern| pattern.is_match(email))
}

/// Collects findings for `domain` from every source.
///
/// Invalid addresses are dropped, duplicates (case-insensitive) keep the
/// most confident finding, and the result is sorted stably by confidence.
///
/// # Errors
///
/// Returns `HarvestError::InvalidDomain` when `domain` does not look like a
/// host name.
pub fn harvest(
    domain: &str,
    sources: &[&dyn EmailSource],
    options: HarvestOptions,
) -> Result<Vec<EmailFinding>, HarvestError> {
    let domain =
        normalize_domain(domain).ok_or_else(|| HarvestError::InvalidDomain(domain.to_string()))?;
    info!("Harvesting addresses for {} from {} sources", domain, sources.len());

    let mut candidates = Vec::new();
    for source in sources {
        let found = source.findings(&domain);
        debug!("{} returned {} candidates", source.name(), found.len());
        candidates.extend(found);
    }
    if options.include_subdomains {
        candidates.extend(COMMON_MAIL_SUBDOMAINS.iter().map(|sub| {
            EmailFinding::new(
                format!("info@{}.{}", sub, domain),
                "Subdomain Analysis",
                Confidence::Low,
                Validity::Unknown,
                "Subdomain",
                "info@subdomain.domain",
            )
        }));
    }

    let mut findings: Vec<EmailFinding> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for mut candidate in candidates {
        candidate.email = candidate.email.trim().to_string();
        if !is_valid_email(&candidate.email) {
            debug!("Dropping invalid address {:?}", candidate.email);
            continue;
        }
        if !options.check_validity {
            candidate.validity = Validity::Unknown;
        }
        let key = candidate.email.to_lowercase();
        match index.get(&key) {
            Some(&i) if candidate.confidence < findings[i].confidence => findings[i] = candidate,
            Some(_) => {}
            None => {
                index.insert(key, findings.len());
                findings.push(candidate);
            }
        }
    }

    findings.sort_by_key(|f| f.confidence);
    info!("Found {} addresses for {}", findings.len(), domain);
    Ok(findings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_domain() {
        assert_eq!(
            normalize_domain(" HTTPS://Example.com/about?x=1 "),
            Some("example.com".to_string())
        );
        assert_eq!(
            normalize_domain("example.com:8443"),
            Some("example.com".to_string())
        );
        assert_eq!(normalize_domain("localhost"), None);
        assert_eq!(normalize_domain("   "), None);
        assert_eq!(normalize_domain("exa mple.com"), None);
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("info@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co.uk"));
        assert!(!is_valid_email("Note"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@example.com"));
    }

    #[test]
    fn test_harvest_dedups_keeping_highest_confidence() {
        let whois = StaticSource::from_addresses(
            "WHOIS Records",
            ["Info@Example.com", "abuse@example.com", "not-an-email"],
            Confidence::VeryHigh,
            Validity::Yes,
            "Registration",
        );
        let roles = RolePatternSource;
        let findings = harvest("example.com", &[&roles, &whois], HarvestOptions::default())
            .expect("valid domain");

        let emails: Vec<&str> = findings.iter().map(|f| f.email.as_str()).collect();
        assert_eq!(emails.len(), 6);
        assert_eq!(emails[0], "Info@Example.com");
        assert_eq!(emails[1], "abuse@example.com");
        assert!(findings[..2]
            .iter()
            .all(|f| f.confidence == Confidence::VeryHigh));
        assert!(findings[2..].iter().all(|f| f.confidence == Confidence::Low));
        assert!(!emails.contains(&"info@example.com"));
    }

    #[test]
    fn test_harvest_without_validity_check() {
        let whois = StaticSource::from_addresses(
            "WHOIS Records",
            ["admin@example.com"],
            Confidence::VeryHigh,
            Validity::Yes,
            "Registration",
        );
        let findings = harvest(
            "example.com",
            &[&whois],
            HarvestOptions {
                include_subdomains: true,
                check_validity: false,
            },
        )
        .expect("valid domain");
        assert!(findings.iter().all(|f| f.validity == Validity::Unknown));
        assert!(findings
            .iter()
            .any(|f| f.email == "info@webmail.example.com"));
        assert_eq!(findings.len(), 1 + COMMON_MAIL_SUBDOMAINS.len());
    }

    #[test]
    fn test_harvest_rejects_bad_domain() {
        assert_eq!(
            harvest("nodot", &[], HarvestOptions::default()),
            Err(HarvestError::InvalidDomain("nodot".to_string()))
        );
    }
}
