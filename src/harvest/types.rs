//! Email finding types.

use serde::Serialize;
use serde_json::Value;
use strum_macros::{Display, EnumIter};

use crate::report::ReportRecord;

/// How much a source trusts a finding. Declaration order is sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, Serialize)]
pub enum Confidence {
    /// Registration data
    #[strum(serialize = "Very High")]
    VeryHigh,
    /// Conventional role address
    High,
    /// Derived pattern, e.g. on a subdomain
    Medium,
    /// Guess
    Low,
}

/// Whether an address is believed to accept mail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
pub enum Validity {
    /// Known to accept mail
    Yes,
    /// Common role address
    Likely,
    /// Follows a plausible pattern
    Possible,
    /// Not assessed
    Unknown,
}

/// One discovered address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailFinding {
    /// Address as reported; duplicates are detected case-insensitively
    pub email: String,
    /// Data source that produced the address
    pub source: String,
    /// Trust in the finding; duplicates keep the highest
    pub confidence: Confidence,
    /// Whether the address is believed to accept mail
    pub validity: Validity,
    /// Role of the address, e.g. `Registration` or `Common Pattern`
    pub kind: String,
    /// Pattern the address follows, e.g. `info@domain`
    pub pattern: String,
}

impl EmailFinding {
    /// Builds a finding. `harvest` trims and validates the address.
    pub fn new(
        email: impl Into<String>,
        source: impl Into<String>,
        confidence: Confidence,
        validity: Validity,
        kind: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            source: source.into(),
            confidence,
            validity,
            kind: kind.into(),
            pattern: pattern.into(),
        }
    }
}

const EMAIL_COLUMNS: &[&str] = &["email", "source", "confidence", "valid", "type", "pattern"];

impl ReportRecord for EmailFinding {
    fn key(&self) -> String {
        self.email.to_lowercase()
    }

    fn is_found(&self) -> bool {
        matches!(self.confidence, Confidence::VeryHigh | Confidence::High)
    }

    fn status_label(&self) -> String {
        self.validity.to_string()
    }

    fn category_label(&self) -> Option<String> {
        Some(self.kind.clone())
    }

    fn confidence_label(&self) -> Option<String> {
        Some(self.confidence.to_string())
    }

    fn columns() -> &'static [&'static str] {
        EMAIL_COLUMNS
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.email.clone(),
            self.source.clone(),
            self.confidence.to_string(),
            self.validity.to_string(),
            self.kind.clone(),
            self.pattern.clone(),
        ]
    }

    fn to_json(&self) -> Value {
        serde_json::json!({
            "email": self.email,
            "source": self.source,
            "confidence": self.confidence.to_string(),
            "valid": self.validity.to_string(),
            "type": self.kind,
            "pattern": self.pattern,
        })
    }
}
