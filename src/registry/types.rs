//! Probe target types.

use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// Platform category a target belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, Serialize)]
pub enum Category {
    /// Social networks
    #[strum(serialize = "Social")]
    Social,
    /// Professional networks and job sites
    #[strum(serialize = "Professional")]
    Professional,
    /// Code hosting and developer communities
    #[strum(serialize = "Development")]
    Development,
    /// Game platforms
    #[strum(serialize = "Gaming")]
    Gaming,
    /// Blogs, video and media hosting
    #[strum(serialize = "Content")]
    Content,
    /// News sites
    #[strum(serialize = "News Portals")]
    News,
    /// Forums and community boards
    #[strum(serialize = "Forums & Communities")]
    Forums,
    /// General search engines
    #[strum(serialize = "Search Engines")]
    SearchEngines,
    /// People-search and public record services
    #[strum(serialize = "Public Records")]
    PublicRecords,
}

/// How sensitive the information behind a hit is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, Serialize)]
pub enum RiskTier {
    /// Public profile data
    Low,
    /// Contact or location details
    Medium,
    /// Records that identify a person
    High,
}

/// One remote endpoint template.
///
/// Immutable once a registry is built; results hold it through an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    /// Platform name, unique within its category
    pub name: String,
    /// Category the platform belongs to
    pub category: Category,
    /// URL with a single `{identifier}` placeholder
    pub url_template: String,
    /// Sensitivity of a hit
    pub risk_tier: RiskTier,
    /// What a hit would reveal
    pub info_type: String,
}

impl ProbeTarget {
    /// Builds a target. The template is checked when a registry is built,
    /// not here.
    pub fn new(
        name: impl Into<String>,
        category: Category,
        url_template: impl Into<String>,
        risk_tier: RiskTier,
        info_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            url_template: url_template.into(),
            risk_tier,
            info_type: info_type.into(),
        }
    }
}

/// The kind of investigation a registry is built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvestigationKind {
    /// Profile pages keyed by a username
    Username,
    /// Search pages keyed by a person's name, optionally narrowed by location
    Person {
        /// Appended to the name on search pages that accept it
        location: Option<String>,
    },
    /// Social search pages keyed by an email address
    EmailSocial,
}

impl InvestigationKind {
    /// Short label used for report types and filenames.
    pub fn report_type(&self) -> &'static str {
        match self {
            InvestigationKind::Username => "username_intelligence",
            InvestigationKind::Person { .. } => "person_search",
            InvestigationKind::EmailSocial => "email_social",
        }
    }
}
