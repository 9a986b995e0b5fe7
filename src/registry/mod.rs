//! Probe target registry.
//!
//! A registry is an ordered, validated catalogue of `ProbeTarget`s. It is
//! built once per investigation from static data and never mutated; the
//! executor and the scheduler only read it.

mod catalog;
mod template;
mod types;

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

pub use template::{encode_identifier, render_url};
pub use types::{Category, InvestigationKind, ProbeTarget, RiskTier};

/// Programmer errors in a target catalogue.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// Two targets share a name inside one category.
    #[error("duplicate target {name} in category {category}")]
    DuplicateTarget {
        /// Platform name
        name: String,
        /// Category both targets belong to
        category: Category,
    },

    /// A template does not contain exactly one `{identifier}` placeholder.
    #[error("template for {name} must contain exactly one placeholder, found {found}")]
    PlaceholderCount {
        /// Platform name
        name: String,
        /// Placeholders found
        found: usize,
    },
}

/// Ordered catalogue of probe targets.
#[derive(Debug, Clone)]
pub struct TargetRegistry {
    targets: Vec<Arc<ProbeTarget>>,
}

impl TargetRegistry {
    /// Builds a registry from targets, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` when a name repeats within a category or a
    /// template does not carry exactly one placeholder.
    pub fn new(targets: Vec<ProbeTarget>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for target in &targets {
            let found = template::placeholder_count(&target.url_template);
            if found != 1 {
                return Err(RegistryError::PlaceholderCount {
                    name: target.name.clone(),
                    found,
                });
            }
            if !seen.insert((target.category, target.name.as_str())) {
                return Err(RegistryError::DuplicateTarget {
                    name: target.name.clone(),
                    category: target.category,
                });
            }
        }
        Ok(Self {
            targets: targets.into_iter().map(Arc::new).collect(),
        })
    }

    /// Builds the built-in catalogue for an investigation kind.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in data itself is inconsistent.
    pub fn for_investigation(kind: &InvestigationKind) -> Result<Self, RegistryError> {
        let targets = match kind {
            InvestigationKind::Username => catalog::username_targets(),
            InvestigationKind::Person { location } => catalog::person_targets(location.as_deref()),
            InvestigationKind::EmailSocial => catalog::email_social_targets(),
        };
        Self::new(targets)
    }

    /// Targets in declaration order, optionally restricted to one category.
    pub fn targets_for(&self, category: Option<Category>) -> Vec<Arc<ProbeTarget>> {
        self.targets
            .iter()
            .filter(|t| category.map_or(true, |c| t.category == c))
            .cloned()
            .collect()
    }

    /// Looks a target up by category and name.
    pub fn get(&self, category: Category, name: &str) -> Option<Arc<ProbeTarget>> {
        self.targets
            .iter()
            .find(|t| t.category == category && t.name == name)
            .cloned()
    }

    /// Distinct categories in the order they first appear.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = Vec::new();
        for target in &self.targets {
            if !categories.contains(&target.category) {
                categories.push(target.category);
            }
        }
        categories
    }

    /// True when `target` is the same allocation as one held by this registry.
    pub fn contains(&self, target: &Arc<ProbeTarget>) -> bool {
        self.targets.iter().any(|t| Arc::ptr_eq(t, target))
    }

    /// Number of targets across all categories.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// True when the registry holds no target.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(name: &str, category: Category, template: &str) -> ProbeTarget {
        ProbeTarget::new(name, category, template, RiskTier::Low, "Test")
    }

    #[test]
    fn test_username_catalogue_order_and_size() {
        let registry = TargetRegistry::for_investigation(&InvestigationKind::Username)
            .expect("built-in catalogue is valid");
        assert_eq!(registry.len(), 21);
        let names: Vec<String> = registry
            .targets_for(None)
            .iter()
            .map(|t| t.name.clone())
            .collect();
        assert_eq!(names.first().map(String::as_str), Some("GitHub"));
        assert_eq!(names.last().map(String::as_str), Some("SoundCloud"));
        assert_eq!(
            registry.categories(),
            vec![
                Category::Social,
                Category::Professional,
                Category::Development,
                Category::Gaming,
                Category::Content
            ]
        );
    }

    #[test]
    fn test_all_builtin_catalogues_are_valid() {
        for kind in [
            InvestigationKind::Username,
            InvestigationKind::Person { location: None },
            InvestigationKind::Person {
                location: Some("New York".to_string()),
            },
            InvestigationKind::EmailSocial,
        ] {
            let registry = TargetRegistry::for_investigation(&kind).expect("valid catalogue");
            assert!(!registry.is_empty(), "{:?} should not be empty", kind);
        }
    }

    #[test]
    fn test_targets_for_category_slice() {
        let registry = TargetRegistry::for_investigation(&InvestigationKind::Username)
            .expect("valid catalogue");
        let gaming = registry.targets_for(Some(Category::Gaming));
        let names: Vec<&str> = gaming.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Steam", "Twitch", "Xbox"]);
        assert!(registry.targets_for(Some(Category::News)).is_empty());
    }

    #[test]
    fn test_targets_for_is_deterministic() {
        let registry = TargetRegistry::for_investigation(&InvestigationKind::EmailSocial)
            .expect("valid catalogue");
        let first: Vec<String> = registry.targets_for(None).iter().map(|t| t.name.clone()).collect();
        let second: Vec<String> = registry.targets_for(None).iter().map(|t| t.name.clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_person_location_is_appended() {
        let registry = TargetRegistry::for_investigation(&InvestigationKind::Person {
            location: Some("New York".to_string()),
        })
        .expect("valid catalogue");
        let linkedin = registry
            .get(Category::Professional, "LinkedIn")
            .expect("LinkedIn present");
        assert!(linkedin.url_template.ends_with("&location=New+York"));
        let whitepages = registry
            .get(Category::PublicRecords, "WhitePages")
            .expect("WhitePages present");
        assert!(whitepages.url_template.ends_with("{identifier}?location=New+York"));
    }

    #[test]
    fn test_duplicate_name_in_category_rejected() {
        let result = TargetRegistry::new(vec![
            target("A", Category::Social, "https://a/{identifier}"),
            target("A", Category::Social, "https://b/{identifier}"),
        ]);
        assert_eq!(
            result.err(),
            Some(RegistryError::DuplicateTarget {
                name: "A".to_string(),
                category: Category::Social
            })
        );
    }

    #[test]
    fn test_same_name_in_other_category_allowed() {
        let registry = TargetRegistry::new(vec![
            target("Medium", Category::Professional, "https://a/{identifier}"),
            target("Medium", Category::Forums, "https://b/{identifier}"),
        ])
        .expect("names are unique per category");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_placeholder_count_enforced() {
        let result = TargetRegistry::new(vec![target("A", Category::Social, "https://a/")]);
        assert_eq!(
            result.err(),
            Some(RegistryError::PlaceholderCount {
                name: "A".to_string(),
                found: 0
            })
        );
    }

    #[test]
    fn test_contains_uses_identity() {
        let registry = TargetRegistry::for_investigation(&InvestigationKind::Username)
            .expect("valid catalogue");
        let first = registry.targets_for(None)[0].clone();
        assert!(registry.contains(&first));
        let copy = Arc::new((*first).clone());
        assert!(!registry.contains(&copy));
    }
}
