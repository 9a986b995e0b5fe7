//! Property tests for status classification and report metrics.

use std::sync::Arc;

use proptest::prelude::*;

use osint_probe::probe::classify_status;
use osint_probe::registry::encode_identifier;
use osint_probe::{
    Category, ProbeOutcome, ProbeResult, ProbeStatus, ProbeTarget, ReportAggregator, RiskTier,
};

fn outcome_strategy() -> impl Strategy<Value = ProbeOutcome> {
    prop_oneof![
        (100u16..600).prop_map(ProbeOutcome::from_http_status),
        Just(ProbeOutcome::from_http_status(200)),
        Just(ProbeOutcome::Timeout),
        "[a-z ]{0,20}".prop_map(ProbeOutcome::error),
    ]
}

fn risk_strategy() -> impl Strategy<Value = RiskTier> {
    prop_oneof![Just(RiskTier::Low), Just(RiskTier::Medium), Just(RiskTier::High)]
}

fn results(entries: Vec<(RiskTier, ProbeOutcome)>) -> Vec<ProbeResult> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, (risk, outcome))| {
            let target = Arc::new(ProbeTarget::new(
                format!("Site {}", i),
                Category::Social,
                "https://example.com/{identifier}",
                risk,
                "Profile",
            ));
            ProbeResult::new(target, "https://example.com/x", outcome)
        })
        .collect()
}

proptest! {
    #[test]
    fn test_classify_status_is_total(status in 0u16..1000) {
        let expected = match status {
            200 => ProbeStatus::Found,
            404 => ProbeStatus::NotFound,
            _ => ProbeStatus::Unknown,
        };
        prop_assert_eq!(classify_status(status), expected);
    }

    #[test]
    fn test_summary_counts_are_bounded(
        entries in prop::collection::vec((risk_strategy(), outcome_strategy()), 0..40)
    ) {
        let records = results(entries);
        let mut aggregator = ReportAggregator::new();
        aggregator.extend(records.clone());
        let summary = aggregator.summary();

        prop_assert_eq!(summary.total_targets, records.len());
        prop_assert!(summary.found_count <= summary.total_targets);
        prop_assert!(summary.high_risk_found_count <= summary.found_count);
        prop_assert_eq!(summary.success, summary.found_count > 0);
        prop_assert!(summary.success_rate >= 0.0 && summary.success_rate <= 100.0);
        prop_assert_eq!(
            summary.status_counts.values().sum::<usize>(),
            summary.total_targets
        );
        prop_assert_eq!(
            summary.found_count,
            records.iter().filter(|r| r.status() == ProbeStatus::Found).count()
        );
    }

    #[test]
    fn test_error_outcomes_always_carry_detail(detail in ".{0,30}") {
        let outcome = ProbeOutcome::error(detail);
        prop_assert_eq!(outcome.status(), ProbeStatus::Error);
        prop_assert!(outcome.error_detail().is_some_and(|d| !d.trim().is_empty()));
        prop_assert_eq!(outcome.http_status(), None);
    }

    #[test]
    fn test_encoded_identifier_has_no_raw_delimiters(identifier in ".{0,40}") {
        for in_query in [false, true] {
            let encoded = encode_identifier(&identifier, in_query);
            prop_assert!(!encoded.contains(['/', '?', '#', '&', ' ']));
        }
    }
}

#[test]
fn test_adding_same_target_twice_is_idempotent() {
    let mut entries = results(vec![(RiskTier::High, ProbeOutcome::from_http_status(200))]);
    entries.push(entries[0].clone());
    let mut aggregator = ReportAggregator::new();
    let added: Vec<bool> = entries.into_iter().map(|r| aggregator.add(r)).collect();
    assert_eq!(added, vec![true, false]);
    assert_eq!(aggregator.summary().found_count, 1);
    assert_eq!(aggregator.summary().high_risk_found_count, 1);
}
