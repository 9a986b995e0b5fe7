//! Export of finalized reports in every format.

use std::sync::Arc;

use serde_json::Value;
use tempfile::TempDir;

use osint_probe::harvest::{Confidence, RolePatternSource, StaticSource, Validity};
use osint_probe::{
    Category, Config, ExportFormat, Exporter, HarvestOptions, InvestigationReport, Investigator,
    ProbeOutcome, ProbeResult, ProbeTarget, ReportAggregator, RiskTier, SessionStats,
};

fn result(name: &str, risk: RiskTier, outcome: ProbeOutcome) -> ProbeResult {
    let target = Arc::new(ProbeTarget::new(
        name,
        Category::Development,
        format!("https://{}.example/{{identifier}}", name.to_lowercase()),
        risk,
        "Code & Projects",
    ));
    let url = format!("https://{}.example/octocat", name.to_lowercase());
    ProbeResult::new(target, url, outcome)
}

fn sample_report() -> InvestigationReport<ProbeResult> {
    let mut aggregator = ReportAggregator::new();
    aggregator.extend([
        result("GitLab", RiskTier::Low, ProbeOutcome::from_http_status(200)),
        result("Bitbucket", RiskTier::High, ProbeOutcome::from_http_status(404)),
        result("CodePen", RiskTier::Low, ProbeOutcome::Timeout),
        result(
            "Evil <Site>",
            RiskTier::Medium,
            ProbeOutcome::error("connection refused"),
        ),
    ]);
    aggregator.finalize("username_intelligence", "octocat")
}

#[test]
fn test_json_export_counts_match_data() {
    let session = Arc::new(SessionStats::new());
    let report = sample_report();
    session.record(report.summary());

    let artifact = Exporter::with_session(Arc::clone(&session))
        .export(&report, ExportFormat::Json)
        .expect("json export");
    assert!(artifact.filename.starts_with("username_intelligence_report_"));
    assert!(artifact.filename.ends_with(".json"));
    assert_eq!(artifact.mime_type, "application/json");

    let parsed: Value = serde_json::from_str(&artifact.payload).expect("valid json");
    let data = parsed["data"].as_array().expect("data array");
    assert_eq!(data.len(), 4);
    assert_eq!(parsed["summary"]["total_records"], 4);
    assert_eq!(parsed["summary"]["found_count"], 1);
    assert_eq!(parsed["summary"]["platforms_checked"], 4);
    assert_eq!(parsed["summary"]["successful_searches"], 1);
    assert_eq!(parsed["report_type"], "username_intelligence");
    assert_eq!(parsed["identifier"], "octocat");

    let gitlab = data
        .iter()
        .find(|row| row["platform"] == "GitLab")
        .expect("GitLab row");
    assert_eq!(gitlab["status"], "Found");
    assert_eq!(gitlab["http_status"], 200);
    let timeout = data
        .iter()
        .find(|row| row["platform"] == "CodePen")
        .expect("CodePen row");
    assert_eq!(timeout["status"], "Timeout");
    assert!(timeout["http_status"].is_null());
}

#[test]
fn test_csv_export_has_header_and_one_row_per_record() {
    let artifact = Exporter::new()
        .export(&sample_report(), ExportFormat::Csv)
        .expect("csv export");
    assert_eq!(artifact.mime_type, "text/csv");

    let mut reader = csv::Reader::from_reader(artifact.payload.as_bytes());
    let headers = reader.headers().expect("header row").clone();
    assert_eq!(headers.get(0), Some("platform"));
    assert!(headers.iter().any(|h| h == "status"));
    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("rows parse");
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().any(|row| row.get(0) == Some("Evil <Site>")));
}

#[test]
fn test_html_export_escapes_and_highlights() {
    let artifact = Exporter::new()
        .export(&sample_report(), ExportFormat::Html)
        .expect("html export");
    assert_eq!(artifact.mime_type, "text/html");
    assert!(artifact.payload.contains("Evil &lt;Site&gt;"));
    assert!(!artifact.payload.contains("Evil <Site>"));
    assert!(artifact.payload.contains("<tr class=\"found\">"));
}

#[test]
fn test_export_document_rejects_csv() {
    let document = serde_json::json!({"whois": {"registrar": "Example Registrar"}});
    let exporter = Exporter::new();
    assert!(exporter
        .export_document("domain_intelligence", &document, ExportFormat::Csv)
        .is_err());
    let html = exporter
        .export_document("domain_intelligence", &document, ExportFormat::Html)
        .expect("html export");
    assert!(html.payload.contains("Example Registrar"));
}

#[test]
fn test_harvest_report_written_to_disk() {
    let session = Arc::new(SessionStats::new());
    let investigator =
        Investigator::new(Config::default(), Arc::clone(&session)).expect("valid config");
    let whois = StaticSource::from_addresses(
        "WHOIS Records",
        ["admin@example.com"],
        Confidence::VeryHigh,
        Validity::Yes,
        "Registration",
    );
    let report = investigator
        .harvest_emails(
            "https://Example.com/",
            &[&whois, &RolePatternSource],
            HarvestOptions::default(),
        )
        .expect("harvest succeeds");
    assert_eq!(report.identifier(), "example.com");
    assert_eq!(report.records().len(), 6);
    assert_eq!(report.summary().found_count, 1);
    assert_eq!(session.snapshot().total_searches, 1);

    let artifact = investigator
        .exporter()
        .export(&report, ExportFormat::Csv)
        .expect("csv export");
    assert!(artifact.filename.starts_with("email_harvest_report_"));

    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join(&artifact.filename);
    std::fs::write(&path, &artifact.payload).expect("write export");
    let written = std::fs::read_to_string(&path).expect("read export");
    assert!(written.starts_with("email,source,confidence,valid,type,pattern"));
    assert_eq!(written.lines().count(), 7);
}
