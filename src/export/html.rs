//! HTML export functionality.
//!
//! Produces one self-contained document with inline styles: a header, a
//! summary line, a single table and a disclaimer footer. Every value is
//! escaped.

use chrono::{DateTime, Utc};
use html_escape::encode_text;
use serde_json::Value;

const STYLE: &str = "body { font-family: 'Inter', Arial, sans-serif; margin: 40px; background: #f7fafc; }
.header { background: #1a365d; color: white; padding: 30px; border-radius: 10px; margin-bottom: 30px; }
.content { background: white; padding: 30px; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
table { width: 100%; border-collapse: collapse; margin-top: 20px; }
th, td { padding: 12px; text-align: left; border-bottom: 1px solid #e2e8f0; }
th { background: #edf2f7; font-weight: 600; }
tr.found td { background: #f0fff4; }
pre { white-space: pre-wrap; word-break: break-word; }
.footer { margin-top: 30px; text-align: center; color: #718096; font-size: 14px; }";

const DISCLAIMER: &str = "This report lists public endpoints checked for the given identifier. \
A response code only suggests whether a page exists; verify findings before relying on them.";

/// A table ready to be rendered; `found` rows are highlighted.
pub(super) struct HtmlTable {
    pub columns: Vec<String>,
    pub rows: Vec<(bool, Vec<String>)>,
}

pub(super) enum HtmlBody {
    Table(HtmlTable),
    Preformatted(String),
}

pub(super) fn render_html(
    report_type: &str,
    generated_at: DateTime<Utc>,
    summary_line: Option<&str>,
    body: &HtmlBody,
) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>OSINT Probe Report - {}</title>\n<style>\n{}\n</style>\n</head>\n<body>\n",
        encode_text(report_type),
        STYLE
    ));
    html.push_str(&format!(
        "<div class=\"header\">\n<h1>OSINT Probe</h1>\n<h2>{} Report</h2>\n<p>Generated on {}</p>\n</div>\n",
        encode_text(report_type),
        generated_at.format("%B %d, %Y at %I:%M %p UTC")
    ));

    html.push_str("<div class=\"content\">\n");
    if let Some(line) = summary_line {
        html.push_str(&format!("<p class=\"summary\">{}</p>\n", encode_text(line)));
    }
    match body {
        HtmlBody::Table(table) => push_table(&mut html, table),
        HtmlBody::Preformatted(text) => {
            html.push_str(&format!("<pre>{}</pre>\n", encode_text(text)));
        }
    }
    html.push_str("</div>\n");

    html.push_str(&format!(
        "<div class=\"footer\">\n<p>{}</p>\n</div>\n</body>\n</html>\n",
        encode_text(DISCLAIMER)
    ));
    html
}

fn push_table(html: &mut String, table: &HtmlTable) {
    if table.rows.is_empty() {
        html.push_str("<p>No data available</p>\n");
    }
    html.push_str("<table>\n<thead>\n<tr>");
    for column in &table.columns {
        html.push_str(&format!("<th>{}</th>", encode_text(column)));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for (found, cells) in &table.rows {
        html.push_str(if *found { "<tr class=\"found\">" } else { "<tr>" });
        for cell in cells {
            html.push_str(&format!("<td>{}</td>", encode_text(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
}

/// Builds the HTML body of a nested document: a table when it is an array
/// of objects (columns in first-seen key order), pretty-printed JSON
/// otherwise.
pub(super) fn document_body(document: &Value) -> HtmlBody {
    let Some(items) = document.as_array() else {
        return HtmlBody::Preformatted(pretty(document));
    };
    if items.is_empty() || !items.iter().all(Value::is_object) {
        return HtmlBody::Preformatted(pretty(document));
    }

    let mut columns: Vec<String> = Vec::new();
    for item in items.iter().filter_map(Value::as_object) {
        for key in item.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|item| {
            let cells = columns
                .iter()
                .map(|column| match item.get(column) {
                    None | Some(Value::Null) => String::new(),
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                })
                .collect();
            (false, cells)
        })
        .collect();
    HtmlBody::Table(HtmlTable { columns, rows })
}

fn pretty(document: &Value) -> String {
    serde_json::to_string_pretty(document).unwrap_or_else(|_| document.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_html_escapes_values() {
        let body = HtmlBody::Table(HtmlTable {
            columns: vec!["platform".to_string()],
            rows: vec![(true, vec!["<script>alert(1)</script>".to_string()])],
        });
        let html = render_html("username_intelligence", Utc::now(), Some("1 of 1 found"), &body);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<tr class=\"found\">"));
        assert!(html.contains("class=\"footer\""));
        assert_eq!(html.matches("<table>").count(), 1);
    }

    #[test]
    fn test_empty_table_keeps_header_row() {
        let body = HtmlBody::Table(HtmlTable {
            columns: vec!["platform".to_string(), "status".to_string()],
            rows: Vec::new(),
        });
        let html = render_html("username_intelligence", Utc::now(), None, &body);
        assert!(html.contains("No data available"));
        assert_eq!(html.matches("<table>").count(), 1);
        assert!(html.contains("<th>platform</th><th>status</th>"));
        assert!(html.contains("<tbody>\n</tbody>"));
    }

    #[test]
    fn test_document_body_table_columns() {
        let body = document_body(&json!([
            {"domain": "example.com", "registrar": "Example"},
            {"domain": "example.org", "expires": 2030}
        ]));
        match body {
            HtmlBody::Table(table) => {
                assert_eq!(table.columns, vec!["domain", "registrar", "expires"]);
                assert_eq!(table.rows[1].1, vec!["example.org", "", "2030"]);
            }
            HtmlBody::Preformatted(_) => panic!("expected a table"),
        }
    }

    #[test]
    fn test_document_body_nested_object_is_preformatted() {
        assert!(matches!(
            document_body(&json!({"whois": {"registrar": "Example"}})),
            HtmlBody::Preformatted(_)
        ));
    }
}
