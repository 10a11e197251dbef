//! Report rendering
//!
//! All renderers are pure: they take records and return text. Printing is
//! left to the command.

use crate::inventory::{AuditReport, IndexRecord};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use serde::Serialize;

pub const TABLE_HEADERS: [&str; 3] = ["Index Name", "Version", "Exists"];
const PLACEHOLDER: &str = "-";

/// Render records as a table, one row per record in the given order.
pub fn render_table(records: &[IndexRecord]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .force_no_tty()
        .set_content_arrangement(ContentArrangement::Disabled);

    table.set_header(TABLE_HEADERS.iter().map(|h| Cell::new(h)));

    for record in records {
        table.add_row(vec![
            record.name.clone(),
            record
                .version
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            record
                .status
                .map(|s| s.label().to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        ]);
    }

    table.to_string()
}

/// Final count line.
pub fn render_summary(report: &AuditReport) -> String {
    format!("Total {} entries found: {}", report.field, report.total())
}

/// Full text report: table (or empty notice), skip counts, then the count
/// as the final line.
pub fn render_text(report: &AuditReport) -> String {
    let body = if report.records.is_empty() {
        format!(
            "No {} entries found in: {}",
            report.field,
            report.root.display()
        )
    } else {
        render_table(&report.records)
    };

    let mut out = body;
    if report.skipped.total() > 0 {
        out.push_str(&format!(
            "\nSkipped: {} unreadable, {} invalid JSON, {} without {}",
            report.skipped.unreadable,
            report.skipped.invalid_json,
            report.skipped.missing_field,
            report.field
        ));
    }
    out.push_str("\n\n");
    out.push_str(&render_summary(report));
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a AuditReport,
    total: usize,
}

/// Render the report as pretty JSON.
pub fn render_json(report: &AuditReport) -> anyhow::Result<String> {
    let payload = JsonReport {
        report,
        total: report.total(),
    };
    Ok(serde_json::to_string_pretty(&payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{IndexStatus, SkipCounts};
    use std::path::PathBuf;

    fn report(records: Vec<IndexRecord>) -> AuditReport {
        AuditReport {
            root: PathBuf::from("/data"),
            field: "indexName".to_string(),
            records,
            skipped: SkipCounts::default(),
            lookups: 0,
        }
    }

    fn sample() -> Vec<IndexRecord> {
        vec![
            IndexRecord::new("/data/read-view/a.json", "orders-v2")
                .with_version(Some("v2".to_string()))
                .with_status(Some(IndexStatus::Present)),
            IndexRecord::new("/data/read-view/b.json", "users"),
            IndexRecord::new("/data/read-view/c.json", "events-v1")
                .with_version(Some("v1".to_string()))
                .with_status(Some(IndexStatus::Unknown)),
        ]
    }

    #[test]
    fn test_render_table_rows() {
        let text = render_table(&sample());
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines.iter().any(|l| l.contains("Index Name") && l.contains("Exists")));

        let orders = lines.iter().find(|l| l.contains("orders-v2")).unwrap();
        assert!(orders.contains("v2"));
        assert!(orders.contains("yes"));

        let users = lines.iter().find(|l| l.contains("users")).unwrap();
        assert_eq!(users.matches(" - ").count(), 2, "line: {users}");

        let events = lines.iter().find(|l| l.contains("events-v1")).unwrap();
        assert!(events.contains("unknown"));
    }

    #[test]
    fn test_render_table_keeps_order() {
        let text = render_table(&sample());
        let orders = text.find("orders-v2").unwrap();
        let users = text.find("users").unwrap();
        let events = text.find("events-v1").unwrap();
        assert!(orders < users && users < events);
    }

    #[test]
    fn test_render_text_summary() {
        let text = render_text(&report(sample()));
        assert!(text.ends_with("Total indexName entries found: 3"));
    }

    #[test]
    fn test_render_text_empty() {
        let mut r = report(vec![]);
        r.skipped.missing_field = 2;
        let text = render_text(&r);
        assert!(text.starts_with("No indexName entries found in: /data"));
        assert!(text.contains("2 without indexName"));
        assert!(text.ends_with("Total indexName entries found: 0"));
    }

    #[test]
    fn test_render_text_summary_is_last_line_with_skips() {
        let mut r = report(sample());
        r.skipped.unreadable = 1;
        r.skipped.invalid_json = 1;
        let text = render_text(&r);
        let skipped_at = text.find("Skipped: 1 unreadable, 1 invalid JSON").unwrap();
        let total_at = text.find("Total indexName entries found: 3").unwrap();
        assert!(skipped_at < total_at);
        assert_eq!(text.lines().last(), Some("Total indexName entries found: 3"));
    }

    #[test]
    fn test_render_json() {
        let mut r = report(sample());
        r.lookups = 2;
        let value: serde_json::Value = serde_json::from_str(&render_json(&r).unwrap()).unwrap();
        assert_eq!(value["total"], 3);
        assert_eq!(value["lookups"], 2);
        assert_eq!(value["records"][0]["status"], "present");
        assert_eq!(value["records"][1]["status"], serde_json::Value::Null);
        assert_eq!(value["records"][1]["version"], serde_json::Value::Null);
        assert_eq!(value["skipped"]["invalid_json"], 0);
    }
}
