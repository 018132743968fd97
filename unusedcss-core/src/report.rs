//! Output formatting - plaintext and JSON.

use serde_json::json;

use crate::audit::AuditReport;
use crate::sheet::SheetResult;

/// Cell text of `row` for a heading key.
fn cell(row: &SheetResult, key: &str) -> String {
    match key {
        "url" => row.url.clone(),
        "numUnused" => row.num_unused.to_string(),
        "totalKb" => row.total_kb.clone(),
        "potentialSavings" => row.potential_savings.clone(),
        _ => String::new(),
    }
}

/// Renders the report as aligned plain text.
pub fn render_plain(report: &AuditReport) -> String {
    let mut out = String::new();
    let verdict = if report.passed { "PASS" } else { "FAIL" };
    out.push_str(&format!(
        "UNUSED CSS RULES: {} ({} unused, {:.0}% of rules)\n",
        verdict,
        report.total_unused_rules,
        report.unused_ratio * 100.0
    ));
    if !report.display_value.is_empty() {
        out.push_str(&report.display_value);
        out.push('\n');
    }

    let table = &report.details;
    if table.items.is_empty() {
        return out;
    }

    // Inline previews span lines; keep rows on one line.
    let rows: Vec<Vec<String>> = table
        .items
        .iter()
        .map(|row| {
            table
                .headings
                .iter()
                .map(|h| cell(row, &h.key).replace('\n', " "))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = table
        .headings
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.text.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    out.push('\n');
    let headings: Vec<&str> = table.headings.iter().map(|h| h.text.as_str()).collect();
    out.push_str(&pad_line(&headings, &widths));
    out.push('\n');
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&pad_line(&cells, &widths));
        out.push('\n');
    }
    out
}

fn pad_line(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<width$}", c, width = *w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Prints the report in plain text format.
pub fn print_plain(report: &AuditReport) {
    print!("{}", render_plain(report));
}

/// Prints the report in JSON format.
///
/// Falls back to the verdict alone if serialization fails.
pub fn print_json(report: &AuditReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::warn!(error = %e, "JSON serialization failed");
            println!(
                "{}",
                json!({ "passed": report.passed, "displayValue": report.display_value })
            );
        }
    }
}
