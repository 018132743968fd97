//! Per-stylesheet waste estimation.

use serde::{Deserialize, Serialize};

use crate::display::display_name;
use crate::format::{format_kb, format_percent, inline_marker};
use crate::index::IndexedStylesheetInfo;
use crate::preview::determine_content_preview;

/// Rough gzip ratio for CSS, used when no transfer size was recorded.
pub const ESTIMATED_COMPRESSION_RATIO: f64 = 3.0;

/// One row of the report table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetResult {
    /// Display URL, or an inline marker with a content preview
    pub url: String,
    pub num_unused: usize,
    pub wasted_bytes: u64,
    pub total_kb: String,
    pub potential_savings: String,
}

/// Delivered size of a stylesheet in bytes.
///
/// Uses the transfer size when known, else content length over the
/// estimated compression ratio.
pub fn total_bytes(info: &IndexedStylesheetInfo<'_>) -> u64 {
    match info.network_record {
        Some(record) => record.transfer_size,
        None => {
            let content_len = info.stylesheet.content.chars().count() as f64;
            (content_len / ESTIMATED_COMPRESSION_RATIO).round() as u64
        }
    }
}

/// Maps one indexed stylesheet to a report row.
///
/// Returns `None` for duplicates and for sheets with no usage entries.
pub fn map_sheet_to_result(info: &IndexedStylesheetInfo<'_>, page_url: &str) -> Option<SheetResult> {
    let used = info.used.len();
    let unused = info.unused.len();
    if (used == 0 && unused == 0) || info.is_duplicate() {
        return None;
    }

    // Sheets without a URL of their own are labelled by their content.
    let url = match info.stylesheet.url() {
        Some(url) if url != page_url => display_name(url),
        _ => inline_marker(&determine_content_preview(&info.stylesheet.content)),
    };

    let total = total_bytes(info);
    let percent_unused = unused as f64 / (used + unused) as f64;
    let wasted_bytes = (percent_unused * total as f64).round() as u64;

    Some(SheetResult {
        url,
        num_unused: unused,
        wasted_bytes,
        total_kb: format_kb(total),
        potential_savings: format_percent(percent_unused),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{NetworkTransferRecord, ResourceType, StylesheetRecord, UsageEntry};
    use crate::index::index_stylesheets;
    use crate::usage::count_unused_rules;

    const PAGE: &str = "https://example.com/";

    fn usage(id: &str, used: usize, unused: usize) -> Vec<UsageEntry> {
        std::iter::repeat(UsageEntry::new(id, true))
            .take(used)
            .chain(std::iter::repeat(UsageEntry::new(id, false)).take(unused))
            .collect()
    }

    #[test]
    fn test_wasted_bytes_from_transfer_size() {
        let styles = vec![StylesheetRecord::new("1", Some("https://example.com/a.css"), ".a{}")];
        let records = vec![NetworkTransferRecord::new(
            "https://example.com/a.css",
            ResourceType::Stylesheet,
            10_000,
        )];
        let css_usage = usage("1", 8, 2);
        let mut index = index_stylesheets(&styles, &records);
        count_unused_rules(&css_usage, &mut index);

        let result = map_sheet_to_result(index.get("1").unwrap(), PAGE).unwrap();

        assert_eq!(result.url, "/a.css");
        assert_eq!(result.num_unused, 2);
        assert_eq!(result.wasted_bytes, 2000);
        assert_eq!(result.total_kb, "10 KB");
        assert_eq!(result.potential_savings, "20%");
    }

    #[test]
    fn test_size_estimated_from_content() {
        let content = "a".repeat(3000);
        let styles = vec![StylesheetRecord::new("1", Some("https://example.com/a.css"), content)];
        let css_usage = usage("1", 1, 1);
        let mut index = index_stylesheets(&styles, &[]);
        count_unused_rules(&css_usage, &mut index);

        let info = index.get("1").unwrap();
        assert_eq!(total_bytes(info), 1000);
        assert_eq!(map_sheet_to_result(info, PAGE).unwrap().wasted_bytes, 500);
    }

    #[test]
    fn test_content_estimate_rounds() {
        let styles = vec![StylesheetRecord::new("1", None, "abcde")];
        let index = index_stylesheets(&styles, &[]);
        assert_eq!(total_bytes(index.get("1").unwrap()), 2);
    }

    #[test]
    fn test_no_usage_yields_none() {
        let styles = vec![StylesheetRecord::new("1", Some("https://example.com/a.css"), ".a{}")];
        let index = index_stylesheets(&styles, &[]);
        assert!(map_sheet_to_result(index.get("1").unwrap(), PAGE).is_none());
    }

    #[test]
    fn test_duplicate_yields_none() {
        let mut sheet = StylesheetRecord::new("1", Some("https://example.com/a.css"), ".a{}");
        sheet.is_duplicate = true;
        let styles = vec![sheet];
        let entry = UsageEntry::new("1", false);
        let mut index = index_stylesheets(&styles, &[]);
        // Bypass the aggregator: the mapper checks the flag itself.
        index.get_mut("1").unwrap().unused.push(&entry);

        assert!(map_sheet_to_result(index.get("1").unwrap(), PAGE).is_none());
    }

    #[test]
    fn test_page_url_source_is_inline() {
        let styles = vec![StylesheetRecord::new("1", Some(PAGE), "  .a { color: red; }")];
        let css_usage = usage("1", 0, 1);
        let mut index = index_stylesheets(&styles, &[]);
        count_unused_rules(&css_usage, &mut index);

        let result = map_sheet_to_result(index.get("1").unwrap(), PAGE).unwrap();
        assert_eq!(result.url, "*inline*```.a { color: red; }```");
        assert_eq!(result.potential_savings, "100%");
    }

    #[test]
    fn test_missing_source_is_inline() {
        let styles = vec![
            StylesheetRecord::new("1", None, ".b{}"),
            StylesheetRecord::new("2", Some(""), ".c{}"),
        ];
        let css_usage = [usage("1", 1, 0), usage("2", 1, 0)].concat();
        let mut index = index_stylesheets(&styles, &[]);
        count_unused_rules(&css_usage, &mut index);

        assert_eq!(
            map_sheet_to_result(index.get("1").unwrap(), PAGE).unwrap().url,
            "*inline*```.b{}```"
        );
        assert_eq!(
            map_sheet_to_result(index.get("2").unwrap(), PAGE).unwrap().url,
            "*inline*```.c{}```"
        );
    }

    #[test]
    fn test_fully_used_sheet_reports_zero() {
        let styles = vec![StylesheetRecord::new("1", Some("https://example.com/a.css"), "x".repeat(90))];
        let css_usage = usage("1", 4, 0);
        let mut index = index_stylesheets(&styles, &[]);
        count_unused_rules(&css_usage, &mut index);

        let result = map_sheet_to_result(index.get("1").unwrap(), PAGE).unwrap();
        assert_eq!(result.wasted_bytes, 0);
        assert_eq!(result.potential_savings, "0%");
        assert_eq!(result.num_unused, 0);
    }
}
