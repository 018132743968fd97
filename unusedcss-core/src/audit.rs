//! Unused CSS savings estimation.
//!
//! Runs the full pipeline for one page:
//!
//! ```text
//! index_stylesheets ─► count_unused_rules ─► map_sheet_to_result (per sheet)
//!                                                    │
//!                 throughput (awaited once) ─────────┴─► AuditReport
//! ```
//!
//! Everything after the throughput await is synchronous and infallible.

use serde::{Deserialize, Serialize};

use crate::artifacts::Artifacts;
use crate::error::UnusedCssResult;
use crate::format::kb_rounded;
use crate::index::index_stylesheets;
use crate::sheet::{map_sheet_to_result, SheetResult};
use crate::throughput::{Throughput, ThroughputSource};
use crate::usage::count_unused_rules;

/// The audit passes while less than this share of rules is unused.
pub const ALLOWABLE_UNUSED_RULES_RATIO: f64 = 0.10;

/// A column of the results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableHeading {
    /// Field of [`SheetResult`] shown in this column
    pub key: String,
    pub text: String,
}

impl TableHeading {
    fn new(key: &str, text: &str) -> Self {
        Self {
            key: key.to_string(),
            text: text.to_string(),
        }
    }
}

/// Tabulated per-stylesheet results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub headings: Vec<TableHeading>,
    pub items: Vec<SheetResult>,
}

impl Table {
    pub fn new(items: Vec<SheetResult>) -> Self {
        Self {
            headings: vec![
                TableHeading::new("url", "URL"),
                TableHeading::new("numUnused", "Unused Rules"),
                TableHeading::new("totalKb", "Original"),
                TableHeading::new("potentialSavings", "Potential Savings"),
            ],
            items,
        }
    }
}

/// Output of one audit run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub passed: bool,
    /// Savings summary; empty when no rule is unused
    pub display_value: String,
    pub unused_ratio: f64,
    pub total_unused_rules: usize,
    pub total_wasted_bytes: u64,
    pub details: Table,
}

/// Share of usage entries that are unused; zero when there are none.
pub fn unused_ratio(total_unused: usize, total_entries: usize) -> f64 {
    if total_entries == 0 {
        0.0
    } else {
        total_unused as f64 / total_entries as f64
    }
}

/// Human-readable savings summary.
pub fn savings_display(total_unused: usize, wasted_bytes: u64, throughput: Throughput) -> String {
    if total_unused == 0 {
        return String::new();
    }
    format!(
        "{}KB (~{}ms) potential savings",
        kb_rounded(wasted_bytes),
        throughput.transfer_ms(wasted_bytes)
    )
}

/// Runs the synchronous pipeline with an already-resolved throughput.
pub fn estimate_savings(artifacts: &Artifacts, throughput: Throughput) -> AuditReport {
    let mut index = index_stylesheets(&artifacts.styles, &artifacts.network_records);
    let total_unused = count_unused_rules(&artifacts.css_usage, &mut index);
    let ratio = unused_ratio(total_unused, artifacts.css_usage.len());

    let results: Vec<SheetResult> = index
        .iter()
        .filter_map(|info| map_sheet_to_result(info, &artifacts.url))
        .collect();
    let total_wasted_bytes = results.iter().map(|r| r.wasted_bytes).fold(0u64, u64::saturating_add);

    let display_value = savings_display(total_unused, total_wasted_bytes, throughput);
    let passed = ratio < ALLOWABLE_UNUSED_RULES_RATIO;

    tracing::info!(
        page = %artifacts.url,
        sheets = results.len(),
        total_unused,
        unused_ratio = ratio,
        total_wasted_bytes,
        passed,
        "unused css audit complete"
    );

    AuditReport {
        passed,
        display_value,
        unused_ratio: ratio,
        total_unused_rules: total_unused,
        total_wasted_bytes,
        details: Table::new(results),
    }
}

/// Acquires the throughput, then runs the pipeline.
///
/// Throughput failures are returned unchanged.
pub async fn audit<S>(artifacts: &Artifacts, source: &S) -> UnusedCssResult<AuditReport>
where
    S: ThroughputSource + ?Sized,
{
    let throughput = source.network_throughput().await?;
    tracing::debug!(bytes_per_second = throughput.bytes_per_second(), "resolved throughput");
    Ok(estimate_savings(artifacts, throughput))
}
