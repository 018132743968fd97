//! unusedcss-core: unused CSS rule detection and savings estimation.
//!
//! This library computes how much of a page's delivered CSS was actually
//! applied, from coverage telemetry collected elsewhere, and estimates the
//! byte and load-time cost of the rest.
//!
//! # Features
//!
//! - **Stylesheet indexing**: Correlate stylesheets with network transfers by URL
//! - **Usage aggregation**: Attribute each coverage entry to its stylesheet
//! - **Content previews**: Label inline stylesheets with a readable snippet
//! - **Waste estimation**: Per-sheet wasted bytes and savings percentage
//! - **Savings estimation**: Total waste, load-time cost and pass/fail verdict
//! - **Throughput estimation**: Bytes/second from the page's own network records
//! - **Duplicate marking**: Content-hash detection of repeated stylesheets
//!
//! # Quick Start
//!
//! Use the [`prelude`] module for convenient imports:
//!
//! ```rust,ignore
//! use unusedcss_core::prelude::*;
//!
//! let artifacts = load_artifacts(Path::new("artifacts.json"))?;
//! let report = UnusedCss::new(artifacts).run().await?;
//!
//! for row in &report.details.items {
//!     println!("{}: {} unused rules", row.url, row.num_unused);
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`artifacts`]: Input data model and artifact file loading
//! - [`index`]: Stylesheet indexing
//! - [`usage`]: Usage aggregation
//! - [`preview`]: Content previews for inline stylesheets
//! - [`sheet`]: Per-stylesheet results
//! - [`audit`]: Savings estimation and the final report
//! - [`throughput`]: Network throughput sources
//! - [`builder`]: Fluent builder API for configuration
//! - [`error`]: Typed error handling
//!
//! # Cargo Features
//!
//! - `dedupe` (default): Enable content-hash duplicate marking
//! - `full`: Enable all optional features

// Core modules (always available)
pub mod artifacts;
pub mod audit;
pub mod builder;
pub mod config;
pub mod display;
pub mod error;
pub mod format;
pub mod index;
pub mod logging;
pub mod prelude;
pub mod preview;
pub mod report;
pub mod sheet;
pub mod throughput;
pub mod usage;

// Feature-gated modules
#[cfg(feature = "dedupe")]
pub mod dedupe;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{IoResultExt, UnusedCssError, UnusedCssResult};

// Input artifacts
pub use artifacts::{
    load_artifacts, Artifacts, NetworkTransferRecord, ResourceType, StylesheetRecord, UsageEntry,
};

// Pipeline stages
pub use audit::{
    audit, estimate_savings, savings_display, unused_ratio, AuditReport, Table, TableHeading,
    ALLOWABLE_UNUSED_RULES_RATIO,
};
pub use index::{index_network_records, index_stylesheets, IndexedStylesheetInfo, StylesheetIndex};
pub use preview::{determine_content_preview, normalize_whitespace, PREVIEW_LENGTH};
pub use sheet::{map_sheet_to_result, total_bytes, SheetResult, ESTIMATED_COMPRESSION_RATIO};
pub use usage::count_unused_rules;

// Display helpers
pub use display::display_name;
pub use format::{format_kb, format_percent, inline_marker, kb_rounded, KB_IN_BYTES};

// Throughput
pub use throughput::{
    estimate_throughput, FixedThroughput, NetworkRecordsThroughput, Throughput, ThroughputSource,
};

// Builder API
pub use builder::UnusedCss;

// Configuration
pub use config::{load_config, AuditConfig, NetworkConfig, OutputConfig, UnusedCssConfig};

// Logging
pub use logging::{init_structured_logging, log_warn};

// Reporting
pub use report::{print_json, print_plain, render_plain};

// Feature-gated re-exports
#[cfg(feature = "dedupe")]
pub use dedupe::{content_hash, mark_duplicate_stylesheets};
