//! Prelude module for convenient imports.
//!
//! Import commonly used types with a single line:
//!
//! ```rust,ignore
//! use unusedcss_core::prelude::*;
//! ```

// Errors
pub use crate::error::{UnusedCssError, UnusedCssResult};

// Input artifacts
pub use crate::artifacts::{load_artifacts, Artifacts, NetworkTransferRecord, StylesheetRecord, UsageEntry};

// Audit
pub use crate::audit::{audit, estimate_savings, AuditReport};
pub use crate::sheet::SheetResult;

// Throughput
pub use crate::throughput::{FixedThroughput, NetworkRecordsThroughput, Throughput, ThroughputSource};

// Configuration
pub use crate::config::{load_config, UnusedCssConfig};

// Builder API
pub use crate::builder::UnusedCss;

// Duplicate marking
#[cfg(feature = "dedupe")]
pub use crate::dedupe::mark_duplicate_stylesheets;
