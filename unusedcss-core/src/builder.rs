//! Builder pattern API for the unused CSS audit.
//!
//! Provides a fluent interface for configuring and running one audit:
//!
//! ```rust,ignore
//! use unusedcss_core::prelude::*;
//!
//! let report = UnusedCss::new(artifacts)
//!     .dedupe(true)
//!     .throughput(Some(1_600_000.0))
//!     .run()
//!     .await?;
//!
//! println!("passed: {}", report.passed);
//! ```

use crate::artifacts::Artifacts;
use crate::audit::{audit, AuditReport};
use crate::error::UnusedCssResult;
use crate::throughput::{FixedThroughput, NetworkRecordsThroughput, Throughput};

/// Builder for configuring an unused CSS audit.
#[derive(Debug, Clone)]
pub struct UnusedCss {
    /// Artifacts of the page under audit
    artifacts: Artifacts,

    /// Whether to mark duplicate stylesheets by content hash first
    dedupe: bool,

    /// Fixed throughput in bytes/second; estimated from network records when unset
    throughput: Option<f64>,
}

impl UnusedCss {
    /// Create a new audit builder for the given artifacts.
    pub fn new(artifacts: Artifacts) -> Self {
        Self {
            artifacts,
            dedupe: false,
            throughput: None,
        }
    }

    /// Enable or disable content-hash duplicate marking.
    pub fn dedupe(mut self, enabled: bool) -> Self {
        self.dedupe = enabled;
        self
    }

    /// Use a fixed throughput instead of estimating one from network records.
    pub fn throughput(mut self, bytes_per_second: Option<f64>) -> Self {
        self.throughput = bytes_per_second;
        self
    }

    /// Run the audit and return the report.
    pub async fn run(mut self) -> UnusedCssResult<AuditReport> {
        if self.dedupe {
            self.mark_duplicates();
        }

        match self.throughput {
            Some(bps) => {
                let source = FixedThroughput(Throughput::new(bps)?);
                audit(&self.artifacts, &source).await
            }
            None => {
                let source = NetworkRecordsThroughput(&self.artifacts.network_records);
                audit(&self.artifacts, &source).await
            }
        }
    }

    #[cfg(feature = "dedupe")]
    fn mark_duplicates(&mut self) {
        crate::dedupe::mark_duplicate_stylesheets(&mut self.artifacts.styles);
    }

    #[cfg(not(feature = "dedupe"))]
    fn mark_duplicates(&mut self) {
        crate::logging::log_warn("dedupe requested but the `dedupe` feature is disabled");
    }
}
