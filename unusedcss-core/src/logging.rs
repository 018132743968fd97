//! Structured logging using **tracing**.
//!
//! Audit stages emit events with structured fields (stylesheet counts,
//! unused totals, wasted bytes). The JSON subscriber keeps them
//! machine-readable and off stdout, which carries the report.

use tracing::warn;

/// Initializes the global tracing subscriber.
///
/// Call once at startup. Output is JSON on stderr.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=unusedcss_core=debug`)
pub fn init_structured_logging() {
    tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Logs a warning event.
pub fn log_warn(message: &str) {
    warn!(detail = %message);
}
