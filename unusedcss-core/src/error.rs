//! Typed error handling for unusedcss.
//!
//! The audit computation itself cannot fail. Errors only come from the
//! edges: reading artifact files, reading configuration, and acquiring the
//! network throughput estimate.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for unusedcss operations.
#[derive(Error, Debug)]
pub enum UnusedCssError {
    /// I/O error when reading artifact or config files
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Malformed artifact JSON
    #[error("Parse error in {path}: {message}")]
    Parse {
        path: PathBuf,
        message: String,
        /// Line number (1-indexed) if available
        line: Option<usize>,
        /// Column number (1-indexed) if available
        column: Option<usize>,
    },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Throughput could not be acquired or is unusable
    #[error("Throughput error: {message}")]
    Throughput { message: String },
}

impl UnusedCssError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a parse error with line/column info.
    pub fn parse_at(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    /// Convert a serde_json error into a located parse error.
    pub fn from_json(path: impl Into<PathBuf>, err: &serde_json::Error) -> Self {
        Self::parse_at(path, err.to_string(), err.line(), err.column())
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a throughput acquisition error.
    pub fn throughput(message: impl Into<String>) -> Self {
        Self::Throughput {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error (a fallback can be used).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

/// Convenience type alias for unusedcss results.
pub type UnusedCssResult<T> = Result<T, UnusedCssError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> UnusedCssResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> UnusedCssResult<T> {
        self.map_err(|e| UnusedCssError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error() {
        let err = UnusedCssError::io(
            PathBuf::from("/audit/artifacts.json"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        );
        assert!(matches!(err, UnusedCssError::Io { .. }));
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("/audit/artifacts.json"));
    }

    #[test]
    fn test_parse_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{\n  \"url\": }")
            .expect_err("invalid json");
        let err = UnusedCssError::from_json("/a.json", &json_err);
        if let UnusedCssError::Parse { line, column, .. } = &err {
            assert_eq!(*line, Some(2));
            assert!(column.is_some());
        } else {
            panic!("Expected Parse error");
        }
    }

    #[test]
    fn test_is_recoverable() {
        assert!(UnusedCssError::config("/unusedcss.toml", "bad").is_recoverable());
        assert!(!UnusedCssError::throughput("lost").is_recoverable());
        assert!(!UnusedCssError::parse_at("/a.json", "eof", 1, 1).is_recoverable());
    }

    #[test]
    fn test_throughput_error_display() {
        let err = UnusedCssError::throughput("network unavailable");
        assert_eq!(err.to_string(), "Throughput error: network unavailable");
    }

    #[test]
    fn test_io_result_ext() {
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let mapped = result.with_path("/missing/artifacts.json");
        assert!(matches!(mapped, Err(UnusedCssError::Io { .. })));
    }
}
