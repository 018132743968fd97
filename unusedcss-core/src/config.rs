//! Configuration loading from unusedcss.toml.

use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::{IoResultExt, UnusedCssError, UnusedCssResult};

/// Name of the configuration file looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "unusedcss.toml";

/// Main configuration structure for unusedcss.toml.
#[derive(Debug, Deserialize, Default)]
pub struct UnusedCssConfig {
    /// Output configuration.
    pub output: Option<OutputConfig>,
    /// Network configuration.
    pub network: Option<NetworkConfig>,
    /// Audit behaviour.
    pub audit: Option<AuditConfig>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct NetworkConfig {
    /// Bytes per second; replaces estimation from network records.
    pub throughput: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct AuditConfig {
    /// Mark duplicate stylesheets by content hash before auditing.
    pub dedupe: Option<bool>,
}

impl UnusedCssConfig {
    pub fn wants_json(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }

    pub fn throughput(&self) -> Option<f64> {
        self.network.as_ref().and_then(|n| n.throughput)
    }

    pub fn dedupe(&self) -> bool {
        self.audit.as_ref().and_then(|a| a.dedupe).unwrap_or(false)
    }
}

/// Loads configuration from unusedcss.toml in `dir` if it exists.
///
/// A file that exists but does not parse yields a recoverable
/// [`UnusedCssError::Config`].
pub fn load_config(dir: &Path) -> UnusedCssResult<Option<UnusedCssConfig>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).with_path(&path)?;
    let cfg = toml::from_str(&content).map_err(|e| UnusedCssError::config(&path, e.to_string()))?;
    Ok(Some(cfg))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("unusedcss_config_{}_{}", name, std::process::id()));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).expect("Failed to create test directory");
        dir
    }

    #[test]
    fn test_missing_config() {
        let dir = temp_dir("missing");
        assert!(load_config(&dir).unwrap().is_none());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_full_config() {
        let dir = temp_dir("full");
        fs::write(
            dir.join(CONFIG_FILE_NAME),
            "[output]\nformat = \"JSON\"\n[network]\nthroughput = 1600000.0\n[audit]\ndedupe = true\n",
        )
        .expect("Failed to write config");

        let cfg = load_config(&dir).unwrap().unwrap();
        assert!(cfg.wants_json());
        assert_eq!(cfg.throughput(), Some(1_600_000.0));
        assert!(cfg.dedupe());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_wrong_value_type_is_config_error() {
        let dir = temp_dir("wrong_type");
        fs::write(dir.join(CONFIG_FILE_NAME), "[network]\nthroughput = \"fast\"\n")
            .expect("Failed to write config");
        assert!(matches!(load_config(&dir), Err(UnusedCssError::Config { .. })));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_defaults() {
        let cfg = UnusedCssConfig::default();
        assert!(!cfg.wants_json());
        assert_eq!(cfg.throughput(), None);
        assert!(!cfg.dedupe());
    }

    #[test]
    fn test_invalid_config() {
        let dir = temp_dir("invalid");
        fs::write(dir.join(CONFIG_FILE_NAME), "[output\nformat=").expect("Failed to write config");
        let err = load_config(&dir).unwrap_err();
        assert!(matches!(err, UnusedCssError::Config { .. }));
        assert!(err.is_recoverable());
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
        fs::remove_dir_all(&dir).ok();
    }
}
