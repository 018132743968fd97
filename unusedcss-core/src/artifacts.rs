//! Input artifacts gathered by the capture step.
//!
//! These are read-only to the audit. The JSON shape follows the names the
//! browser protocol uses (`styleSheetId`, `sourceURL`, `transferSize`...).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IoResultExt, UnusedCssError, UnusedCssResult};

/// A stylesheet returned by the capture step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylesheetRecord {
    /// Opaque identity assigned by the browser
    #[serde(rename = "styleSheetId")]
    pub id: String,
    /// Declared source URL; absent (or empty) for inline `<style>` blocks
    #[serde(rename = "sourceURL", default)]
    pub source_url: Option<String>,
    /// Raw stylesheet text
    #[serde(default)]
    pub content: String,
    /// Set when identical content was already captured
    #[serde(rename = "isDuplicate", default)]
    pub is_duplicate: bool,
}

impl StylesheetRecord {
    pub fn new(id: impl Into<String>, source_url: Option<&str>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source_url: source_url.map(String::from),
            content: content.into(),
            is_duplicate: false,
        }
    }

    /// Source URL, treating an empty string as absent.
    pub fn url(&self) -> Option<&str> {
        self.source_url.as_deref().filter(|u| !u.is_empty())
    }
}

/// One CSS rule's coverage flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEntry {
    #[serde(rename = "styleSheetId")]
    pub stylesheet_id: String,
    pub used: bool,
}

impl UsageEntry {
    pub fn new(stylesheet_id: impl Into<String>, used: bool) -> Self {
        Self {
            stylesheet_id: stylesheet_id.into(),
            used,
        }
    }
}

/// Resource classification of a network transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResourceType {
    Document,
    Stylesheet,
    Script,
    Image,
    Font,
    #[serde(rename = "XHR")]
    Xhr,
    Fetch,
    Media,
    #[default]
    #[serde(other)]
    Other,
}

/// Network-layer metadata for one delivered resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkTransferRecord {
    pub url: String,
    #[serde(default)]
    pub resource_type: ResourceType,
    /// Bytes on the wire (compressed)
    #[serde(default)]
    pub transfer_size: u64,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default = "default_true")]
    pub finished: bool,
    #[serde(default)]
    pub failed: bool,
    /// Seconds, same clock as `end_time`
    #[serde(default)]
    pub response_received_time: Option<f64>,
    #[serde(default)]
    pub end_time: Option<f64>,
}

fn default_true() -> bool {
    true
}

impl NetworkTransferRecord {
    pub fn new(url: impl Into<String>, resource_type: ResourceType, transfer_size: u64) -> Self {
        Self {
            url: url.into(),
            resource_type,
            transfer_size,
            status_code: Some(200),
            finished: true,
            failed: false,
            response_received_time: None,
            end_time: None,
        }
    }

    /// Attach response timing (seconds).
    pub fn with_timing(mut self, response_received_time: f64, end_time: f64) -> Self {
        self.response_received_time = Some(response_received_time);
        self.end_time = Some(end_time);
        self
    }

    pub fn is_stylesheet(&self) -> bool {
        self.resource_type == ResourceType::Stylesheet
    }
}

/// The full artifact set for one audited page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifacts {
    /// Final URL of the audited page
    pub url: String,
    #[serde(default)]
    pub styles: Vec<StylesheetRecord>,
    #[serde(rename = "CSSUsage", alias = "cssUsage", default)]
    pub css_usage: Vec<UsageEntry>,
    #[serde(default)]
    pub network_records: Vec<NetworkTransferRecord>,
}

impl Artifacts {
    /// Parse artifacts from a JSON string.
    pub fn from_json(source: &Path, json: &str) -> UnusedCssResult<Self> {
        serde_json::from_str(json).map_err(|e| UnusedCssError::from_json(source, &e))
    }
}

/// Loads an artifact file from disk.
pub fn load_artifacts(path: &Path) -> UnusedCssResult<Artifacts> {
    let content = fs::read_to_string(path).with_path(path)?;
    let artifacts = Artifacts::from_json(path, &content)?;
    tracing::debug!(
        path = %path.display(),
        styles = artifacts.styles.len(),
        usage_entries = artifacts.css_usage.len(),
        network_records = artifacts.network_records.len(),
        "loaded artifacts"
    );
    Ok(artifacts)
}
