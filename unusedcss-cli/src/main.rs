//! unusedcss CLI - unused CSS rule audit over captured page artifacts.
//!
//! Features:
//! - Reads coverage, stylesheet and network artifacts from a JSON file
//! - Optional unusedcss.toml next to the artifacts (or in the working directory)
//! - Throughput from the command line, the config, or the page's network records
//! - Plain or JSON report output
//!
//! Exit codes: 0 when the audit passes, 1 when it fails, 2 on internal error.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use unusedcss_core::{
    init_structured_logging, load_artifacts, load_config, log_warn, print_json, print_plain,
    UnusedCss, UnusedCssConfig,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Unused CSS rule audit for captured page artifacts")]
pub struct Cli {
    /// Path to the artifact JSON file
    artifacts: String,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Network throughput in bytes per second (default: estimated from network records)
    #[arg(long, value_name = "BYTES_PER_SEC")]
    throughput: Option<f64>,

    /// Mark stylesheets with repeated content as duplicates before auditing
    #[arg(long)]
    dedupe: bool,
}

/// Validates the artifact path before reading it.
///
/// Rejects empty paths, paths with null bytes, and anything that is not a
/// regular file.
fn validate_artifact_path(path: &str) -> Result<PathBuf> {
    if path.is_empty() {
        return Err(anyhow!("Artifact path is empty"));
    }
    if path.contains('\0') {
        return Err(anyhow!("Artifact path contains null bytes"));
    }

    let p = PathBuf::from(path);
    if !p.is_file() {
        return Err(anyhow!("Artifact file not found: {}", path));
    }
    Ok(p)
}

/// Looks for unusedcss.toml beside the artifacts, then in the working directory.
///
/// A config file that fails to parse is skipped with a warning.
fn find_config(artifact_path: &Path) -> Result<Option<UnusedCssConfig>> {
    let beside = artifact_path.parent().filter(|d| !d.as_os_str().is_empty());
    for dir in beside.into_iter().chain(std::iter::once(Path::new("."))) {
        match load_config(dir) {
            Ok(Some(cfg)) => return Ok(Some(cfg)),
            Ok(None) => {}
            Err(e) if e.is_recoverable() => log_warn(&format!("Ignoring config: {}", e)),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(None)
}

/// Effective settings after merging CLI flags over the config file.
#[derive(Debug, PartialEq)]
struct Settings {
    json: bool,
    throughput: Option<f64>,
    dedupe: bool,
}

fn merge_settings(cli: &Cli, config: Option<&UnusedCssConfig>) -> Settings {
    Settings {
        json: cli.json || config.is_some_and(|c| c.wants_json()),
        throughput: cli.throughput.or_else(|| config.and_then(|c| c.throughput())),
        dedupe: cli.dedupe || config.is_some_and(|c| c.dedupe()),
    }
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] unusedcss internal error: {}", info);
        eprintln!("[PANIC] The process will exit with code 2.");
        std::process::exit(2);
    }));

    // JSON logs to stderr, filtered by RUST_LOG
    init_structured_logging();

    let cli = Cli::parse();

    let path = validate_artifact_path(&cli.artifacts)?;
    let config = find_config(&path).context("Failed to load unusedcss.toml")?;
    let settings = merge_settings(&cli, config.as_ref());

    let artifacts = load_artifacts(&path)
        .with_context(|| format!("Failed to load artifacts from: {}", cli.artifacts))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let report = runtime
        .block_on(
            UnusedCss::new(artifacts)
                .dedupe(settings.dedupe)
                .throughput(settings.throughput)
                .run(),
        )
        .context("Unused CSS audit failed")?;

    if settings.json {
        print_json(&report);
    } else {
        print_plain(&report);
    }

    std::process::exit(if report.passed { 0 } else { 1 });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use unusedcss_core::{AuditConfig, NetworkConfig};

    fn create_temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("unusedcss_cli_{}_{}", name, std::process::id()));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).expect("Failed to create temp dir");
        dir
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("unusedcss").chain(args.iter().copied()))
    }

    #[test]
    fn test_validate_rejects_null_bytes() {
        assert!(validate_artifact_path("a\0b.json").is_err());
        assert!(validate_artifact_path("").is_err());
    }

    #[test]
    fn test_validate_missing_file() {
        assert!(validate_artifact_path("/no/such/artifacts.json").is_err());
    }

    #[test]
    fn test_validate_existing_file() {
        let dir = create_temp_dir("validate");
        let file = dir.join("artifacts.json");
        fs::write(&file, "{}").unwrap();

        let path = validate_artifact_path(file.to_str().unwrap()).unwrap();
        assert_eq!(path, file);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_config_beside_artifacts() {
        let dir = create_temp_dir("config");
        fs::write(dir.join("unusedcss.toml"), "[output]\nformat = \"json\"\n").unwrap();

        let cfg = find_config(&dir.join("artifacts.json")).unwrap().unwrap();
        assert!(cfg.wants_json());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let dir = create_temp_dir("bad_config");
        fs::write(dir.join("unusedcss.toml"), "[output\nformat =").unwrap();

        assert!(find_config(&dir.join("artifacts.json")).unwrap().is_none());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_cli_flags_override_config() {
        let config = UnusedCssConfig {
            output: None,
            network: Some(NetworkConfig {
                throughput: Some(500.0),
            }),
            audit: Some(AuditConfig { dedupe: Some(true) }),
        };
        let args = cli(&["artifacts.json", "--throughput", "2000"]);

        let settings = merge_settings(&args, Some(&config));
        assert_eq!(
            settings,
            Settings {
                json: false,
                throughput: Some(2000.0),
                dedupe: true,
            }
        );
    }

    #[test]
    fn test_defaults_without_config() {
        let settings = merge_settings(&cli(&["a.json", "--json"]), None);
        assert_eq!(
            settings,
            Settings {
                json: true,
                throughput: None,
                dedupe: false,
            }
        );
    }
}
