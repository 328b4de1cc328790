//! Runtime configuration for batch scoring.
//!
//! The pass threshold and wildcard answer are constants in [`crate::scorer`]
//! and cannot be configured.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level jobber configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobberConfig {
    /// Max applications scored concurrently.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Output directory for reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Default report format: json, markdown, all or none.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_parallelism() -> usize {
    4
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./jobber-results")
}
fn default_format() -> String {
    "json".to_string()
}

impl Default for JobberConfig {
    fn default() -> Self {
        Self {
            parallelism: default_parallelism(),
            output_dir: default_output_dir(),
            format: default_format(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `jobber.toml` in the current directory
/// 2. `~/.config/jobber/config.toml`
///
/// Environment variable overrides: `JOBBER_PARALLELISM`, `JOBBER_OUTPUT_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<JobberConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("jobber.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<JobberConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => JobberConfig::default(),
    };

    apply_overrides(&mut config, |name| std::env::var(name).ok())?;
    anyhow::ensure!(config.parallelism >= 1, "parallelism must be at least 1");

    Ok(config)
}

fn apply_overrides(
    config: &mut JobberConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(value) = lookup("JOBBER_PARALLELISM") {
        config.parallelism = value
            .trim()
            .parse()
            .with_context(|| format!("invalid JOBBER_PARALLELISM: '{value}'"))?;
    }
    if let Some(dir) = lookup("JOBBER_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("jobber"))
}
