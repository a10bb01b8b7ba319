use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Settings file picked up from the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "literal-lift.yaml";

/// Whole settings file. Unknown keys are rejected so typos surface early.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LiftSettings {
    /// Rewrite service and transport.
    #[serde(default)]
    pub remote: RemoteSettings,
    /// Discovery.
    #[serde(default)]
    pub scan: ScanSettings,
    /// Worker pool and persistence.
    #[serde(default)]
    pub run: RunSettings,
}

/// `remote:` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteSettings {
    /// Chat completions URL.
    pub endpoint: Option<String>,
    /// Model identifier.
    pub model: Option<String>,
    /// Bearer credential.
    pub api_key: Option<String>,
    /// Per-attempt timeout.
    pub timeout_secs: Option<u64>,
    /// Retries after the first attempt.
    pub retries: Option<u32>,
    /// Seconds; doubled per retry.
    pub backoff_factor: Option<f64>,
    /// Completion budget.
    pub max_tokens: Option<u32>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Replaces the built-in instruction.
    pub system_prompt: Option<String>,
}

/// `scan:` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanSettings {
    /// Directory names to prune.
    pub exclude: Option<Vec<String>>,
    /// Extensions to scan.
    pub extensions: Option<Vec<String>>,
    /// Per-file size limit.
    pub max_file_bytes: Option<u64>,
}

/// `run:` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSettings {
    /// Concurrent rewrites.
    pub workers: Option<usize>,
    /// Shadow files instead of replacement.
    pub dry_run: Option<bool>,
    /// Keep `.bak` copies.
    pub backup: Option<bool>,
}

/// Configuration problems detected before any file is touched.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings file exists but cannot be read.
    #[error("failed to read settings {}: {source}", path.display())]
    Read {
        /// Settings file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid YAML for [`LiftSettings`].
    #[error("failed to parse settings {}: {source}", path.display())]
    Parse {
        /// Settings file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A resolved option is unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Load settings from `explicit`, or from [`DEFAULT_SETTINGS_FILE`] if present.
///
/// A missing default file yields empty settings; a missing explicit file is
/// an error.
///
/// # Errors
/// `ConfigError::Read` / `ConfigError::Parse`.
pub fn load_settings(explicit: Option<&Path>) -> Result<LiftSettings, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_SETTINGS_FILE);
            if !fallback.is_file() {
                return Ok(LiftSettings::default());
            }
            fallback
        }
    };

    let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    if raw.trim().is_empty() {
        return Ok(LiftSettings::default());
    }
    let settings = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}
