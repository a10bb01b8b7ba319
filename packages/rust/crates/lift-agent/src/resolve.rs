//! Merge CLI flags, environment and settings into run configuration.
//!
//! Precedence per option: CLI > environment > settings file > default.

use std::time::Duration;

use lift_agent::{
    ChatOptions, ConfigError, DEFAULT_EXCLUDES, DEFAULT_EXTENSIONS, DEFAULT_MAX_FILE_BYTES,
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT, DEFAULT_WORKERS, LiftSettings,
    RunConfig,
};
use lift_transport::{DEFAULT_TIMEOUT_SECS, TransportConfig, Url};

use crate::cli::Cli;

pub(crate) const DEFAULT_ENDPOINT: &str = "http://localhost:8000/v1/chat/completions";
const DEFAULT_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_FACTOR: f64 = 1.0;

pub(crate) struct ResolvedRun {
    pub(crate) run: RunConfig,
    pub(crate) transport: TransportConfig,
    pub(crate) chat: ChatOptions,
}

pub(crate) fn resolve_run(cli: Cli, settings: &LiftSettings) -> Result<ResolvedRun, ConfigError> {
    let remote = &settings.remote;
    let scan = &settings.scan;

    let endpoint = resolve_string(
        cli.endpoint,
        "LITERAL_LIFT_ENDPOINT",
        remote.endpoint.as_deref(),
        DEFAULT_ENDPOINT,
    );
    validate_endpoint(&endpoint)?;
    if !cli.root.is_dir() {
        return Err(ConfigError::Invalid(format!(
            "root {} is not a directory",
            cli.root.display()
        )));
    }

    let retries = cli
        .retries
        .or_else(|| parse_env("LITERAL_LIFT_RETRIES"))
        .or(remote.retries)
        .unwrap_or(DEFAULT_RETRIES);
    let backoff_factor = cli
        .backoff
        .or(remote.backoff_factor)
        .unwrap_or(DEFAULT_BACKOFF_FACTOR);
    if !backoff_factor.is_finite() || backoff_factor < 0.0 {
        return Err(ConfigError::Invalid(format!(
            "backoff factor must be a non-negative number, got {backoff_factor}"
        )));
    }
    let timeout_secs = resolve_positive(
        cli.timeout,
        "LITERAL_LIFT_TIMEOUT_SECS",
        remote.timeout_secs,
        DEFAULT_TIMEOUT_SECS,
    );

    let transport = TransportConfig {
        max_attempts: retries.saturating_add(1),
        backoff_factor,
        timeout: Duration::from_secs(timeout_secs),
        ..TransportConfig::new(endpoint)
    };

    let chat = ChatOptions {
        model: resolve_string(
            cli.model,
            "LITERAL_LIFT_MODEL",
            remote.model.as_deref(),
            DEFAULT_MODEL,
        ),
        api_key: resolve_optional_string(cli.api_key, "API_KEY", remote.api_key.as_deref()),
        system_prompt: remote
            .system_prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        temperature: remote.temperature.unwrap_or(0.0),
        max_tokens: cli
            .max_tokens
            .or(remote.max_tokens)
            .filter(|tokens| *tokens > 0)
            .unwrap_or(DEFAULT_MAX_TOKENS),
    };

    let run = RunConfig {
        root: cli.root,
        extensions: resolve_list(
            cli.extensions,
            scan.extensions.as_ref(),
            &DEFAULT_EXTENSIONS,
        ),
        exclude_dirs: resolve_list(cli.exclude, scan.exclude.as_ref(), &DEFAULT_EXCLUDES),
        concurrency: resolve_positive(
            cli.workers,
            "LITERAL_LIFT_WORKERS",
            settings.run.workers,
            DEFAULT_WORKERS,
        ),
        dry_run: cli.dry_run || settings.run.dry_run.unwrap_or(false),
        backup: cli.backup || settings.run.backup.unwrap_or(false),
        max_file_bytes: resolve_positive(
            cli.max_file_bytes,
            "LITERAL_LIFT_MAX_FILE_BYTES",
            scan.max_file_bytes,
            DEFAULT_MAX_FILE_BYTES,
        ),
        ..RunConfig::default()
    };

    Ok(ResolvedRun {
        run,
        transport,
        chat,
    })
}

fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    let url = Url::parse(endpoint)
        .map_err(|error| ConfigError::Invalid(format!("endpoint {endpoint:?}: {error}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid(format!(
            "endpoint {endpoint:?} must use http or https"
        )));
    }
    Ok(())
}

fn resolve_string(
    cli_value: Option<String>,
    env_name: &str,
    settings_value: Option<&str>,
    default: &str,
) -> String {
    if let Some(value) = cli_value {
        return value;
    }
    if let Ok(value) = std::env::var(env_name)
        && !value.trim().is_empty()
    {
        return value;
    }
    if let Some(value) = settings_value {
        return value.to_string();
    }
    default.to_string()
}

fn resolve_optional_string(
    cli_value: Option<String>,
    env_name: &str,
    settings_value: Option<&str>,
) -> Option<String> {
    if cli_value.is_some() {
        return cli_value;
    }
    if let Ok(value) = std::env::var(env_name) {
        return Some(value);
    }
    settings_value.map(ToString::to_string)
}

fn resolve_positive<T>(
    cli_value: Option<T>,
    env_name: &str,
    settings_value: Option<T>,
    default: T,
) -> T
where
    T: Copy + PartialOrd + Default + std::str::FromStr,
{
    let positive = |value: &T| *value > T::default();
    cli_value
        .filter(positive)
        .or_else(|| parse_env::<T>(env_name).filter(positive))
        .or_else(|| settings_value.filter(positive))
        .unwrap_or(default)
}

/// An explicit list, even an empty one, replaces the defaults.
fn resolve_list(
    cli_value: Option<Vec<String>>,
    settings_value: Option<&Vec<String>>,
    default: &[&str],
) -> Vec<String> {
    if let Some(values) = cli_value {
        return values;
    }
    match settings_value {
        Some(values) => values.clone(),
        None => default.iter().map(ToString::to_string).collect(),
    }
}

fn parse_env<T: std::str::FromStr>(env_name: &str) -> Option<T> {
    std::env::var(env_name).ok()?.trim().parse().ok()
}
