//! lift-agent: find Java files with string literals and have an LLM endpoint
//! hoist them into constants.
//!
//! Pipeline: discover (walkdir + rayon classification) -> bounded worker pool
//! (tokio) -> rewrite through [`Rewriter`] -> persist (atomic replace, backup
//! or dry-run shadow). One coordinator owns the [`RunSummary`].
//!
//! Logging: set `RUST_LOG=lift_agent=debug` to see per-file decisions.

pub mod config;
mod llm;
mod orchestrator;
mod rewriter;

pub use config::{
    ConfigError, DEFAULT_SETTINGS_FILE, LiftSettings, RemoteSettings, RunSettings, ScanSettings,
    load_settings,
};
pub use llm::{
    ChatOptions, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT, LlmRewriter,
    extract_content,
};
pub use orchestrator::{
    DEFAULT_EXCLUDES, DEFAULT_EXTENSIONS, DEFAULT_MAX_FILE_BYTES, DEFAULT_WORKERS, Discovery,
    FailureStage, FileFailure, FileState, Orchestrator, RunConfig, RunSummary,
    collect_source_files, discover,
};
pub use rewriter::{RewriteError, Rewriter};
