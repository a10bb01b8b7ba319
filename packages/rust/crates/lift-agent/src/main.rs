//! literal-lift CLI: scan a tree, rewrite literal-bearing files through an
//! LLM endpoint, report a summary.
//!
//! Logging: `RUST_LOG=lift_agent=debug` (or `warn`) overrides the default
//! filter; logs go to stderr.

mod cli;
mod resolve;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lift_agent::{LlmRewriter, Orchestrator, RunSummary, load_settings};
use lift_transport::Transport;

use crate::cli::Cli;

const LOG_TARGETS: [&str; 5] = [
    "literal_lift",
    "lift_agent",
    "lift_transport",
    "lift_io",
    "lift_lexer",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            LOG_TARGETS
                .iter()
                .map(|target| format!("{target}={level}"))
                .collect::<Vec<_>>()
                .join(","),
        )
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let settings = load_settings(cli.config.as_deref()).context("failed to load settings")?;
    let resolved = resolve::resolve_run(cli, &settings).context("invalid configuration")?;

    tracing::info!(
        root = %resolved.run.root.display(),
        endpoint = %resolved.transport.endpoint,
        model = %resolved.chat.model,
        workers = resolved.run.concurrency,
        dry_run = resolved.run.dry_run,
        "starting run"
    );

    let transport = Transport::new(resolved.transport).context("failed to build HTTP client")?;
    let rewriter = LlmRewriter::new(transport, resolved.chat).context("invalid credentials")?;
    let summary = Orchestrator::new(resolved.run, Arc::new(rewriter))
        .run()
        .await;

    report(&summary);
    Ok(())
}

fn report(summary: &RunSummary) {
    for (path, failure) in summary.failures() {
        tracing::warn!(
            path = %path.display(),
            stage = %failure.stage,
            error = %failure.message,
            "failed"
        );
    }
    tracing::info!(
        discovered = summary.discovered,
        candidates = summary.candidates,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "run complete"
    );
}
