//! Per-file processing: read -> rewrite -> persist.

use std::path::PathBuf;
use std::sync::Arc;

use lift_io::{SHADOW_SUFFIX, atomic_replace, read_text_safe_async, write_sibling};

use super::types::{FailureStage, FileFailure, FileState};
use crate::rewriter::{RewriteError, Rewriter};

/// Read-only state shared by every worker.
pub(super) struct WorkerContext {
    pub(super) rewriter: Arc<dyn Rewriter>,
    pub(super) dry_run: bool,
    pub(super) backup: bool,
    pub(super) max_file_bytes: u64,
}

/// Drive one candidate to a terminal state. Never returns an error: every
/// failure becomes `FileState::Failed`.
pub(super) async fn process_file(path: PathBuf, ctx: Arc<WorkerContext>) -> FileState {
    match rewrite_and_persist(path.clone(), &ctx).await {
        Ok(state) => state,
        Err(failure) => {
            tracing::error!(
                path = %path.display(),
                stage = %failure.stage,
                error = %failure.message,
                "file failed"
            );
            FileState::Failed(failure)
        }
    }
}

async fn rewrite_and_persist(
    path: PathBuf,
    ctx: &WorkerContext,
) -> Result<FileState, FileFailure> {
    let source = read_text_safe_async(&path, ctx.max_file_bytes)
        .await
        .map_err(|error| FileFailure::new(FailureStage::Read, error))?;

    let rewritten = ctx.rewriter.rewrite(&source).await.map_err(|error| {
        let stage = match error {
            RewriteError::Schema(_) => FailureStage::Validate,
            RewriteError::Encode(_) | RewriteError::Transport(_) | RewriteError::Credential(_) => {
                FailureStage::Send
            }
        };
        FileFailure::new(stage, error)
    })?;

    if rewritten == source {
        tracing::debug!(path = %path.display(), "rewrite returned the source unchanged");
    }

    let dry_run = ctx.dry_run;
    let backup = ctx.backup;
    let outcome = tokio::task::spawn_blocking(move || {
        if dry_run {
            write_sibling(&path, SHADOW_SUFFIX, &rewritten)
        } else {
            atomic_replace(&path, &rewritten, backup)
        }
    })
    .await
    .map_err(|error| FileFailure::new(FailureStage::Worker, error))?
    .map_err(|error| FileFailure::new(FailureStage::Persist, error))?;

    if dry_run {
        tracing::info!(
            path = %outcome.target.display(),
            shadow = %outcome.written.display(),
            "[dry run] wrote proposal"
        );
    } else {
        tracing::info!(
            path = %outcome.target.display(),
            backup = outcome.backup.is_some(),
            "wrote"
        );
    }
    Ok(FileState::Persisted(outcome))
}
