//! Run coordinator: discovery, bounded worker pool, completion draining.
//!
//! Workers are tokio tasks in one `JoinSet`; a semaphore keeps at most
//! `concurrency` of them past the starting line. The coordinator alone owns
//! the [`RunSummary`] and updates it as each task joins, so a panicking
//! worker is still attributed to its file through the task id.

mod discover;
mod types;
mod worker;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::rewriter::Rewriter;

pub use discover::{Discovery, collect_source_files, discover};
pub use types::{
    DEFAULT_EXCLUDES, DEFAULT_EXTENSIONS, DEFAULT_MAX_FILE_BYTES, DEFAULT_WORKERS, FailureStage,
    FileFailure, FileState, RunConfig, RunSummary,
};

use worker::{WorkerContext, process_file};

/// Drives one run over a source tree.
pub struct Orchestrator {
    config: RunConfig,
    rewriter: Arc<dyn Rewriter>,
}

impl Orchestrator {
    /// Bind a run configuration to the rewriter every worker shares.
    #[must_use]
    pub fn new(config: RunConfig, rewriter: Arc<dyn Rewriter>) -> Self {
        Self { config, rewriter }
    }

    /// Process every candidate under the root exactly once.
    ///
    /// Always completes; per-file failures are in the summary.
    pub async fn run(&self) -> RunSummary {
        let config = self.config.clone();
        let discovery = match tokio::task::spawn_blocking(move || discover(&config)).await {
            Ok(discovery) => discovery,
            Err(error) => {
                tracing::error!(error = %error, "discovery aborted");
                Discovery::default()
            }
        };

        let mut summary = RunSummary {
            discovered: discovery.files.len(),
            candidates: discovery.candidates.len(),
            ..RunSummary::default()
        };
        for path in &discovery.files {
            summary.files.insert(path.clone(), FileState::Skipped);
        }

        let ctx = Arc::new(WorkerContext {
            rewriter: Arc::clone(&self.rewriter),
            dry_run: self.config.dry_run,
            backup: self.config.backup,
            max_file_bytes: self.config.max_file_bytes,
        });
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut workers = JoinSet::new();
        let mut in_flight: HashMap<tokio::task::Id, PathBuf> = HashMap::new();

        for path in discovery.candidates {
            let worker_ctx = Arc::clone(&ctx);
            let worker_semaphore = Arc::clone(&semaphore);
            let worker_path = path.clone();
            let handle = workers.spawn(async move {
                let Ok(_permit) = worker_semaphore.acquire_owned().await else {
                    return FileState::Failed(FileFailure::new(
                        FailureStage::Worker,
                        "worker pool closed",
                    ));
                };
                process_file(worker_path, worker_ctx).await
            });
            in_flight.insert(handle.id(), path);
        }

        let total = summary.candidates;
        while let Some(joined) = workers.join_next_with_id().await {
            let (id, state) = match joined {
                Ok((id, state)) => (id, state),
                Err(error) => {
                    let failure = FileFailure::new(FailureStage::Worker, &error);
                    (error.id(), FileState::Failed(failure))
                }
            };
            let Some(path) = in_flight.remove(&id) else {
                tracing::error!(task = %id, "completion for unknown worker");
                continue;
            };
            if let FileState::Failed(failure) = &state
                && failure.stage == FailureStage::Worker
            {
                tracing::error!(path = %path.display(), error = %failure.message, "worker crashed");
            }
            summary.record(path, state);
            tracing::info!(
                completed = summary.completed(),
                total,
                failed = summary.failed,
                "progress"
            );
        }

        summary
    }
}
