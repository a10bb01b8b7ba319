//! Run configuration, per-file states and the aggregate summary.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use lift_io::WriteOutcome;
use lift_lexer::LexicalSyntax;

/// Directory names pruned during discovery.
pub const DEFAULT_EXCLUDES: [&str; 4] = [".git", "target", "build", ".idea"];

/// File extensions scanned by default.
pub const DEFAULT_EXTENSIONS: [&str; 1] = ["java"];

/// Concurrent rewrites when nothing else is configured.
pub const DEFAULT_WORKERS: usize = 4;

/// Files above this size are neither classified nor sent.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;

/// Everything a run needs besides the rewriter.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Tree to scan.
    pub root: PathBuf,
    /// Extensions (without the dot) of files to consider.
    pub extensions: Vec<String>,
    /// Directory names pruned wherever they appear below `root`.
    pub exclude_dirs: Vec<String>,
    /// Maximum rewrites in flight.
    pub concurrency: usize,
    /// Write `<name>.new` siblings instead of replacing originals.
    pub dry_run: bool,
    /// Copy originals to `<name>.bak` before replacing them.
    pub backup: bool,
    /// Size limit for reading a source file.
    pub max_file_bytes: u64,
    /// Comment and literal markers for classification.
    pub syntax: LexicalSyntax,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            exclude_dirs: DEFAULT_EXCLUDES.iter().map(ToString::to_string).collect(),
            concurrency: DEFAULT_WORKERS,
            dry_run: false,
            backup: false,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            syntax: LexicalSyntax::C_FAMILY,
        }
    }
}

/// Step at which a file's processing failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// Reading the source before sending.
    Read,
    /// Transport gave up or the request could not be built.
    Send,
    /// Response did not have the expected shape.
    Validate,
    /// Temp file, write or rename failed.
    Persist,
    /// The worker panicked or was lost.
    Worker,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Read => "read",
            Self::Send => "send",
            Self::Validate => "validate",
            Self::Persist => "persist",
            Self::Worker => "worker",
        };
        f.write_str(label)
    }
}

/// A recorded per-file failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    /// Where it failed.
    pub stage: FailureStage,
    /// Rendered error.
    pub message: String,
}

impl FileFailure {
    pub(crate) fn new(stage: FailureStage, error: impl fmt::Display) -> Self {
        Self {
            stage,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.stage, self.message)
    }
}

/// Terminal state of a discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileState {
    /// No literal outside comments (or unreadable during classification).
    Skipped,
    /// Rewritten content landed on disk (replaced or shadowed).
    Persisted(WriteOutcome),
    /// Processing stopped at some stage.
    Failed(FileFailure),
}

/// Aggregate result of a run. Only the coordinator mutates it.
#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    /// Files with a matching extension found under the root.
    pub discovered: usize,
    /// Discovered files holding a literal outside comments.
    pub candidates: usize,
    /// Candidates whose rewrite was persisted or shadowed.
    pub succeeded: usize,
    /// Candidates that failed at any stage.
    pub failed: usize,
    /// Terminal state per discovered file.
    pub files: BTreeMap<PathBuf, FileState>,
}

impl RunSummary {
    pub(crate) fn record(&mut self, path: PathBuf, state: FileState) {
        match &state {
            FileState::Skipped => {}
            FileState::Persisted(_) => self.succeeded += 1,
            FileState::Failed(_) => self.failed += 1,
        }
        self.files.insert(path, state);
    }

    /// Failed files with their failure, in path order.
    pub fn failures(&self) -> impl Iterator<Item = (&PathBuf, &FileFailure)> {
        self.files.iter().filter_map(|(path, state)| match state {
            FileState::Failed(failure) => Some((path, failure)),
            _ => None,
        })
    }

    /// Candidates that reached a terminal state.
    #[must_use]
    pub const fn completed(&self) -> usize {
        self.succeeded + self.failed
    }
}
