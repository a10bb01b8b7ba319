//! Candidate discovery: walk the tree, prune excluded directories, classify
//! every matching file in parallel.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use lift_lexer::has_string_literal;
use rayon::prelude::*;
use walkdir::WalkDir;

use super::types::RunConfig;

/// Files found under the root and the subset worth rewriting.
#[derive(Debug, Default, Clone)]
pub struct Discovery {
    /// Every file with a matching extension, in walk order.
    pub files: Vec<PathBuf>,
    /// Files holding a literal outside comments.
    pub candidates: Vec<PathBuf>,
}

/// Walk `config.root` and classify what it finds.
///
/// Runs on the rayon pool; call it from a blocking context.
#[must_use]
pub fn discover(config: &RunConfig) -> Discovery {
    let files = collect_source_files(&config.root, &config.extensions, &config.exclude_dirs);

    let candidates: Vec<PathBuf> = files
        .par_iter()
        .filter(|path| has_string_literal(path, &config.syntax, config.max_file_bytes))
        .cloned()
        .collect();

    tracing::info!(
        root = %config.root.display(),
        files = files.len(),
        candidates = candidates.len(),
        "discovery finished"
    );
    Discovery { files, candidates }
}

/// Absolute paths of files under `root` with one of `extensions`, skipping
/// any directory below `root` whose name is in `exclude_dirs`.
///
/// Unreadable directory entries are logged and skipped. Output is sorted by
/// file name within each directory, so it is stable across runs.
#[must_use]
pub fn collect_source_files(
    root: &Path,
    extensions: &[String],
    exclude_dirs: &[String],
) -> Vec<PathBuf> {
    let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());

    WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !is_excluded(entry.file_name(), exclude_dirs)
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::warn!(error = %error, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && has_extension(entry.path(), extensions))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn is_excluded(name: &OsStr, exclude_dirs: &[String]) -> bool {
    exclude_dirs.iter().any(|excluded| name == OsStr::new(excluded))
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(OsStr::to_str) else {
        return false;
    };
    extensions
        .iter()
        .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
}
