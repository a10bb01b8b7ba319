//! Crash-safe file replacement.
//!
//! New content is staged in a temporary file inside the target's own
//! directory, fsync'd, and renamed onto the target. Readers observe either
//! the old file or the new one, never a partial write. A failed rename drops
//! the staged file, leaving the target untouched.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use crate::error::IoError;

/// Suffix appended to the file name of a pre-replace backup.
pub const BACKUP_SUFFIX: &str = "bak";

/// Suffix appended to the file name of a dry-run shadow file.
pub const SHADOW_SUFFIX: &str = "new";

/// How a rewrite landed on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// The original file was atomically replaced.
    Replaced,
    /// The content went to a sibling file; the original is untouched.
    Shadowed,
}

/// Record of a completed write, consumed for logging and reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// File the rewrite belongs to.
    pub target: PathBuf,
    /// File that actually received the bytes.
    pub written: PathBuf,
    /// Replace or shadow.
    pub mode: WriteMode,
    /// Backup copy of the previous content, when one was made.
    pub backup: Option<PathBuf>,
}

/// `Foo.java` + `"bak"` -> `Foo.java.bak`, in the same directory.
#[must_use]
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(OsString::new, ToOwned::to_owned);
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// Atomically replace `path` with `content`.
///
/// With `make_backup`, an existing target is first copied to `<name>.bak`.
/// A failed backup is logged and the replace still goes ahead.
///
/// # Errors
/// `TempFile`, `Write` or `Persist` when the corresponding step fails. The
/// target keeps its previous content in every error case.
pub fn atomic_replace<P: AsRef<Path>>(
    path: P,
    content: &str,
    make_backup: bool,
) -> Result<WriteOutcome, IoError> {
    replace_with(path.as_ref(), content, make_backup, persist_onto)
}

/// Write `content` to `<name>.<suffix>` next to `path`, leaving `path` alone.
///
/// # Errors
/// Same failure modes as [`atomic_replace`], reported against the sibling.
pub fn write_sibling<P: AsRef<Path>>(
    path: P,
    suffix: &str,
    content: &str,
) -> Result<WriteOutcome, IoError> {
    let path = path.as_ref();
    let sibling = sibling_path(path, suffix);
    let staged = stage(&sibling, content)?;
    persist_onto(staged, &sibling).map_err(|source| IoError::Persist {
        path: sibling.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), shadow = %sibling.display(), "wrote shadow file");

    Ok(WriteOutcome {
        target: path.to_path_buf(),
        written: sibling,
        mode: WriteMode::Shadowed,
        backup: None,
    })
}

fn replace_with<F>(
    path: &Path,
    content: &str,
    make_backup: bool,
    commit: F,
) -> Result<WriteOutcome, IoError>
where
    F: FnOnce(NamedTempFile, &Path) -> std::io::Result<()>,
{
    let backup = if make_backup && path.exists() {
        backup_existing(path)
    } else {
        None
    };

    let staged = stage(path, content)?;
    commit(staged, path).map_err(|source| IoError::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "replaced file");

    Ok(WriteOutcome {
        target: path.to_path_buf(),
        written: path.to_path_buf(),
        mode: WriteMode::Replaced,
        backup,
    })
}

fn persist_onto(staged: NamedTempFile, target: &Path) -> std::io::Result<()> {
    staged.persist(target).map(drop).map_err(|err| err.error)
}

/// Write `content` into a temp file in `path`'s directory and sync it.
///
/// An existing target's permissions are copied onto the temp file so the
/// rename does not change the file mode.
fn stage(path: &Path, content: &str) -> Result<NamedTempFile, IoError> {
    let dir = match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => return Err(IoError::NoParent(path.to_path_buf())),
    };
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("lift");

    let mut staged = Builder::new()
        .prefix(&format!(".{file_name}."))
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|source| IoError::TempFile {
            dir: dir.to_path_buf(),
            source,
        })?;

    let write_err = |source| IoError::Write {
        path: path.to_path_buf(),
        source,
    };
    staged.write_all(content.as_bytes()).map_err(write_err)?;
    if let Ok(metadata) = fs::metadata(path) {
        staged
            .as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_err)?;
    }
    staged.as_file().sync_all().map_err(write_err)?;

    Ok(staged)
}

fn backup_existing(path: &Path) -> Option<PathBuf> {
    let backup = sibling_path(path, BACKUP_SUFFIX);
    match fs::copy(path, &backup) {
        Ok(_) => {
            tracing::info!(
                path = %path.display(),
                backup = %backup.display(),
                "backed up original"
            );
            Some(backup)
        }
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                backup = %backup.display(),
                error = %error,
                "backup failed; replacing without one"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn failed_rename_leaves_target_unchanged() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("Greeting.java");
        fs::write(&target, "class Greeting { String s = \"hi\"; }").unwrap();

        let result = replace_with(&target, "class Greeting {}", false, |_staged, _target| {
            Err(std::io::Error::other("simulated crash before rename"))
        });

        assert!(matches!(result, Err(IoError::Persist { .. })));
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "class Greeting { String s = \"hi\"; }"
        );
        assert_eq!(entries(dir.path()), vec!["Greeting.java".to_string()]);
    }

    #[test]
    fn failed_rename_still_keeps_backup() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("A.java");
        fs::write(&target, "old").unwrap();

        let result = replace_with(&target, "new", true, |_staged, _target| {
            Err(std::io::Error::other("rename refused"))
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&target).unwrap(), "old");
        assert_eq!(
            fs::read_to_string(dir.path().join("A.java.bak")).unwrap(),
            "old"
        );
    }

    #[test]
    fn failed_backup_does_not_block_replace() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("B.java");
        fs::write(&target, "old").unwrap();
        fs::create_dir(dir.path().join("B.java.bak")).unwrap();

        let outcome = atomic_replace(&target, "new", true).unwrap();

        assert_eq!(outcome.backup, None);
        assert_eq!(outcome.mode, WriteMode::Replaced);
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        assert!(dir.path().join("B.java.bak").is_dir());
    }

    #[test]
    fn sibling_path_appends_suffix() {
        assert_eq!(
            sibling_path(Path::new("src/Main.java"), SHADOW_SUFFIX),
            PathBuf::from("src/Main.java.new")
        );
        assert_eq!(
            sibling_path(Path::new("Main.java"), BACKUP_SUFFIX),
            PathBuf::from("Main.java.bak")
        );
    }

    #[cfg(unix)]
    #[test]
    fn replace_preserves_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("Tool.java");
        fs::write(&target, "old").unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o644)).unwrap();

        atomic_replace(&target, "new", false).unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }
}
