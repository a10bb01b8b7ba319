//! Error types for file I/O operations.

use std::path::PathBuf;

use thiserror::Error;

/// Error types for reading sources and persisting rewrites.
#[derive(Error, Debug)]
pub enum IoError {
    /// File does not exist or its metadata is unreadable.
    #[error("File not found: {0}")]
    NotFound(String),

    /// File exceeds size limit.
    #[error("File too large: {0} bytes (limit: {1})")]
    TooLarge(u64, u64),

    /// File contains binary content (NULL bytes detected).
    #[error("Binary file detected")]
    BinaryFile,

    /// Content is not valid UTF-8; the payload is the offset of the first bad byte.
    #[error("Invalid UTF-8 at byte {0}")]
    Encoding(usize),

    /// Target path has no parent directory to host the temporary file.
    #[error("No parent directory for {}", .0.display())]
    NoParent(PathBuf),

    /// The temporary file next to the target could not be created.
    #[error("Failed to create temporary file in {}: {source}", dir.display())]
    TempFile {
        /// Directory the temp file was created in.
        dir: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Writing or syncing the temporary file failed.
    #[error("Failed to write temporary file for {}: {source}", path.display())]
    Write {
        /// Final target path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Renaming the temporary file onto the target failed.
    #[error("Failed to rename temporary file onto {}: {source}", path.display())]
    Persist {
        /// Final target path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Low-level I/O error from std::io.
    #[error("IO error: {0}")]
    System(#[from] std::io::Error),
}
