//! Asynchronous source reads, used by the worker tasks.

use std::path::Path;

use tokio::fs as tokio_fs;
use tokio::io::AsyncReadExt;

use crate::detect::decode_buffer;
use crate::error::IoError;

/// Async counterpart of [`crate::read_text_safe`].
///
/// # Errors
/// Same as [`crate::read_text_safe`].
pub async fn read_text_safe_async<P: AsRef<Path>>(
    path: P,
    max_bytes: u64,
) -> Result<String, IoError> {
    let path = path.as_ref();

    let metadata = tokio_fs::metadata(path)
        .await
        .map_err(|_| IoError::NotFound(path.display().to_string()))?;
    if metadata.len() > max_bytes {
        return Err(IoError::TooLarge(metadata.len(), max_bytes));
    }

    let mut buffer = Vec::new();
    tokio_fs::File::open(path)
        .await?
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut buffer)
        .await?;
    let read = buffer.len() as u64;
    if read > max_bytes {
        return Err(IoError::TooLarge(read, max_bytes));
    }

    decode_buffer(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_text_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let p = dir.path().join("Greeting.java");
        tokio_fs::write(&p, "class Greeting {}").await.unwrap();
        assert_eq!(
            read_text_safe_async(&p, 1024).await.unwrap(),
            "class Greeting {}"
        );
    }

    #[tokio::test]
    async fn rejects_oversized_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let p = dir.path().join("Big.java");
        tokio_fs::write(&p, "x".repeat(64)).await.unwrap();
        assert!(matches!(
            read_text_safe_async(&p, 16).await,
            Err(IoError::TooLarge(64, 16))
        ));
    }
}
