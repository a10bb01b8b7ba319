//! Synchronous source reads, used by classification on the rayon pool.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::detect::decode_buffer;
use crate::error::IoError;

/// Read a source file with size and binary checks.
///
/// The read is capped at `max_bytes + 1` so a file that grows between the
/// metadata probe and the read is still rejected.
///
/// # Errors
/// `NotFound` when metadata is unavailable, `TooLarge` above `max_bytes`,
/// `BinaryFile` for NUL-bearing content, `Encoding` for invalid UTF-8,
/// `System` for read failures.
pub fn read_text_safe<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<String, IoError> {
    let path = path.as_ref();

    let metadata =
        fs::metadata(path).map_err(|_| IoError::NotFound(path.display().to_string()))?;
    if metadata.len() > max_bytes {
        return Err(IoError::TooLarge(metadata.len(), max_bytes));
    }

    let mut buffer = Vec::new();
    fs::File::open(path)?
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut buffer)?;
    let read = buffer.len() as u64;
    if read > max_bytes {
        return Err(IoError::TooLarge(read, max_bytes));
    }

    decode_buffer(buffer)
}
