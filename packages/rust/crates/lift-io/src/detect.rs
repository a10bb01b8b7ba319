//! Binary detection and decoding for source files.

use memchr::memchr;

use crate::error::IoError;

/// Number of leading bytes probed for a NUL byte.
const BINARY_PROBE_LEN: usize = 8192;

/// Returns true when the first 8KB of `buffer` contain a NUL byte.
///
/// Source files never carry NUL bytes, so this is enough to keep class files,
/// jars and images away from the classifier.
#[must_use]
pub fn is_binary(buffer: &[u8]) -> bool {
    let probe = buffer.get(..BINARY_PROBE_LEN).unwrap_or(buffer);
    memchr(0, probe).is_some()
}

/// Decode a source buffer as strict UTF-8.
///
/// Text that is not valid UTF-8 is refused rather than repaired: a rewrite of
/// a lossily decoded file would replace the original bytes on disk.
///
/// # Errors
/// `IoError::BinaryFile` when binary content is detected, `IoError::Encoding`
/// when the bytes are not valid UTF-8.
pub fn decode_buffer(buffer: Vec<u8>) -> Result<String, IoError> {
    if is_binary(&buffer) {
        return Err(IoError::BinaryFile);
    }

    String::from_utf8(buffer).map_err(|err| IoError::Encoding(err.utf8_error().valid_up_to()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nul_past_probe_window_is_text() {
        let mut buffer = vec![b'a'; BINARY_PROBE_LEN];
        buffer.push(0);
        assert!(!is_binary(&buffer));
    }

    #[test]
    fn invalid_utf8_is_refused() {
        assert!(matches!(
            decode_buffer(vec![b'"', b'a', 0xFF, b'"']),
            Err(IoError::Encoding(2))
        ));
    }

    #[test]
    fn multibyte_utf8_is_kept() {
        let decoded = decode_buffer("\"caf\u{e9}\"".as_bytes().to_vec()).unwrap();
        assert_eq!(decoded, "\"caf\u{e9}\"");
    }
}
