//! Candidate classification built on the region scanner.

use std::path::Path;

use memchr::memchr;

use crate::region::{classify_regions, literal_end};
use crate::syntax::LexicalSyntax;

/// Remove comment regions, keeping literals byte-for-byte.
///
/// Line comments lose their text but not the newline that ends them.
#[must_use]
pub fn strip_comments(text: &str, syntax: &LexicalSyntax) -> String {
    let mut stripped = String::with_capacity(text.len());
    for region in classify_regions(text, syntax) {
        if !region.kind.is_comment() {
            stripped.push_str(region.text(text));
        }
    }
    stripped
}

/// True when `text` holds at least one terminated literal.
///
/// Comment markers are not consulted; call this on the output of
/// [`strip_comments`]. Only the first quote needs scanning: if it never
/// closes, every later quote was escaped in that scan and cannot close
/// either.
#[must_use]
pub fn contains_literal(text: &str, syntax: &LexicalSyntax) -> bool {
    let bytes = text.as_bytes();
    memchr(syntax.quote, bytes).is_some_and(|start| literal_end(bytes, start, syntax).is_some())
}

/// Read `path` and report whether it holds a literal outside of comments.
///
/// Unreadable, binary or oversized files are logged and reported as `false`.
#[must_use]
pub fn has_string_literal(path: &Path, syntax: &LexicalSyntax, max_bytes: u64) -> bool {
    let text = match lift_io::read_text_safe(path, max_bytes) {
        Ok(text) => text,
        Err(error) => {
            tracing::warn!(path = %path.display(), error = %error, "skipped: cannot read");
            return false;
        }
    };

    let found = contains_literal(&strip_comments(&text, syntax), syntax);
    tracing::debug!(path = %path.display(), candidate = found, "classified");
    found
}
