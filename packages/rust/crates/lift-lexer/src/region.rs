//! Single-pass region scanner.
//!
//! At every position the first matching opener wins, in this order: line
//! comment, block comment, literal. Once a region is entered it is consumed
//! whole, so a quote inside a comment never opens a literal and comment
//! markers inside a literal are plain text.

use std::ops::Range;

use memchr::{memchr, memmem};

use crate::syntax::LexicalSyntax;

/// Kind of a classified byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// Anything that is neither comment nor literal.
    Code,
    /// From the line-comment marker up to (not including) the newline.
    LineComment,
    /// From the block opener through the first closer, or to end of input.
    BlockComment,
    /// A quoted literal including both quotes.
    Literal,
}

impl RegionKind {
    /// True for both comment kinds.
    #[must_use]
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }
}

/// A classified, non-empty byte range of the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// What the range holds.
    pub kind: RegionKind,
    /// Byte offsets into the scanned text.
    pub span: Range<usize>,
}

impl Region {
    /// The slice of `source` this region covers.
    ///
    /// `source` must be the text the region was produced from.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.span.clone()).unwrap_or_default()
    }
}

#[derive(Clone, Copy)]
enum LiteralState {
    InLiteral,
    Escaped,
}

/// Split `text` into contiguous, non-overlapping regions covering all of it.
///
/// An unterminated block comment runs to end of input. An unterminated
/// literal is not a literal: its opening quote stays in a code region and
/// scanning resumes right after it.
#[must_use]
pub fn classify_regions(text: &str, syntax: &LexicalSyntax) -> Vec<Region> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut regions = Vec::new();
    let mut code_start = 0;
    let mut pos = 0;
    // Once a literal fails to close, no later quote can close either.
    let mut literals_open = true;

    while pos < len {
        let rest = &bytes[pos..];
        let matched = if opens(rest, syntax.line_comment) {
            let end = memchr(b'\n', rest).map_or(len, |offset| pos + offset);
            Some((RegionKind::LineComment, end))
        } else if opens(rest, syntax.block_open) {
            let body = pos + syntax.block_open.len();
            let end = memmem::find(&bytes[body..], syntax.block_close.as_bytes())
                .map_or(len, |offset| body + offset + syntax.block_close.len());
            Some((RegionKind::BlockComment, end))
        } else if literals_open && rest.first() == Some(&syntax.quote) {
            let end = literal_end(bytes, pos, syntax);
            literals_open = end.is_some();
            end.map(|end| (RegionKind::Literal, end))
        } else {
            None
        };

        match matched {
            Some((kind, end)) => {
                push_code(&mut regions, code_start, pos);
                if end > pos {
                    regions.push(Region {
                        kind,
                        span: pos..end,
                    });
                }
                pos = end;
                code_start = end;
            }
            None => pos += 1,
        }
    }
    push_code(&mut regions, code_start, len);

    tracing::trace!(regions = regions.len(), bytes = len, "classified regions");
    regions
}

/// End offset (exclusive) of the literal opened by the quote at `start`.
///
/// The escape byte makes the next byte inert, whatever it is.
pub(crate) fn literal_end(bytes: &[u8], start: usize, syntax: &LexicalSyntax) -> Option<usize> {
    let mut state = LiteralState::InLiteral;
    for (offset, &byte) in bytes.iter().enumerate().skip(start + 1) {
        state = match state {
            LiteralState::Escaped => LiteralState::InLiteral,
            LiteralState::InLiteral if byte == syntax.escape => LiteralState::Escaped,
            LiteralState::InLiteral if byte == syntax.quote => return Some(offset + 1),
            LiteralState::InLiteral => LiteralState::InLiteral,
        };
    }
    None
}

fn opens(rest: &[u8], marker: &str) -> bool {
    !marker.is_empty() && rest.starts_with(marker.as_bytes())
}

fn push_code(regions: &mut Vec<Region>, start: usize, end: usize) {
    if end > start {
        regions.push(Region {
            kind: RegionKind::Code,
            span: start..end,
        });
    }
}
