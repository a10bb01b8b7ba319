//! Comment and literal markers understood by the scanner.

/// Markers for one family of languages.
///
/// `quote` and `escape` are single ASCII bytes; region boundaries therefore
/// always fall on ASCII bytes and slicing the source at them is UTF-8 safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalSyntax {
    /// Starts a comment running to end of line.
    pub line_comment: &'static str,
    /// Opens a block comment.
    pub block_open: &'static str,
    /// Closes a block comment. Nesting is not recognised.
    pub block_close: &'static str,
    /// Delimits a string literal.
    pub quote: u8,
    /// Escapes the byte that follows it inside a literal.
    pub escape: u8,
}

impl LexicalSyntax {
    /// Java, C, C++, C#, JavaScript and friends.
    pub const C_FAMILY: Self = Self {
        line_comment: "//",
        block_open: "/*",
        block_close: "*/",
        quote: b'"',
        escape: b'\\',
    };
}

impl Default for LexicalSyntax {
    fn default() -> Self {
        Self::C_FAMILY
    }
}
