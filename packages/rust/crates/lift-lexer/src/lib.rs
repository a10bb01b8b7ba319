#![allow(clippy::doc_markdown)]

//! lift-lexer - Comment-aware string literal detection
//!
//! A cheap pre-filter deciding whether a source file holds at least one
//! string literal outside of comments. It is a single left-to-right scan over
//! three region kinds (line comments, block comments, quoted literals) with
//! first-match-wins at each position; it is not a lexer for any language.
//!
//! # Architecture
//!
//! ```text
//! lift-lexer/src/
//! ├── lib.rs      # Re-exports (this file)
//! ├── syntax.rs   # LexicalSyntax markers
//! ├── region.rs   # Region scanner state machine
//! └── classify.rs # strip_comments, contains_literal, has_string_literal
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use lift_lexer::{LexicalSyntax, contains_literal, strip_comments};
//!
//! let syntax = LexicalSyntax::C_FAMILY;
//! let stripped = strip_comments("// \"not real\"\nint x = 1;", &syntax);
//! assert!(!contains_literal(&stripped, &syntax));
//! ```

mod classify;
mod region;
mod syntax;

pub use classify::{contains_literal, has_string_literal, strip_comments};
pub use region::{Region, RegionKind, classify_regions};
pub use syntax::LexicalSyntax;
