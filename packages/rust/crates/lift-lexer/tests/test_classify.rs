//! Classification properties over realistic Java sources.

use std::fs;

use tempfile::TempDir;

use lift_lexer::{LexicalSyntax, contains_literal, has_string_literal, strip_comments};

const SYNTAX: LexicalSyntax = LexicalSyntax::C_FAMILY;
const MAX_BYTES: u64 = 1024 * 1024;

fn is_candidate(text: &str) -> bool {
    contains_literal(&strip_comments(text, &SYNTAX), &SYNTAX)
}

#[test]
fn test_literal_only_inside_line_comment() {
    assert!(!is_candidate("// \"not real\"\n"));
    assert!(!is_candidate("int x = 1; // \"not real\""));
}

#[test]
fn test_escaped_quote_does_not_terminate() {
    let text = r#"String s = "a\"b";"#;
    assert!(is_candidate(text));

    let stripped = strip_comments(text, &SYNTAX);
    assert_eq!(stripped, text);
}

#[test]
fn test_escaped_quote_then_comment_marker_stays_in_literal() {
    // Without escape handling the literal would close early and `//` would
    // swallow the rest of the line.
    let text = r#"String s = "a\" // b"; int y;"#;
    assert_eq!(strip_comments(text, &SYNTAX), text);
}

#[test]
fn test_unterminated_block_comment_absorbs_rest() {
    let text = "class A {\n  /* started\n  String s = \"later\";\n}\n";
    assert!(!is_candidate(text));
    assert_eq!(strip_comments(text, &SYNTAX), "class A {\n  ");
}

#[test]
fn test_literal_before_unterminated_block_comment() {
    let text = "String s = \"early\"; /* never closed \"x\"";
    assert!(is_candidate(text));
}

#[test]
fn test_unterminated_literal_is_not_candidate() {
    assert!(!is_candidate("String s = \"never closed;\n"));
}

#[test]
fn test_javadoc_quotes_are_ignored() {
    let text = r#"
/**
 * Returns "hello" to the caller.
 */
public int answer() {
    return 42; // not "a string"
}
"#;
    assert!(!is_candidate(text));
}

#[test]
fn test_classification_is_deterministic() {
    let samples = [
        "",
        "\"",
        "/*",
        "//\"x\"",
        "a \"b\" /* \"c\" */",
        r#""\\\"""#,
        "x = \"open // gone",
    ];
    for sample in samples {
        let first = is_candidate(sample);
        for _ in 0..5 {
            assert_eq!(is_candidate(sample), first, "sample {sample:?}");
        }
    }
}

#[test]
fn test_has_string_literal_reads_file() {
    let dir = TempDir::new().unwrap();
    let with = dir.path().join("With.java");
    let without = dir.path().join("Without.java");
    fs::write(&with, "class With { String s = \"x\"; }").unwrap();
    fs::write(&without, "class Without { /* \"x\" */ }").unwrap();

    assert!(has_string_literal(&with, &SYNTAX, MAX_BYTES));
    assert!(!has_string_literal(&without, &SYNTAX, MAX_BYTES));
}

#[test]
fn test_has_string_literal_unreadable_is_false() {
    let dir = TempDir::new().unwrap();
    assert!(!has_string_literal(
        &dir.path().join("Missing.java"),
        &SYNTAX,
        MAX_BYTES
    ));

    let binary = dir.path().join("Blob.java");
    fs::write(&binary, b"\"x\"\x00").unwrap();
    assert!(!has_string_literal(&binary, &SYNTAX, MAX_BYTES));
}
