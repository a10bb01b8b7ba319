//! Tests for sync module - synchronous source reads.

use std::io::Write;
use tempfile::TempDir;

use lift_io::{IoError, read_text_safe};

#[test]
fn test_sync_read() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("Sync.java");
    std::fs::write(&p, "String s = \"sync\";").unwrap();
    assert_eq!(read_text_safe(&p, 1024).unwrap(), "String s = \"sync\";");
}

#[test]
fn test_sync_binary() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("Compiled.class");
    let mut file = std::fs::File::create(&p).unwrap();
    file.write_all(b"\xCA\xFE\xBA\xBE\x00\x00").unwrap();
    assert!(matches!(read_text_safe(&p, 1024), Err(IoError::BinaryFile)));
}

#[test]
fn test_file_too_large() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("Large.java");
    std::fs::write(&p, "12345678901234567890").unwrap();
    assert!(matches!(
        read_text_safe(&p, 10),
        Err(IoError::TooLarge(20, 10))
    ));
}

#[test]
fn test_file_not_found() {
    let result = read_text_safe("/nonexistent/Missing.java", 1024);
    assert!(matches!(result, Err(IoError::NotFound(_))));
}

#[test]
fn test_latin1_source_is_refused() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("Cafe.java");
    std::fs::write(&p, b"class A { String s = \"caf\xE9\"; }").unwrap();
    assert!(matches!(read_text_safe(&p, 1024), Err(IoError::Encoding(25))));
}
