//! Tests for atomic module - replace, backup and shadow writes.

use std::fs;

use tempfile::TempDir;

use lift_io::{WriteMode, atomic_replace, write_sibling};

#[test]
fn test_replace_writes_exact_content() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("Greeting.java");
    fs::write(&p, "class Greeting { String s = \"hi\"; }").unwrap();

    let rewritten = "class Greeting {\n    static final String HI = \"hi\";\n}\n";
    let outcome = atomic_replace(&p, rewritten, false).unwrap();

    assert_eq!(fs::read_to_string(&p).unwrap(), rewritten);
    assert_eq!(outcome.mode, WriteMode::Replaced);
    assert_eq!(outcome.written, p);
    assert!(outcome.backup.is_none());
}

#[test]
fn test_replace_creates_missing_target() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("Fresh.java");

    let outcome = atomic_replace(&p, "class Fresh {}", true).unwrap();

    assert_eq!(fs::read_to_string(&p).unwrap(), "class Fresh {}");
    assert!(outcome.backup.is_none());
}

#[test]
fn test_replace_with_backup() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("Greeting.java");
    fs::write(&p, "original").unwrap();

    let outcome = atomic_replace(&p, "rewritten", true).unwrap();

    let backup = dir.path().join("Greeting.java.bak");
    assert_eq!(outcome.backup.as_deref(), Some(backup.as_path()));
    assert_eq!(fs::read_to_string(&backup).unwrap(), "original");
    assert_eq!(fs::read_to_string(&p).unwrap(), "rewritten");
}

#[test]
fn test_replace_leaves_no_temp_files() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("Clean.java");
    fs::write(&p, "a").unwrap();

    atomic_replace(&p, "b", false).unwrap();

    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("Clean.java")]);
}

#[test]
fn test_write_sibling_keeps_original() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("Greeting.java");
    fs::write(&p, "original").unwrap();

    let outcome = write_sibling(&p, "new", "proposed").unwrap();

    assert_eq!(outcome.mode, WriteMode::Shadowed);
    assert_eq!(outcome.written, dir.path().join("Greeting.java.new"));
    assert_eq!(fs::read_to_string(&p).unwrap(), "original");
    assert_eq!(fs::read_to_string(&outcome.written).unwrap(), "proposed");
}
