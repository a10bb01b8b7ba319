//! Worker pool behaviour with in-process rewriters.

use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use lift_agent::{FailureStage, FileState, Orchestrator, RewriteError, Rewriter, RunConfig};

/// Tracks how many rewrites overlap.
#[derive(Default)]
struct GaugeRewriter {
    active: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

#[async_trait]
impl Rewriter for GaugeRewriter {
    async fn rewrite(&self, source: &str) -> Result<String, RewriteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(format!("{source}// done\n"))
    }
}

/// Panics on sources mentioning `PANIC`.
struct PanickyRewriter;

#[async_trait]
impl Rewriter for PanickyRewriter {
    async fn rewrite(&self, source: &str) -> Result<String, RewriteError> {
        assert!(!source.contains("PANIC"), "rewriter blew up");
        Ok(source.replace("\"x\"", "X"))
    }
}

/// Returns the source unchanged.
struct EchoRewriter;

#[async_trait]
impl Rewriter for EchoRewriter {
    async fn rewrite(&self, source: &str) -> Result<String, RewriteError> {
        Ok(source.to_string())
    }
}

fn write_sources(dir: &TempDir, count: usize, marker_at: Option<usize>) {
    for index in 0..count {
        let marker = if Some(index) == marker_at { "PANIC" } else { "ok" };
        fs::write(
            dir.path().join(format!("F{index}.java")),
            format!("class F{index} {{ String s = \"x\"; /* {marker} */ }}\n"),
        )
        .unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn in_flight_rewrites_never_exceed_concurrency() {
    let dir = TempDir::new().unwrap();
    write_sources(&dir, 8, None);
    let rewriter = Arc::new(GaugeRewriter::default());

    let summary = Orchestrator::new(
        RunConfig {
            root: dir.path().to_path_buf(),
            concurrency: 2,
            ..RunConfig::default()
        },
        Arc::clone(&rewriter) as Arc<dyn Rewriter>,
    )
    .run()
    .await;

    assert_eq!(summary.succeeded, 8);
    assert_eq!(rewriter.calls.load(Ordering::SeqCst), 8);
    assert_eq!(rewriter.peak.load(Ordering::SeqCst), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn panicking_worker_is_recorded_as_failure() {
    let dir = TempDir::new().unwrap();
    write_sources(&dir, 4, Some(2));

    let summary = Orchestrator::new(
        RunConfig {
            root: dir.path().to_path_buf(),
            concurrency: 2,
            ..RunConfig::default()
        },
        Arc::new(PanickyRewriter),
    )
    .run()
    .await;

    assert_eq!(summary.candidates, 4);
    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.failed, 1);
    let (path, failure) = summary.failures().next().expect("one failure");
    assert!(path.ends_with("F2.java"));
    assert_eq!(failure.stage, FailureStage::Worker);
    let persisted = summary
        .files
        .values()
        .filter(|state| matches!(state, FileState::Persisted(_)))
        .count();
    assert_eq!(persisted, 3);
}

#[tokio::test]
async fn empty_tree_completes_with_zero_counts() {
    let dir = TempDir::new().unwrap();

    let summary = Orchestrator::new(
        RunConfig {
            root: dir.path().to_path_buf(),
            ..RunConfig::default()
        },
        Arc::new(GaugeRewriter::default()),
    )
    .run()
    .await;

    assert_eq!(summary.discovered, 0);
    assert_eq!(summary.candidates, 0);
    assert_eq!(summary.completed(), 0);
}

#[tokio::test]
async fn dry_run_shadows_even_an_unchanged_rewrite() {
    let dir = TempDir::new().unwrap();
    write_sources(&dir, 1, None);
    let original = fs::read_to_string(dir.path().join("F0.java")).unwrap();

    let summary = Orchestrator::new(
        RunConfig {
            root: dir.path().to_path_buf(),
            dry_run: true,
            ..RunConfig::default()
        },
        Arc::new(EchoRewriter),
    )
    .run()
    .await;

    assert_eq!(summary.succeeded, 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("F0.java.new")).unwrap(),
        original
    );
}

#[tokio::test]
async fn non_utf8_source_is_skipped_and_left_byte_for_byte() {
    let dir = TempDir::new().unwrap();
    let latin1: &[u8] = b"class A { String s = \"caf\xE9\"; }\n";
    let path = dir.path().join("Cafe.java");
    fs::write(&path, latin1).unwrap();
    let rewriter = Arc::new(GaugeRewriter::default());

    let summary = Orchestrator::new(
        RunConfig {
            root: dir.path().to_path_buf(),
            backup: true,
            ..RunConfig::default()
        },
        Arc::clone(&rewriter) as Arc<dyn Rewriter>,
    )
    .run()
    .await;

    assert_eq!(summary.discovered, 1);
    assert_eq!(summary.candidates, 0);
    assert_eq!(rewriter.calls.load(Ordering::SeqCst), 0);
    let absolute = std::path::absolute(&path).unwrap();
    assert_eq!(summary.files.get(&absolute), Some(&FileState::Skipped));
    assert_eq!(fs::read(&path).unwrap(), latin1);
    assert!(!dir.path().join("Cafe.java.bak").exists());
}
