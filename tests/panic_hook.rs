//! Panic capture runs in its own test binary so the installed process hook
//! cannot interfere with other tests.

use applog::InitConfig;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_unhandled_panic_emits_one_critical_record() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    applog::init(
        InitConfig::new()
            .with_log_dir(dir.path())
            .with_capture_logs(false),
    )
    .expect("init failed");

    let handle = std::thread::spawn(|| panic!("thread exploded"));
    assert!(handle.join().is_err(), "Thread should have panicked");

    let content =
        fs::read_to_string(dir.path().join("app.log")).expect("Failed to read log file");

    let critical: Vec<&str> = content
        .lines()
        .filter(|line| line.contains("\u{bb} unhandled panic"))
        .collect();
    assert_eq!(critical.len(), 1, "Exactly one CRITICAL record expected");
    assert!(critical[0].contains("CRITICAL"));
    assert!(critical[0].contains("thread exploded"));

    // The rendered backtrace follows the record line.
    assert!(content.lines().count() > 1);
}
