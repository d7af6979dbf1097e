//! Common test utilities for integration tests
//!
//! Provides shared fixtures used across multiple integration test files.

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write an override file with the given contents into a fresh directory
///
/// Keep the returned TempDir alive for as long as the file is needed.
#[allow(dead_code)]
pub fn write_env_file(contents: &str) -> (TempDir, PathBuf) {
    let dir = temp_dir();
    let path = dir.path().join(".env");
    let mut file = std::fs::File::create(&path).expect("Failed to create override file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write override file");
    (dir, path)
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
