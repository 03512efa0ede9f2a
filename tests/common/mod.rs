//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use std::io::Write;

use bcp::{ClusterId, CommandTemplate};
use tempfile::NamedTempFile;

/// Cluster identifiers from string literals, in order.
pub fn clusters(raw: &[&str]) -> Vec<ClusterId> {
    raw.iter().copied().map(ClusterId::from).collect()
}

/// Command templates from string literals, in order.
pub fn templates(raw: &[&str]) -> Vec<CommandTemplate> {
    raw.iter().copied().map(CommandTemplate::from).collect()
}

/// Write `contents` to a temporary `.yaml` file.
///
/// The file is removed when the returned handle is dropped.
pub fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("Failed to create temp config");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp config");
    file
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
