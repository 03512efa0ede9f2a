// Integration test for logging setup
// Note: this initializes the global subscriber, so it lives in its own test
// binary and covers every scenario in one test.

use std::fs;

use bcp::domain::models::{LogFormat, LoggingConfig, RotationPolicy};
use bcp::infrastructure::logging::LoggerImpl;
use tempfile::TempDir;
use tracing::{info, instrument, warn};

#[test]
fn test_logging_comprehensive() {
    let temp_dir = TempDir::new().unwrap();

    let config = LoggingConfig {
        level: "info".to_string(),
        format: LogFormat::Json,
        log_dir: Some(temp_dir.path().to_path_buf()),
        rotation: RotationPolicy::Never,
    };

    let logger = LoggerImpl::init(&config).unwrap();

    info!("Test message 1");
    warn!(cluster = "prod-eu", "Test message with fields");
    assert_eq!(instrumented_expand("prod-eu"), "echo prod-eu");

    // A second subscriber cannot be installed.
    assert!(LoggerImpl::init(&config).is_err());

    // Dropping the guard flushes the non-blocking writer.
    drop(logger);

    let contents = fs::read_to_string(temp_dir.path().join("bcp.log")).unwrap();
    assert!(contents.contains("Test message 1"));
    assert!(contents.contains("Test message with fields"));
    assert!(contents.contains("\"cluster\":\"prod-eu\""));
    assert!(contents.contains("instrumented_expand"));

    for line in contents.lines() {
        serde_json::from_str::<serde_json::Value>(line).expect("Each log line should be JSON");
    }
}

#[instrument]
fn instrumented_expand(cluster: &str) -> String {
    info!("expanding template");
    format!("echo {cluster}")
}
