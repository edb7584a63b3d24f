// Unit tests for logger initialization
// Tests focus on idempotency and error reporting

use crate::logger::{LOG_FILE_NAME, initialize, open_log_file};

use std::path::PathBuf;

use tempfile::tempdir;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: Startup code and tests may both initialize logging.
/// A second call must not crash the panel.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed,
/// causing fern to fail when trying to set a global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A valid temporary directory
    let temp_dir = tempdir().unwrap();

    // WHEN: Calling initialize twice
    let result1 = initialize(temp_dir.path());
    let result2 = initialize(temp_dir.path());

    // THEN: Both return Ok (second one logs a warning but doesn't error)
    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(
        result2.is_ok(),
        "Second initialization should succeed (idempotent)"
    );
}

/// **VALUE**: Verifies that an unusable log directory is reported, not panicked on.
///
/// **BUG THIS CATCHES**: Would catch `fern::log_file()` being unwrapped,
/// crashing startup when the data directory is read-only.
#[test]
fn given_invalid_log_dir_when_opening_log_file_then_returns_panel_error() {
    // GIVEN: A path under a regular file, which can never be a directory
    let invalid_dir = PathBuf::from("/dev/null/invalid-path");

    // WHEN
    let result = open_log_file(&invalid_dir);

    // THEN
    let err = result.unwrap_err();
    let err_string = format!("{err:?}");
    assert!(err_string.contains("Panel"), "Should be PanelError::Panel");
    assert!(err.to_string().contains(LOG_FILE_NAME));
}

/// **VALUE**: Verifies the log file lands in the requested directory.
#[test]
fn given_writable_dir_when_opening_log_file_then_file_created() {
    // GIVEN
    let temp_dir = tempdir().unwrap();

    // WHEN
    let file = open_log_file(temp_dir.path());

    // THEN
    assert!(file.is_ok());
    assert!(temp_dir.path().join(LOG_FILE_NAME).exists());
}
