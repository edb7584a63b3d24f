use rcon_core::error::runner::RunnerError;

use common::ErrorLocation;

use std::error::Error;
use std::io::{Error as IoError, ErrorKind};
use std::panic::Location;
use std::path::PathBuf;

/// **VALUE**: Verifies `RunnerError::ClientMissing` reports the message and location.
///
/// **WHY THIS MATTERS**: A missing bundled client makes every command fail.
/// The warning log must point at the check that noticed it.
#[test]
#[track_caller]
fn given_client_missing_error_when_formatted_then_includes_location() {
    // GIVEN: A missing-client error
    let err = RunnerError::ClientMissing {
        message: "mcrcon not found in application directory".to_string(),
        path: PathBuf::from("./mcrcon"),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN: Formatting
    let error_string = format!("{err}");

    // THEN: Kind, message and file location are present
    assert!(error_string.contains("Client Missing Error"));
    assert!(error_string.contains("mcrcon not found in application directory"));
    assert!(error_string.contains("runner.rs"));
}

/// **VALUE**: Verifies `RunnerError::Spawn` keeps its io source.
///
/// **BUG THIS CATCHES**: Would catch the spawn failure losing its cause, which
/// is the only detail distinguishing "permission denied" from "exec format error".
#[test]
fn given_spawn_error_when_walking_source_then_io_error_found() {
    // GIVEN: A spawn error
    let err = RunnerError::Spawn {
        message: "Failed to run ./mcrcon".to_string(),
        location: ErrorLocation::from(Location::caller()),
        source: IoError::new(ErrorKind::PermissionDenied, "permission denied"),
    };

    // WHEN / THEN: The source chain reaches the io error
    let source = err.source().expect("spawn error should carry a source");
    assert_eq!(source.to_string(), "permission denied");
    assert!(err.to_string().starts_with("Spawn Error: Failed to run ./mcrcon"));
}

/// **VALUE**: Verifies `RunnerError::Timeout` has no source and a clear kind.
#[test]
fn given_timeout_error_when_formatted_then_kind_is_named() {
    // GIVEN: A timeout error
    let err = RunnerError::Timeout {
        message: "mcrcon did not finish within 5s".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN / THEN
    assert!(err.to_string().starts_with("Timeout Error: mcrcon did not finish"));
    assert!(err.source().is_none());
}
