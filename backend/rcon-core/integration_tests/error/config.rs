use rcon_core::error::CoreError;
use rcon_core::error::config::ConfigError;

use common::ErrorLocation;

use std::error::Error;
use std::io::{Error as IoError, ErrorKind};
use std::panic::Location;
use std::path::PathBuf;

/// **VALUE**: Verifies `ConfigError::ReadError` names the file and the call site.
///
/// **WHY THIS MATTERS**: A missing or unreadable config.json is the most
/// common startup problem. The log line must say which path was tried.
///
/// **BUG THIS CATCHES**: Would catch the path or location being dropped from
/// the Display format.
#[test]
#[track_caller]
fn given_read_error_when_formatted_then_includes_path_and_location() {
    // GIVEN: A read error for a missing file
    let err = ConfigError::ReadError {
        location: ErrorLocation::from(Location::caller()),
        path: PathBuf::from("/srv/panel/config.json"),
        source: IoError::new(ErrorKind::NotFound, "no such file"),
    };

    // WHEN: Formatting
    let error_string = err.to_string();

    // THEN: Kind, path, cause and location are all present
    assert!(error_string.contains("Config Read Error"));
    assert!(error_string.contains("/srv/panel/config.json"));
    assert!(error_string.contains("no such file"));
    assert!(error_string.contains("config.rs"));
}

/// **VALUE**: Verifies the io error stays reachable through `source()`.
///
/// **BUG THIS CATCHES**: Would catch `#[source]` being removed, which breaks
/// error-chain walking in callers that log the root cause.
#[test]
fn given_write_error_when_walking_source_then_io_error_found() {
    // GIVEN: A write error wrapping a permission failure
    let err = ConfigError::WriteError {
        location: ErrorLocation::from(Location::caller()),
        path: PathBuf::from("config.json.tmp"),
        source: IoError::new(ErrorKind::PermissionDenied, "read-only file system"),
    };

    // WHEN: Walking to the source
    let source = err.source().expect("write error should carry a source");

    // THEN: It is the original io error
    assert_eq!(source.to_string(), "read-only file system");
}

/// **VALUE**: Verifies the umbrella `CoreError` forwards Display unchanged.
#[test]
fn given_validation_error_when_converted_to_core_error_then_display_preserved() {
    // GIVEN: A validation error
    let err = ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: "Missing required fields: port".to_string(),
    };
    let expected = err.to_string();

    // WHEN: Converting with `?`-style From
    let core = CoreError::from(err);

    // THEN: Same text, no extra prefix
    assert_eq!(core.to_string(), expected);
    assert!(matches!(core, CoreError::Config(ConfigError::ValidationError { .. })));
}
