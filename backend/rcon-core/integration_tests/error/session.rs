use rcon_core::error::config::ConfigError;
use rcon_core::error::session::SessionError;

use common::ErrorLocation;
use models::{CredentialsBuilder, ModelError};

use std::error::Error;
use std::panic::Location;

/// **VALUE**: Verifies a builder rejection converts into `SessionError::Validation`
/// with the builder's message intact.
///
/// **WHY THIS MATTERS**: `reconfigure()` relies on this conversion to report
/// which field was missing.
#[test]
fn given_model_error_when_converted_then_validation_with_same_message() {
    // GIVEN: A builder error for a missing port
    let model_err: ModelError = CredentialsBuilder::default()
        .with_host("mc.example.org")
        .with_secret("pw")
        .build()
        .unwrap_err();

    // WHEN: Converting
    let err = SessionError::from(model_err);

    // THEN: Validation variant carrying the original message
    match err {
        SessionError::Validation { message, .. } => assert_eq!(message, "Port is required"),
        other => panic!("expected Validation, got {other:?}"),
    }
}

/// **VALUE**: Verifies `NotConfigured` formats with its kind, message and location.
#[test]
#[track_caller]
fn given_not_configured_error_when_formatted_then_includes_location() {
    // GIVEN
    let err = SessionError::NotConfigured {
        message: "Configuration not set".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN
    let error_string = err.to_string();

    // THEN
    assert!(error_string.contains("Not Configured Error: Configuration not set"));
    assert!(error_string.contains("session.rs"));
}

/// **VALUE**: Verifies a wrapped config error is transparent for Display and `source()`.
///
/// **BUG THIS CATCHES**: Would catch the `#[error(transparent)]` attribute
/// being replaced by a wrapper message that hides the save failure reason.
#[test]
fn given_config_error_when_wrapped_then_transparent() {
    // GIVEN: A config validation error
    let inner = ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: "Missing required fields: password".to_string(),
    };
    let expected = inner.to_string();

    // WHEN: Wrapping
    let err = SessionError::from(inner);

    // THEN: Same text; transparent forwards source() to the inner error
    assert_eq!(err.to_string(), expected);
    assert!(err.source().is_none());
}
