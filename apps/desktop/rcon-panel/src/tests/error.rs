// Unit tests for error module

use crate::error::PanelError;

use rcon_core::error::CoreError;
use rcon_core::error::config::ConfigError;

use common::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Tests that errors serialize with their variant tag and payload.
///
/// **WHY THIS MATTERS**: Errors are written to structured sinks as JSON. A
/// non-serializable field would break that silently.
///
/// **BUG THIS CATCHES**: Would catch a removed `#[derive(Serialize)]` or a
/// change of the `type`/`data` tagging.
#[test]
fn given_panel_error_when_serialized_then_tagged_with_variant() {
    // GIVEN
    let err = PanelError::Settings {
        message: String::from("RCON_TIMEOUT=soon is not a valid duration"),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN
    let json = serde_json::to_value(&err).unwrap();

    // THEN
    assert_eq!(json["type"], "Settings");
    assert_eq!(
        json["data"]["message"],
        "RCON_TIMEOUT=soon is not a valid duration"
    );
    assert!(json["data"]["location"]["line"].is_number());
}

/// **VALUE**: Verifies core errors are flattened into `PanelError::Core`
/// without losing their text.
#[test]
fn given_core_error_when_converted_then_message_preserved() {
    // GIVEN
    let core = CoreError::from(ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: "Missing required fields: port".to_string(),
    });
    let expected = core.to_string();

    // WHEN
    let err = PanelError::from(core);

    // THEN
    match &err {
        PanelError::Core { message, .. } => assert_eq!(message, &expected),
        other => panic!("expected Core, got {other:?}"),
    }
    assert!(err.to_string().starts_with("Core Error: Config Validation Error"));
}
