use crate::{CredentialsBuilder, ModelError};

/// **VALUE**: Verifies a complete triple builds and is trimmed.
///
/// **WHY THIS MATTERS**: Operators paste hosts and passwords with stray
/// whitespace. The original form trimmed every field before saving.
///
/// **BUG THIS CATCHES**: Would catch if trimming is dropped and `" 25575"`
/// reaches the protocol client as a port argument.
#[test]
fn given_padded_fields_when_building_then_trims_and_succeeds() {
    // GIVEN: Fields with surrounding whitespace
    let builder = CredentialsBuilder::default()
        .with_host("  play.example.net ")
        .with_port(" 25575")
        .with_secret("s3cret  ");

    // WHEN: Building
    let credentials = builder.build().expect("valid credentials");

    // THEN: Values are trimmed and complete
    assert_eq!(credentials.host, "play.example.net");
    assert_eq!(credentials.port, "25575");
    assert_eq!(credentials.secret.expose(), "s3cret");
    assert!(credentials.is_complete());
    assert_eq!(credentials.endpoint(), "play.example.net:25575");
}

/// **VALUE**: Verifies every field is required and must be non-empty.
///
/// **WHY THIS MATTERS**: Partially configured credentials must never reach the
/// config file. Save relies on this builder to reject them.
///
/// **BUG THIS CATCHES**: Would catch a dropped check for any one of the fields,
/// including whitespace-only input that trims to empty.
#[test]
fn given_any_empty_field_when_building_then_returns_validation_error() {
    // GIVEN: Each field blanked in turn
    let cases = vec![
        ("", "25575", "pw", "server_ip", "Server IP cannot be empty"),
        ("host", "   ", "pw", "port", "Port cannot be empty"),
        ("host", "25575", "", "password", "Password cannot be empty"),
    ];

    for (host, port, secret, expected_field, expected) in cases {
        // WHEN: Building
        let result = CredentialsBuilder::default()
            .with_host(host)
            .with_port(port)
            .with_secret(secret)
            .build();

        // THEN: Validation error naming the field
        match result {
            Err(ModelError::Validation { field, message, .. }) => {
                assert_eq!(field, expected_field);
                assert_eq!(message, expected);
            }
            Ok(_) => panic!("expected validation error for ({host:?}, {port:?})"),
        }
    }
}

/// **VALUE**: Verifies missing fields are reported as required.
#[test]
fn given_missing_secret_when_building_then_reports_required() {
    // GIVEN: Builder without a secret
    let result = CredentialsBuilder::default()
        .with_host("host")
        .with_port("25575")
        .build();

    // THEN: Required-field error
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Password is required")
        }
        Ok(_) => panic!("expected validation error"),
    }
}
