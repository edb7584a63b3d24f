use crate::RedactedSecret;

/// **VALUE**: Verifies the RCON password never leaks through Debug or Display.
///
/// **WHY THIS MATTERS**: Credentials are logged at debug level when the config
/// store reloads. A leaking Debug impl would write the password to the log file.
///
/// **BUG THIS CATCHES**: Would catch a derived Debug replacing the manual impl.
#[test]
fn given_secret_when_formatted_then_value_is_redacted() {
    // GIVEN: A secret
    let secret = RedactedSecret::new("hunter2");

    // WHEN: Formatting with Debug and Display
    let debug = format!("{secret:?}");
    let display = format!("{secret}");

    // THEN: Neither should contain the value
    assert!(!debug.contains("hunter2"));
    assert!(!display.contains("hunter2"));
    assert!(debug.contains("REDACTED"));
}

/// **VALUE**: Verifies serde serialization is refused.
///
/// **WHY THIS MATTERS**: The credential file is written through an explicit
/// record type. Serializing the wrapper directly would be an accidental leak path.
#[test]
fn given_secret_when_serialized_then_returns_error() {
    // GIVEN: A secret
    let secret = RedactedSecret::new("hunter2");

    // WHEN: Serializing to JSON
    let result = serde_json::to_string(&secret);

    // THEN: Should fail with a descriptive message
    let err = result.expect_err("serialization must be refused");
    assert!(err.to_string().contains("cannot be serialized"));
}

/// **VALUE**: Verifies `expose()`, length and equality operate on the real value.
///
/// **BUG THIS CATCHES**: Would catch if equality compared redacted text, which
/// would make every password change invisible to the config watcher.
#[test]
fn given_two_secrets_when_compared_then_uses_underlying_value() {
    // GIVEN: Two different secrets and one copy
    let a = RedactedSecret::from("alpha");
    let b = RedactedSecret::from("beta");
    let a_copy = a.clone();

    // THEN: Comparison and accessors use the real value
    assert_eq!(a, a_copy);
    assert_ne!(a, b);
    assert_eq!(a.expose(), "alpha");
    assert_eq!(a.len(), 5);
    assert!(RedactedSecret::default().is_empty());
}
