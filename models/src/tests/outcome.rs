use crate::{CommandOutcome, ConnectionStatus, Credentials, ErrorKind};

/// **VALUE**: Verifies constructors keep `succeeded` and `error_kind` consistent.
///
/// **WHY THIS MATTERS**: The connection state machine trusts `succeeded()`
/// and the hint logic trusts `error_kind()`. They must never disagree.
#[test]
fn given_constructors_when_inspected_then_flags_are_consistent() {
    // GIVEN / WHEN: One success and one failure
    let ok = CommandOutcome::success("There are 0 of a max of 20 players online");
    let failed = CommandOutcome::failure(ErrorKind::AuthFailure, "Authentication failed");

    // THEN: Flags line up
    assert!(ok.succeeded());
    assert_eq!(ok.error_kind(), None);
    assert!(!failed.succeeded());
    assert_eq!(failed.error_kind(), Some(ErrorKind::AuthFailure));
    assert_eq!(failed.output(), "Authentication failed");
}

/// **VALUE**: Verifies defaults: empty credentials are not complete and the
/// status starts as Unknown.
#[test]
fn given_defaults_when_created_then_unconfigured_and_unknown() {
    assert!(!Credentials::default().is_complete());
    assert_eq!(ConnectionStatus::default(), ConnectionStatus::Unknown);
    assert_eq!(ConnectionStatus::Disconnected.to_string(), "Disconnected");
}
