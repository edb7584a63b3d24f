// Unit tests for error classification of client stderr

use crate::runner::classify::{classify, get_classifiers};

use models::ErrorKind;

/// **VALUE**: Verifies each known substring maps to its error kind, regardless of case.
///
/// **WHY THIS MATTERS**: The connection-test hints are chosen from the error kind.
/// If classification drifts, operators get the wrong troubleshooting tip.
///
/// **BUG THIS CATCHES**: Would catch a pattern losing its `(?i)` flag or a
/// typo in one of the substrings.
#[test]
fn given_known_client_messages_when_classified_then_maps_to_kind() {
    // GIVEN: Messages as mcrcon prints them, in mixed case
    let cases = vec![
        ("Connection failed.\nError 111: Connection refused", ErrorKind::ConnectionRefused),
        ("CONNECTION REFUSED", ErrorKind::ConnectionRefused),
        ("Connection Timeout", ErrorKind::Timeout),
        ("Authentication failed!", ErrorKind::AuthFailure),
        ("Wrong PASSWORD", ErrorKind::AuthFailure),
        ("Unknown host", ErrorKind::Unclassified),
        ("", ErrorKind::Unclassified),
    ];

    // WHEN / THEN: Each maps to the expected kind
    for (message, expected) in cases {
        assert_eq!(classify(message), expected, "message: {message:?}");
    }
}

/// **VALUE**: Verifies precedence when a message matches several rules.
///
/// **BUG THIS CATCHES**: Would catch a reordering of the rule table, which
/// would change the hint shown for messages like "password prompt timeout".
#[test]
fn given_message_matching_several_rules_when_classified_then_first_rule_wins() {
    assert_eq!(
        classify("connection refused after timeout"),
        ErrorKind::ConnectionRefused
    );
    assert_eq!(classify("timeout waiting for password"), ErrorKind::Timeout);
}

/// **VALUE**: Verifies the rule table compiles and has one rule per kind.
#[test]
fn given_classifier_table_when_initialized_then_has_three_rules() {
    assert_eq!(get_classifiers().len(), 3);
}
