use crate::connection::ConnectionMonitor;

use models::{CommandOutcome, ConnectionStatus, ErrorKind};

/// **VALUE**: Verifies the status always equals the most recent outcome.
///
/// **WHY THIS MATTERS**: The status indicator must never show a stale value
/// after an invocation completes, whichever way it went.
///
/// **BUG THIS CATCHES**: Would catch a transition being skipped (e.g. staying
/// Connected after a failure because the previous state was Connected).
#[test]
fn given_sequence_of_outcomes_when_applied_then_status_tracks_latest() {
    // GIVEN: A fresh monitor
    let monitor = ConnectionMonitor::new();
    assert_eq!(monitor.status(), ConnectionStatus::Unknown);

    // WHEN / THEN: Each outcome drives the status
    let sequence = vec![
        (CommandOutcome::success("ok"), ConnectionStatus::Connected),
        (CommandOutcome::success("ok"), ConnectionStatus::Connected),
        (
            CommandOutcome::failure(ErrorKind::Timeout, "Connection timeout"),
            ConnectionStatus::Disconnected,
        ),
        (
            CommandOutcome::failure(ErrorKind::ClientMissing, "missing"),
            ConnectionStatus::Disconnected,
        ),
        (CommandOutcome::success("ok"), ConnectionStatus::Connected),
    ];

    for (outcome, expected) in sequence {
        assert_eq!(monitor.apply(&outcome), expected);
        assert_eq!(monitor.status(), expected);
    }
}

/// **VALUE**: Verifies observers see the new value as soon as `apply` returns.
///
/// **BUG THIS CATCHES**: Would catch a deferred notification (e.g. through a
/// spawned task), which would let a UI read a stale status.
#[test]
fn given_subscriber_when_outcome_applied_then_sees_change_immediately() {
    // GIVEN: A monitor with one observer
    let monitor = ConnectionMonitor::new();
    let mut observer = monitor.subscribe();
    assert!(!observer.has_changed().unwrap());

    // WHEN: Applying a failure
    monitor.apply(&CommandOutcome::failure(ErrorKind::AuthFailure, "bad password"));

    // THEN: The observer is notified and reads Disconnected
    assert!(observer.has_changed().unwrap());
    assert_eq!(*observer.borrow_and_update(), ConnectionStatus::Disconnected);
}
