use crate::console::{CLEARED_MESSAGE, ConsoleLog};

use models::LogCategory;

/// **VALUE**: Verifies clearing leaves exactly one "Console cleared" entry.
///
/// **WHY THIS MATTERS**: The operator must see that the log was cleared on
/// purpose rather than wonder whether output was lost.
#[test]
fn given_populated_log_when_cleared_then_single_marker_remains() {
    // GIVEN: A log with a few entries
    let log = ConsoleLog::new();
    log.info("→ Command: list");
    log.success("✓ There are 0 players online");
    log.error("✗ Connection refused");

    // WHEN: Clearing
    let marker = log.clear();

    // THEN: Only the marker remains
    let entries = log.snapshot();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0], marker);
    assert_eq!(marker.text, CLEARED_MESSAGE);
    assert_eq!(marker.category, LogCategory::Info);
}

/// **VALUE**: Verifies appends after a clear keep increasing sequence numbers
/// and non-decreasing timestamps.
///
/// **BUG THIS CATCHES**: Would catch the sequence counter being reset by
/// `clear()`, which would make post-clear entries sort before older ones in
/// a front end that merges snapshots and the live feed.
#[test]
fn given_cleared_log_when_appending_then_order_is_preserved() {
    // GIVEN: A log cleared after some activity
    let log = ConsoleLog::new();
    log.info("one");
    let marker = log.clear();

    // WHEN: Appending more entries
    let a = log.warning("⚠ Please enter a message");
    let b = log.success("✓ done");

    // THEN: Strictly increasing seq, non-decreasing timestamps
    assert!(marker.seq < a.seq && a.seq < b.seq);
    assert!(marker.timestamp <= a.timestamp && a.timestamp <= b.timestamp);
    let texts: Vec<_> = log.snapshot().into_iter().map(|e| e.text).collect();
    assert_eq!(texts, vec![CLEARED_MESSAGE, "⚠ Please enter a message", "✓ done"]);
}

/// **VALUE**: Verifies subscribers receive appended entries in order.
#[test]
fn given_subscriber_when_entries_appended_then_receives_them_in_order() {
    // GIVEN: A log with a subscriber
    let log = ConsoleLog::new();
    let mut feed = log.subscribe();

    // WHEN: Appending
    log.info("first");
    log.clear();

    // THEN: Feed yields both, in order
    assert_eq!(feed.try_recv().unwrap().text, "first");
    assert_eq!(feed.try_recv().unwrap().text, CLEARED_MESSAGE);
    assert!(feed.try_recv().is_err());
    assert_eq!(log.len(), 1);
}
