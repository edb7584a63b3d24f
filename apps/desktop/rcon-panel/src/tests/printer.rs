// Unit tests for console rendering

use crate::printer::{format_entry, format_status};

use models::{ConnectionStatus, LogCategory, LogEntry};

use std::time::{Duration, SystemTime};

/// **VALUE**: Verifies entries render as `[HH:MM:SS] text` in UTC.
#[test]
fn given_entry_when_formatted_then_clock_prefix() {
    // GIVEN: 09:41:07 on the first day of the epoch
    let entry = LogEntry {
        seq: 3,
        timestamp: SystemTime::UNIX_EPOCH + Duration::from_secs(9 * 3600 + 41 * 60 + 7),
        category: LogCategory::Success,
        text: "✓ There are 0 of a max of 20 players online".to_string(),
    };

    // WHEN / THEN
    assert_eq!(
        format_entry(&entry),
        "[09:41:07] ✓ There are 0 of a max of 20 players online"
    );
}

#[test]
fn given_statuses_when_formatted_then_named() {
    assert_eq!(format_status(ConnectionStatus::Connected), "● Connected");
    assert_eq!(format_status(ConnectionStatus::Disconnected), "○ Disconnected");
    assert_eq!(format_status(ConnectionStatus::Unknown), "? Unknown");
}
