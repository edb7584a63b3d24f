use serde::Serialize;

use std::time::SystemTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogCategory {
    Info,
    Success,
    Error,
    Warning,
}

/// One line of the operator-facing console log.
///
/// `seq` is assigned by the log on append and strictly increases, so it
/// orders entries even when two share a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub seq: u64,
    pub timestamp: SystemTime,
    pub category: LogCategory,
    pub text: String,
}
