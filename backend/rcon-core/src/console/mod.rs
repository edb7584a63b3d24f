//! Operator-facing console log.
//!
//! Append-only, most recent last. Entries are numbered under the write lock
//! and published to subscribers while the lock is held, so the live feed and
//! [`ConsoleLog::snapshot`] agree on order.

use models::{LogCategory, LogEntry};

use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use log::debug;
use tokio::sync::broadcast;

pub const CLEARED_MESSAGE: &str = "Console cleared";

const FEED_CAPACITY: usize = 256;

#[derive(Debug, Default)]
struct Entries {
    items: Vec<LogEntry>,
    next_seq: u64,
}

#[derive(Debug)]
pub struct ConsoleLog {
    entries: RwLock<Entries>,
    feed: broadcast::Sender<LogEntry>,
}

impl ConsoleLog {
    pub fn new() -> Self {
        let (feed, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            entries: RwLock::new(Entries::default()),
            feed,
        }
    }

    pub fn append(&self, category: LogCategory, text: impl Into<String>) -> LogEntry {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        push(&mut entries, &self.feed, category, text.into())
    }

    pub fn info(&self, text: impl Into<String>) -> LogEntry {
        self.append(LogCategory::Info, text)
    }

    pub fn success(&self, text: impl Into<String>) -> LogEntry {
        self.append(LogCategory::Success, text)
    }

    pub fn warning(&self, text: impl Into<String>) -> LogEntry {
        self.append(LogCategory::Warning, text)
    }

    pub fn error(&self, text: impl Into<String>) -> LogEntry {
        self.append(LogCategory::Error, text)
    }

    /// Drop every entry and append the cleared marker in one step.
    pub fn clear(&self) -> LogEntry {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        entries.items.clear();
        push(
            &mut entries,
            &self.feed,
            LogCategory::Info,
            CLEARED_MESSAGE.to_string(),
        )
    }

    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .items
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .items
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live feed of appended entries. Slow subscribers may observe `Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.feed.subscribe()
    }
}

impl Default for ConsoleLog {
    fn default() -> Self {
        Self::new()
    }
}

fn push(
    entries: &mut Entries,
    feed: &broadcast::Sender<LogEntry>,
    category: LogCategory,
    text: String,
) -> LogEntry {
    let entry = LogEntry {
        seq: entries.next_seq,
        timestamp: SystemTime::now(),
        category,
        text,
    };
    entries.next_seq += 1;

    debug!("console [{:?}] {}", entry.category, entry.text);

    entries.items.push(entry.clone());
    // No subscribers is fine
    let _ = feed.send(entry.clone());
    entry
}
