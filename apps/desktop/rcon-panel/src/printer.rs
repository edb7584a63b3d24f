//! Renders the console log and status changes to the terminal.

use rcon_core::runner::CommandRunner;
use rcon_core::session::SessionManager;

use models::{ConnectionStatus, LogEntry};

use std::time::SystemTime;

use humantime::format_rfc3339_seconds;
use log::{debug, warn};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

/// `[HH:MM:SS] text`, UTC.
pub fn format_entry(entry: &LogEntry) -> String {
    format!("[{}] {}", clock(entry.timestamp), entry.text)
}

pub fn format_status(status: ConnectionStatus) -> String {
    let marker = match status {
        ConnectionStatus::Connected => "●",
        ConnectionStatus::Disconnected => "○",
        ConnectionStatus::Unknown => "?",
    };
    format!("{marker} {status}")
}

fn clock(timestamp: SystemTime) -> String {
    // 2026-10-18T09:41:07Z
    let stamp = format_rfc3339_seconds(timestamp).to_string();
    stamp.get(11..19).unwrap_or(&stamp).to_string()
}

/// Print the current log, then follow new entries and status transitions
/// until the session goes away or the task is aborted.
pub fn spawn<R: CommandRunner>(session: &SessionManager<R>) -> JoinHandle<()> {
    let mut feed = session.subscribe_log();
    let mut status = session.subscribe_status();
    let backlog = session.log_snapshot();

    tokio::spawn(async move {
        let mut last_seq = None;
        for entry in &backlog {
            println!("{}", format_entry(entry));
            last_seq = Some(entry.seq);
        }

        loop {
            tokio::select! {
                received = feed.recv() => match received {
                    Ok(entry) => {
                        // Entries appended between subscribe and snapshot show up twice
                        if last_seq.is_some_and(|seq| entry.seq <= seq) {
                            continue;
                        }
                        last_seq = Some(entry.seq);
                        println!("{}", format_entry(&entry));
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Console printer fell behind, {skipped} entries skipped");
                        println!("... {skipped} entries skipped");
                    }
                    Err(RecvError::Closed) => break,
                },
                changed = status.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let current = *status.borrow_and_update();
                    println!("{}", format_status(current));
                }
            }
        }

        debug!("Console printer stopped");
    })
}
