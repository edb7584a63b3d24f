//! Connection status tracking.
//!
//! Status is derived only from runner outcomes: success means Connected,
//! failure means Disconnected. The UI never sets it directly.

use models::{CommandOutcome, ConnectionStatus};

use log::info;
use tokio::sync::watch;

/// Single owner of the current [`ConnectionStatus`].
///
/// Observers hold a `watch::Receiver`; the new value is visible to them as
/// soon as [`apply`](Self::apply) returns.
#[derive(Debug)]
pub struct ConnectionMonitor {
    status_tx: watch::Sender<ConnectionStatus>,
}

impl ConnectionMonitor {
    pub fn new() -> Self {
        Self {
            status_tx: watch::Sender::new(ConnectionStatus::Unknown),
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        *self.status_tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectionStatus> {
        self.status_tx.subscribe()
    }

    /// Fold an outcome into the status and return the new value.
    pub fn apply(&self, outcome: &CommandOutcome) -> ConnectionStatus {
        let next = if outcome.succeeded() {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        };

        let previous = self.status_tx.send_replace(next);
        if previous != next {
            info!("Connection status: {previous} -> {next}");
        }

        next
    }
}

impl Default for ConnectionMonitor {
    fn default() -> Self {
        Self::new()
    }
}
