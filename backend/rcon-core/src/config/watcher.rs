//! Polling watcher for the credential file.
//!
//! Every tick compares the file's modification time with the last one seen.
//! Only a strictly newer time triggers a reload, and only a reload whose
//! content differs from the in-memory copy reports a credential change. A
//! file that no longer parses reloads as empty credentials, which is a change
//! whenever the session was configured.

use crate::config::ConfigStore;

use models::Credentials;

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// Shortest polling period; smaller values (including zero) are raised to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Notifications produced by the watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEvent {
    /// The file was re-read after its modification time advanced.
    Reloaded(Credentials),

    /// The re-read credentials differ from the previous in-memory copy.
    CredentialsChanged(Credentials),
}

/// Polling state, owned by the watcher task.
#[derive(Debug, Clone)]
pub struct WatchState {
    last_known_modified: SystemTime,
}

impl WatchState {
    /// Start from the file's current modification time so an existing file
    /// does not count as a change.
    pub fn new(store: &ConfigStore) -> Self {
        Self {
            last_known_modified: store.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        }
    }

    pub fn last_known_modified(&self) -> SystemTime {
        self.last_known_modified
    }

    /// Run one polling cycle and return the events it produced, in order.
    pub fn tick(&mut self, store: &ConfigStore) -> Vec<ConfigEvent> {
        let Some(modified) = store.modified() else {
            return Vec::new();
        };

        if modified <= self.last_known_modified {
            return Vec::new();
        }

        self.last_known_modified = modified;

        info!("Config file {} changed on disk", store.path().display());
        let reload = store.reload();

        let mut events = vec![ConfigEvent::Reloaded(reload.current.clone())];
        if reload.changed() {
            if reload.current.is_complete() {
                info!("Credentials changed: now {}", reload.current.endpoint());
            } else {
                warn!("Credentials changed: no longer configured");
            }
            events.push(ConfigEvent::CredentialsChanged(reload.current));
        }
        events
    }
}

/// Handle to the background polling task. Dropping it stops polling.
pub struct ConfigWatcher {
    task: JoinHandle<()>,
}

impl ConfigWatcher {
    /// Spawn the polling task on the current tokio runtime.
    ///
    /// Returns the handle and the receiving end of the event stream. Polling
    /// stops when the handle is dropped or the receiver goes away.
    pub fn start(
        store: Arc<ConfigStore>,
        poll_interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<ConfigEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = WatchState::new(&store);

        if poll_interval < MIN_POLL_INTERVAL {
            warn!("Poll interval {poll_interval:?} too short, using {MIN_POLL_INTERVAL:?}");
        }
        let poll_interval = poll_interval.max(MIN_POLL_INTERVAL);

        debug!(
            "Watching {} every {poll_interval:?}",
            store.path().display()
        );

        let task = tokio::spawn(async move {
            let mut ticker = interval(poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                for event in state.tick(&store) {
                    if tx.send(event).is_err() {
                        debug!("Config event receiver dropped, stopping watcher");
                        return;
                    }
                }
            }
        });

        (Self { task }, rx)
    }

    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for ConfigWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}
