//! Session orchestration.
//!
//! [`SessionManager`] is what a front end talks to. It validates input
//! locally, hands protocol work to a [`CommandRunner`] on its own tokio task,
//! and folds each outcome into the connection status and the console log.
//!
//! # Ordering
//!
//! Every invocation runs on an independent task. Results are logged in the
//! order the invocations *finish*: a slow command fired first can be logged
//! after a fast one fired second. Callers that need strict ordering await
//! each returned handle before issuing the next command.
//!
//! # Runtime
//!
//! Operations that start an invocation call `tokio::spawn` and must run
//! inside a tokio runtime.

pub(crate) mod hints;
mod quick;

pub use quick::QuickCommand;

use crate::config::{ConfigEvent, ConfigStore, ConfigWatcher};
use crate::connection::ConnectionMonitor;
use crate::console::ConsoleLog;
use crate::error::session::SessionError;
use crate::runner::{CommandRunner, Invocation};
use crate::BROADCAST_COMMAND;

use common::ErrorLocation;
use models::{CommandOutcome, ConnectionStatus, Credentials, CredentialsBuilder, ErrorKind, LogEntry};

use std::panic::Location;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use log::{debug, error, info};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

const NOT_SET_MESSAGE: &str = "Configuration not set";
const CONFIGURE_FIRST_MESSAGE: &str = "Please configure RCON settings first";
const EMPTY_MESSAGE_MESSAGE: &str = "Please enter a message";
const EMPTY_COMMAND_MESSAGE: &str = "Please enter a command";
const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields!";

/// Handle to an invocation that is already running.
///
/// Awaiting it yields the outcome after it has been applied to the status
/// and the log. Dropping it does not cancel anything.
pub type PendingOutcome = JoinHandle<CommandOutcome>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tracking {
    Plain,
    Refresh,
}

struct SessionInner<R> {
    store: Arc<ConfigStore>,
    runner: R,
    monitor: ConnectionMonitor,
    console: ConsoleLog,
    in_flight: AtomicUsize,
    refreshing: AtomicUsize,
    watcher: Mutex<Option<ConfigWatcher>>,
}

/// Counts one dispatched invocation while alive.
///
/// Decrements on drop, so a runner that panics or a task that is aborted
/// still releases the busy flags.
struct InFlightGuard<R> {
    inner: Arc<SessionInner<R>>,
    tracking: Tracking,
}

impl<R> InFlightGuard<R> {
    fn enter(inner: Arc<SessionInner<R>>, tracking: Tracking) -> Self {
        inner.in_flight.fetch_add(1, Ordering::SeqCst);
        if tracking == Tracking::Refresh {
            inner.refreshing.fetch_add(1, Ordering::SeqCst);
        }
        Self { inner, tracking }
    }
}

impl<R> Drop for InFlightGuard<R> {
    fn drop(&mut self) {
        if self.tracking == Tracking::Refresh {
            self.inner.refreshing.fetch_sub(1, Ordering::SeqCst);
        }
        self.inner.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Connection and command execution manager.
///
/// Cheap to clone; all clones share the same state.
pub struct SessionManager<R> {
    inner: Arc<SessionInner<R>>,
}

impl<R> Clone for SessionManager<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: CommandRunner> SessionManager<R> {
    pub fn new(store: Arc<ConfigStore>, runner: R) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                store,
                runner,
                monitor: ConnectionMonitor::new(),
                console: ConsoleLog::new(),
                in_flight: AtomicUsize::new(0),
                refreshing: AtomicUsize::new(0),
                watcher: Mutex::new(None),
            }),
        }
    }

    /// Startup sequence: load credentials, test the connection when
    /// configured, and start watching the credential file either way.
    pub fn start(&self, poll_interval: Duration) -> Option<PendingOutcome> {
        let (credentials, configured) = self.inner.store.load();
        let file_name = self.config_file_name();

        let pending = if configured {
            info!("Session starting for {}", credentials.endpoint());
            self.inner
                .console
                .success(format!("✓ Configuration loaded from {file_name}"));
            self.test_connection().ok()
        } else {
            info!("Session starting without configuration");
            self.inner.console.warning("⚠ Configuration not found");
            self.inner
                .console
                .warning("⚠ Please set up your RCON configuration");
            None
        };

        self.watch_config(poll_interval);
        pending
    }

    /// Probe the server with `list`.
    pub fn test_connection(&self) -> Result<PendingOutcome, SessionError> {
        self.require_configured(NOT_SET_MESSAGE)?;
        self.inner.console.info("🔄 Testing connection...");
        Ok(self.dispatch(Invocation::Probe, Tracking::Plain))
    }

    /// Re-run the connection test, flagging the session as refreshing until
    /// the probe completes.
    pub fn refresh(&self) -> Result<PendingOutcome, SessionError> {
        self.require_configured(CONFIGURE_FIRST_MESSAGE)?;
        self.inner.console.info("🔄 Refreshing connection...");
        Ok(self.dispatch(Invocation::Probe, Tracking::Refresh))
    }

    /// Broadcast `text` to every player with `say`.
    ///
    /// On `Ok` the caller clears its input field.
    pub fn send_message(&self, text: &str) -> Result<PendingOutcome, SessionError> {
        let message = self.require_input(text, EMPTY_MESSAGE_MESSAGE)?;
        self.run_command(
            format!("{BROADCAST_COMMAND} {message}"),
            format!("Broadcast: {message}"),
        )
    }

    /// Run a free-form RCON command.
    pub fn execute_command(&self, text: &str) -> Result<PendingOutcome, SessionError> {
        let command = self.require_input(text, EMPTY_COMMAND_MESSAGE)?;
        self.run_command(command.clone(), format!("Command: {command}"))
    }

    pub fn quick_command(&self, quick: QuickCommand) -> Result<PendingOutcome, SessionError> {
        let command = quick.command();
        self.run_command(command.to_string(), format!("Quick: {command}"))
    }

    /// Validate and persist new credentials, then test them right away.
    pub fn reconfigure(
        &self,
        host: &str,
        port: &str,
        secret: &str,
    ) -> Result<PendingOutcome, SessionError> {
        let credentials = CredentialsBuilder::default()
            .with_host(host)
            .with_port(port)
            .with_secret(secret)
            .build()
            .map_err(|e| {
                self.inner.console.warning(format!("⚠ {MISSING_FIELDS_MESSAGE}"));
                SessionError::from(e)
            })?;

        if let Err(e) = self.inner.store.save(&credentials) {
            error!("Failed to save configuration: {e}");
            self.inner
                .console
                .error(format!("✗ Failed to save configuration: {e}"));
            return Err(SessionError::Config(e));
        }

        self.inner
            .console
            .success("✓ Configuration saved successfully");
        self.test_connection()
    }

    /// Reset the console log to a single cleared marker.
    pub fn clear_log(&self) -> LogEntry {
        self.inner.console.clear()
    }

    /// Start (or restart) the credential file watcher.
    ///
    /// Every reload is logged; a credential change also triggers a
    /// connection test.
    pub fn watch_config(&self, poll_interval: Duration) {
        let (watcher, mut events) = ConfigWatcher::start(Arc::clone(&self.inner.store), poll_interval);

        let session = self.clone();
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                session.on_config_event(event);
            }
            debug!("Config event stream ended");
        });

        let previous = self
            .inner
            .watcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(watcher);

        if previous.is_some() {
            debug!("Replaced running config watcher");
        }
    }

    pub fn stop_watching(&self) {
        let watcher = self
            .inner
            .watcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(watcher) = watcher {
            watcher.stop();
            info!("Config watcher stopped");
        }
    }

    pub fn is_watching(&self) -> bool {
        self.inner
            .watcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(ConfigWatcher::is_running)
    }

    pub fn status(&self) -> ConnectionStatus {
        self.inner.monitor.status()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<ConnectionStatus> {
        self.inner.monitor.subscribe()
    }

    pub fn log_snapshot(&self) -> Vec<LogEntry> {
        self.inner.console.snapshot()
    }

    pub fn subscribe_log(&self) -> broadcast::Receiver<LogEntry> {
        self.inner.console.subscribe()
    }

    pub fn credentials(&self) -> Credentials {
        self.inner.store.current()
    }

    pub fn is_configured(&self) -> bool {
        self.inner.store.is_configured()
    }

    pub fn store(&self) -> &ConfigStore {
        &self.inner.store
    }

    /// Number of invocations still running; a front end disables its send
    /// controls while this is non-zero.
    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_refreshing(&self) -> bool {
        self.inner.refreshing.load(Ordering::SeqCst) > 0
    }

    fn on_config_event(&self, event: ConfigEvent) {
        match event {
            ConfigEvent::Reloaded(_) => {
                let file_name = self.config_file_name();
                self.inner
                    .console
                    .success(format!("🔄 Configuration updated from {file_name}"));
            }
            ConfigEvent::CredentialsChanged(credentials) => {
                info!("Testing new credentials for {}", credentials.endpoint());
                // A rejection has already been logged
                let _ = self.test_connection();
            }
        }
    }

    fn run_command(
        &self,
        command: String,
        description: String,
    ) -> Result<PendingOutcome, SessionError> {
        self.require_configured(CONFIGURE_FIRST_MESSAGE)?;
        self.inner.console.info(format!("→ {description}"));
        Ok(self.dispatch(Invocation::Command(command), Tracking::Plain))
    }

    fn dispatch(&self, invocation: Invocation, tracking: Tracking) -> PendingOutcome {
        let credentials = self.inner.store.current();
        let guard = InFlightGuard::enter(Arc::clone(&self.inner), tracking);

        debug!("Dispatching '{}'", invocation.command_text());

        tokio::spawn(async move {
            let inner = &guard.inner;
            let outcome = inner.runner.run(&credentials, &invocation).await;
            inner.record(&invocation, &outcome);
            drop(guard);
            outcome
        })
    }

    #[track_caller]
    fn require_configured(&self, message: &str) -> Result<(), SessionError> {
        if self.inner.store.is_configured() {
            return Ok(());
        }

        self.inner.console.warning(format!("⚠ {message}"));
        Err(SessionError::NotConfigured {
            message: message.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[track_caller]
    fn require_input(&self, text: &str, message: &str) -> Result<String, SessionError> {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }

        self.inner.console.warning(format!("⚠ {message}"));
        Err(SessionError::Validation {
            message: message.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    fn config_file_name(&self) -> String {
        let path = self.inner.store.path();
        path.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string())
    }
}

impl<R> SessionInner<R> {
    /// Apply an outcome to the status, then log it.
    fn record(&self, invocation: &Invocation, outcome: &CommandOutcome) {
        self.monitor.apply(outcome);

        if outcome.succeeded() {
            self.console.success(format!("✓ {}", outcome.output()));
            return;
        }

        let kind = outcome.error_kind().unwrap_or(ErrorKind::Unclassified);
        let line = match (kind, invocation.is_probe()) {
            (ErrorKind::InvocationError, true) => format!("✗ Connection error: {}", outcome.output()),
            (ErrorKind::InvocationError, false) => format!("✗ Error: {}", outcome.output()),
            _ => format!("✗ {}", outcome.output()),
        };
        self.console.error(line);

        if invocation.is_probe()
            && let Some(hint) = hints::hint_for(kind)
        {
            self.console.info(format!("💡 {hint}"));
        }
    }
}
