//! Command paths through [`SessionManager`] with a recording runner.

use crate::helpers::{RecordingRunner, TEST_HOST, configured_store, test_credentials};

use rcon_core::config::ConfigStore;
use rcon_core::console::CLEARED_MESSAGE;
use rcon_core::error::session::SessionError;
use rcon_core::runner::{CommandRunner, Invocation, McrconRunner};
use rcon_core::session::{QuickCommand, SessionManager};

use models::{CommandOutcome, ConnectionStatus, Credentials, ErrorKind, LogCategory};

use std::sync::Arc;
use std::time::Duration;

use tempfile::tempdir;

/// Runner whose every invocation panics.
struct PanickingRunner;

impl CommandRunner for PanickingRunner {
    async fn run(&self, _credentials: &Credentials, invocation: &Invocation) -> CommandOutcome {
        panic!("runner failed on '{}'", invocation.command_text());
    }
}

fn texts(session: &SessionManager<RecordingRunner>) -> Vec<String> {
    session.log_snapshot().into_iter().map(|e| e.text).collect()
}

// ============================================================================
// Input validation - rejected before anything is dispatched
// ============================================================================

/// **VALUE**: Verifies blank broadcasts are rejected locally.
///
/// **WHY THIS MATTERS**: `say` with no text is a server-side usage error.
/// Catching it here keeps the status from flipping to Disconnected.
///
/// **BUG THIS CATCHES**: Would catch the trim being skipped, so "   " would
/// reach the server.
#[tokio::test]
async fn given_blank_message_when_sending_then_validation_error_and_no_call() {
    // GIVEN: A configured session
    let dir = tempdir().unwrap();
    let runner = RecordingRunner::new();
    let session = SessionManager::new(configured_store(dir.path()), runner.clone());

    // WHEN: Sending empty and whitespace-only messages
    let empty = session.send_message("");
    let blank = session.send_message("   \t");

    // THEN: Both rejected, nothing dispatched, warning logged
    assert!(matches!(empty, Err(SessionError::Validation { .. })));
    assert!(matches!(blank, Err(SessionError::Validation { .. })));
    assert_eq!(runner.call_count(), 0);
    assert_eq!(session.in_flight(), 0);
    assert_eq!(session.status(), ConnectionStatus::Unknown);
    assert_eq!(
        texts(&session),
        vec!["⚠ Please enter a message", "⚠ Please enter a message"]
    );
}

/// **VALUE**: Verifies blank commands are rejected with their own message.
#[tokio::test]
async fn given_blank_command_when_executing_then_validation_error() {
    // GIVEN
    let dir = tempdir().unwrap();
    let runner = RecordingRunner::new();
    let session = SessionManager::new(configured_store(dir.path()), runner.clone());

    // WHEN
    let result = session.execute_command("  ");

    // THEN
    assert!(matches!(result, Err(SessionError::Validation { ref message, .. }) if message == "Please enter a command"));
    assert_eq!(runner.call_count(), 0);
}

/// **VALUE**: Verifies every operation refuses to run without credentials.
#[tokio::test]
async fn given_unconfigured_store_when_operating_then_not_configured() {
    // GIVEN: A store with no file behind it
    let dir = tempdir().unwrap();
    let store = Arc::new(ConfigStore::new(dir.path().join("config.json")));
    store.load();
    let runner = RecordingRunner::new();
    let session = SessionManager::new(store, runner.clone());

    // WHEN
    let test = session.test_connection();
    let refresh = session.refresh();
    let message = session.send_message("hello");
    let quick = session.quick_command(QuickCommand::Day);

    // THEN: All rejected with the matching warnings
    assert!(matches!(test, Err(SessionError::NotConfigured { .. })));
    assert!(matches!(refresh, Err(SessionError::NotConfigured { .. })));
    assert!(matches!(message, Err(SessionError::NotConfigured { .. })));
    assert!(matches!(quick, Err(SessionError::NotConfigured { .. })));
    assert_eq!(runner.call_count(), 0);
    assert_eq!(
        texts(&session),
        vec![
            "⚠ Configuration not set",
            "⚠ Please configure RCON settings first",
            "⚠ Please configure RCON settings first",
            "⚠ Please configure RCON settings first",
        ]
    );
}

// ============================================================================
// Dispatch and outcome handling
// ============================================================================

/// **VALUE**: Verifies a broadcast issues exactly one `say` invocation and
/// marks the session connected.
#[tokio::test]
async fn given_message_when_sent_then_single_say_invocation_and_connected() {
    // GIVEN
    let dir = tempdir().unwrap();
    let runner = RecordingRunner::new();
    let session = SessionManager::new(configured_store(dir.path()), runner.clone());

    // WHEN: Sending a padded message and awaiting the outcome
    let outcome = session.send_message("  hello  ").unwrap().await.unwrap();

    // THEN
    assert!(outcome.succeeded());
    assert_eq!(runner.commands(), vec!["say hello"]);
    assert_eq!(runner.calls()[0].0, test_credentials());
    assert_eq!(session.status(), ConnectionStatus::Connected);
    assert_eq!(texts(&session), vec!["→ Broadcast: hello", "✓ ran say hello"]);
    assert_eq!(session.in_flight(), 0);
}

/// **VALUE**: Verifies a failed command flips the status and logs the error.
///
/// **BUG THIS CATCHES**: Would catch the monitor only being updated on probes,
/// leaving the indicator green after a command fails.
#[tokio::test]
async fn given_connected_session_when_command_fails_then_disconnected() {
    // GIVEN: A session that has just succeeded once
    let dir = tempdir().unwrap();
    let runner = RecordingRunner::new();
    let session = SessionManager::new(configured_store(dir.path()), runner.clone());
    session.test_connection().unwrap().await.unwrap();
    assert_eq!(session.status(), ConnectionStatus::Connected);

    // WHEN: The next command is refused
    runner.push_outcome(CommandOutcome::failure(
        ErrorKind::ConnectionRefused,
        "Connection refused",
    ));
    session.execute_command("time set day").unwrap().await.unwrap();

    // THEN: Disconnected with an error line and no hint (commands carry none)
    assert_eq!(session.status(), ConnectionStatus::Disconnected);
    let log = session.log_snapshot();
    let last = log.last().unwrap();
    assert_eq!(last.category, LogCategory::Error);
    assert_eq!(last.text, "✗ Connection refused");
}

/// **VALUE**: Verifies a refused probe is followed by a troubleshooting hint.
#[tokio::test]
async fn given_refused_probe_when_recorded_then_hint_follows_error() {
    // GIVEN
    let dir = tempdir().unwrap();
    let runner = RecordingRunner::new();
    runner.push_outcome(CommandOutcome::failure(
        ErrorKind::ConnectionRefused,
        "Error 111: Connection refused",
    ));
    let session = SessionManager::new(configured_store(dir.path()), runner.clone());

    // WHEN
    session.test_connection().unwrap().await.unwrap();

    // THEN
    assert_eq!(
        texts(&session),
        vec![
            "🔄 Testing connection...",
            "✗ Error 111: Connection refused",
            "💡 Tip: Check if RCON is enabled in server.properties",
        ]
    );
}

/// **VALUE**: Verifies invocation errors get a probe or command prefix.
#[tokio::test]
async fn given_invocation_errors_when_recorded_then_prefixed_by_invocation_type() {
    // GIVEN
    let dir = tempdir().unwrap();
    let runner = RecordingRunner::new();
    runner.push_outcome(CommandOutcome::failure(ErrorKind::InvocationError, "broken pipe"));
    runner.push_outcome(CommandOutcome::failure(ErrorKind::InvocationError, "broken pipe"));
    let session = SessionManager::new(configured_store(dir.path()), runner.clone());

    // WHEN
    session.test_connection().unwrap().await.unwrap();
    session.execute_command("list").unwrap().await.unwrap();

    // THEN
    let log = texts(&session);
    assert!(log.contains(&"✗ Connection error: broken pipe".to_string()));
    assert!(log.contains(&"✗ Error: broken pipe".to_string()));
}

/// **VALUE**: Verifies quick commands dispatch their preset text.
#[tokio::test]
async fn given_quick_command_when_run_then_preset_dispatched() {
    // GIVEN
    let dir = tempdir().unwrap();
    let runner = RecordingRunner::new();
    let session = SessionManager::new(configured_store(dir.path()), runner.clone());

    // WHEN
    session.quick_command(QuickCommand::ClearWeather).unwrap().await.unwrap();

    // THEN
    assert_eq!(runner.commands(), vec!["weather clear"]);
    assert_eq!(texts(&session)[0], "→ Quick: weather clear");
}

/// **VALUE**: Verifies refresh is visible while its probe runs.
///
/// **WHY THIS MATTERS**: A front end spins its refresh button on this flag.
/// A flag that never clears leaves the button stuck.
#[tokio::test]
async fn given_slow_probe_when_refreshing_then_flag_set_until_completion() {
    // GIVEN: A probe that takes a moment
    let dir = tempdir().unwrap();
    let runner = RecordingRunner::new();
    runner.delay_command("list", Duration::from_millis(100));
    let session = SessionManager::new(configured_store(dir.path()), runner.clone());

    // WHEN
    let pending = session.refresh().unwrap();

    // THEN: Flag and counter are raised immediately, cleared after
    assert!(session.is_refreshing());
    assert_eq!(session.in_flight(), 1);
    pending.await.unwrap();
    assert!(!session.is_refreshing());
    assert_eq!(session.in_flight(), 0);
    assert_eq!(runner.calls()[0].1, Invocation::Probe);
    assert_eq!(texts(&session)[0], "🔄 Refreshing connection...");
}

/// **VALUE**: Verifies the busy counters are released when the runner panics.
///
/// **BUG THIS CATCHES**: Would catch the decrement living after the runner
/// call in the task body, where a panic skips it and leaves the session
/// reporting work in flight forever.
#[tokio::test]
async fn given_panicking_runner_when_dispatching_then_counters_released() {
    // GIVEN: A configured session whose runner always panics
    let dir = tempdir().unwrap();
    let session = SessionManager::new(configured_store(dir.path()), PanickingRunner);

    // WHEN: A command and a refresh are dispatched
    let command = session.execute_command("list").unwrap();
    let refresh = session.refresh().unwrap();
    let command_result = command.await;
    let refresh_result = refresh.await;

    // THEN: Both tasks panicked, nothing is left in flight
    assert!(command_result.unwrap_err().is_panic());
    assert!(refresh_result.unwrap_err().is_panic());
    assert_eq!(session.in_flight(), 0);
    assert!(!session.is_refreshing());
}

/// **VALUE**: Verifies results are logged in completion order.
///
/// **BUG THIS CATCHES**: Would catch invocations being serialized behind each
/// other, which would make one slow command block the whole console.
#[tokio::test]
async fn given_slow_then_fast_command_when_both_run_then_fast_logged_first() {
    // GIVEN
    let dir = tempdir().unwrap();
    let runner = RecordingRunner::new();
    runner.delay_command("slow", Duration::from_millis(200));
    let session = SessionManager::new(configured_store(dir.path()), runner.clone());

    // WHEN: Firing slow, then fast, without waiting in between
    let slow = session.execute_command("slow").unwrap();
    let fast = session.execute_command("fast").unwrap();
    assert_eq!(session.in_flight(), 2);
    fast.await.unwrap();
    slow.await.unwrap();

    // THEN
    assert_eq!(
        texts(&session),
        vec!["→ Command: slow", "→ Command: fast", "✓ ran fast", "✓ ran slow"]
    );
    let seqs: Vec<u64> = session.log_snapshot().iter().map(|e| e.seq).collect();
    assert!(seqs.windows(2).all(|w| w[0] < w[1]));
}

/// **VALUE**: Verifies a missing client surfaces as a failed outcome without
/// touching the stored credentials.
#[tokio::test]
async fn given_missing_client_when_testing_then_client_missing_and_credentials_kept() {
    // GIVEN: The real runner pointing at nothing
    let dir = tempdir().unwrap();
    let store = configured_store(dir.path());
    let runner = McrconRunner::new(dir.path().join("mcrcon"), Duration::from_secs(5));
    let session = SessionManager::new(Arc::clone(&store), runner);

    // WHEN
    let outcome = session.test_connection().unwrap().await.unwrap();

    // THEN
    assert_eq!(outcome.error_kind(), Some(ErrorKind::ClientMissing));
    assert_eq!(session.status(), ConnectionStatus::Disconnected);
    assert_eq!(session.credentials(), test_credentials());
    let log: Vec<String> = session.log_snapshot().into_iter().map(|e| e.text).collect();
    assert_eq!(log.last().unwrap(), "✗ mcrcon not found in application directory");
}

// ============================================================================
// Log
// ============================================================================

/// **VALUE**: Verifies clearing leaves only the marker and subscribers see it.
#[tokio::test]
async fn given_populated_log_when_cleared_then_only_marker_remains() {
    // GIVEN
    let dir = tempdir().unwrap();
    let session = SessionManager::new(configured_store(dir.path()), RecordingRunner::new());
    session.send_message("hello").unwrap().await.unwrap();
    let mut feed = session.subscribe_log();

    // WHEN
    let marker = session.clear_log();

    // THEN
    let log = session.log_snapshot();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].text, CLEARED_MESSAGE);
    assert_eq!(log[0], marker);
    assert_eq!(feed.recv().await.unwrap(), marker);
}

/// **VALUE**: Verifies the status feed reports transitions.
#[tokio::test]
async fn given_status_subscriber_when_probe_succeeds_then_change_observed() {
    // GIVEN
    let dir = tempdir().unwrap();
    let session = SessionManager::new(configured_store(dir.path()), RecordingRunner::new());
    let mut status = session.subscribe_status();
    assert_eq!(*status.borrow(), ConnectionStatus::Unknown);

    // WHEN
    session.test_connection().unwrap().await.unwrap();

    // THEN
    assert!(status.has_changed().unwrap());
    assert_eq!(*status.borrow_and_update(), ConnectionStatus::Connected);
    assert_eq!(session.credentials().host, TEST_HOST);
}
