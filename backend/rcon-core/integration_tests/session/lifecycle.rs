//! Startup, reconfiguration and hot reload.

use crate::helpers::{
    RecordingRunner, TEST_HOST, TEST_PORT, TEST_SECRET, configured_store, set_modified, wait_until,
    write_record,
};

use rcon_core::config::ConfigStore;
use rcon_core::error::config::ConfigError;
use rcon_core::error::session::SessionError;
use rcon_core::session::SessionManager;

use models::ConnectionStatus;

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tempfile::tempdir;

const FAST_POLL: Duration = Duration::from_millis(20);

fn texts(session: &SessionManager<RecordingRunner>) -> Vec<String> {
    session.log_snapshot().into_iter().map(|e| e.text).collect()
}

/// **VALUE**: Verifies a configured startup announces the file and probes once.
#[tokio::test]
async fn given_configured_file_when_starting_then_loaded_and_probed() {
    // GIVEN
    let dir = tempdir().unwrap();
    let store = configured_store(dir.path());
    let runner = RecordingRunner::new();
    let session = SessionManager::new(store, runner.clone());

    // WHEN
    let pending = session.start(FAST_POLL).expect("configured start should probe");
    pending.await.unwrap();

    // THEN
    assert_eq!(runner.commands(), vec!["list"]);
    assert_eq!(session.status(), ConnectionStatus::Connected);
    let log = texts(&session);
    assert_eq!(log[0], "✓ Configuration loaded from config.json");
    assert_eq!(log[1], "🔄 Testing connection...");
    assert!(session.is_watching());
    session.stop_watching();
    assert!(!session.is_watching());
}

/// **VALUE**: Verifies an unconfigured startup warns twice and does not probe.
///
/// **WHY THIS MATTERS**: First launch has no config.json. The operator should
/// get setup instructions, not a failed connection attempt.
#[tokio::test]
async fn given_missing_file_when_starting_then_warnings_and_no_probe() {
    // GIVEN
    let dir = tempdir().unwrap();
    let store = Arc::new(ConfigStore::new(dir.path().join("config.json")));
    let runner = RecordingRunner::new();
    let session = SessionManager::new(store, runner.clone());

    // WHEN
    let pending = session.start(FAST_POLL);

    // THEN
    assert!(pending.is_none());
    assert_eq!(runner.call_count(), 0);
    assert_eq!(
        texts(&session),
        vec![
            "⚠ Configuration not found",
            "⚠ Please set up your RCON configuration"
        ]
    );
    assert!(session.is_watching());
}

/// **VALUE**: Verifies an external edit to the file switches the session to
/// the new server and re-tests it.
///
/// **BUG THIS CATCHES**: Would catch the watcher reloading the store without
/// the session reacting, leaving commands aimed at the old server until restart.
#[tokio::test]
async fn given_running_session_when_file_edited_then_new_credentials_probed() {
    // GIVEN: A started session
    let dir = tempdir().unwrap();
    let store = configured_store(dir.path());
    let runner = RecordingRunner::new();
    let session = SessionManager::new(Arc::clone(&store), runner.clone());
    session.start(FAST_POLL).unwrap().await.unwrap();

    // WHEN: The file is rewritten with a new host
    write_record(
        store.path(),
        "backup.example.org",
        TEST_PORT,
        TEST_SECRET,
        Duration::from_secs(5),
    );

    // THEN: A second probe runs against the new host
    let probed = wait_until(Duration::from_secs(3), || {
        runner
            .calls()
            .get(1)
            .is_some_and(|(credentials, _)| credentials.host == "backup.example.org")
    })
    .await;
    assert!(probed, "expected a probe against the new host");
    assert!(wait_until(Duration::from_secs(1), || session.in_flight() == 0).await);
    let log = texts(&session);
    assert!(log.contains(&"🔄 Configuration updated from config.json".to_string()));
    assert_eq!(runner.call_count(), 2);
    session.stop_watching();
}

/// **VALUE**: Verifies corrupting the file while running leaves the session
/// unconfigured, the same state a corrupt file produces at startup.
///
/// **BUG THIS CATCHES**: Would catch the hot-reload path keeping the last good
/// credentials, so commands keep reaching a server the file no longer names.
#[tokio::test]
async fn given_running_session_when_file_corrupted_then_unconfigured() {
    // GIVEN: A started session
    let dir = tempdir().unwrap();
    let store = configured_store(dir.path());
    let runner = RecordingRunner::new();
    let session = SessionManager::new(Arc::clone(&store), runner.clone());
    session.start(FAST_POLL).unwrap().await.unwrap();

    // WHEN: The file is overwritten with garbage
    std::fs::write(store.path(), "not json").unwrap();
    set_modified(store.path(), SystemTime::now() + Duration::from_secs(5));

    // THEN: Credentials emptied, re-test refused, nothing dispatched
    let warned = wait_until(Duration::from_secs(3), || {
        texts(&session).contains(&"⚠ Configuration not set".to_string())
    })
    .await;
    assert!(warned, "expected the not-configured warning");
    assert!(!session.is_configured());
    assert_eq!(runner.call_count(), 1);
    assert!(matches!(
        session.execute_command("list"),
        Err(SessionError::NotConfigured { .. })
    ));
    session.stop_watching();
}

/// **VALUE**: Verifies invalid form input is rejected without writing anything.
#[tokio::test]
async fn given_blank_field_when_reconfiguring_then_validation_error_and_file_untouched() {
    // GIVEN
    let dir = tempdir().unwrap();
    let store = configured_store(dir.path());
    let before = std::fs::read_to_string(store.path()).unwrap();
    let runner = RecordingRunner::new();
    let session = SessionManager::new(Arc::clone(&store), runner.clone());

    // WHEN
    let result = session.reconfigure("new.example.org", "   ", "pw");

    // THEN
    assert!(matches!(result, Err(SessionError::Validation { ref message, .. }) if message == "Port cannot be empty"));
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    assert_eq!(session.credentials().host, TEST_HOST);
    assert_eq!(texts(&session), vec!["⚠ Please fill in all required fields!"]);
    assert_eq!(runner.call_count(), 0);
}

/// **VALUE**: Verifies valid input is trimmed, saved, adopted and tested.
#[tokio::test]
async fn given_valid_fields_when_reconfiguring_then_saved_and_tested() {
    // GIVEN: A first-run session with no file
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let store = Arc::new(ConfigStore::new(&path));
    store.load();
    let runner = RecordingRunner::new();
    let session = SessionManager::new(Arc::clone(&store), runner.clone());

    // WHEN
    let pending = session
        .reconfigure(" new.example.org ", "25576", " s3cret ")
        .unwrap();
    pending.await.unwrap();

    // THEN: Persisted, in memory, and probed with the new values
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["server_ip"], "new.example.org");
    assert_eq!(written["port"], "25576");
    assert_eq!(written["password"], "s3cret");
    assert!(session.is_configured());

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0.host, "new.example.org");
    assert_eq!(calls[0].0.secret.expose(), "s3cret");

    let log = texts(&session);
    assert_eq!(log[0], "✓ Configuration saved successfully");
    assert_eq!(log[1], "🔄 Testing connection...");
}

/// **VALUE**: Verifies a failed write is reported and nothing is dispatched.
#[tokio::test]
async fn given_unwritable_location_when_reconfiguring_then_config_error() {
    // GIVEN: A config path whose parent is a regular file
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let store = Arc::new(ConfigStore::new(blocker.join("config.json")));
    let runner = RecordingRunner::new();
    let session = SessionManager::new(store, runner.clone());

    // WHEN
    let result = session.reconfigure("new.example.org", "25575", "pw");

    // THEN
    assert!(matches!(
        result,
        Err(SessionError::Config(ConfigError::WriteError { .. }))
    ));
    assert!(!session.is_configured());
    assert_eq!(runner.call_count(), 0);
    let log = texts(&session);
    assert_eq!(log.len(), 1);
    assert!(log[0].starts_with("✗ Failed to save configuration:"));
}
