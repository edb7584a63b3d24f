use crate::helpers::{TEST_HOST, TEST_PORT, TEST_SECRET, set_modified, write_record};

use rcon_core::config::watcher::{MIN_POLL_INTERVAL, WatchState};
use rcon_core::config::{ConfigEvent, ConfigStore, ConfigWatcher};

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use models::Credentials;

use tempfile::tempdir;
use tokio::time::timeout;

// ============================================================================
// WatchState::tick() - one polling cycle at a time
// ============================================================================

/// **VALUE**: Verifies an existing, unmodified file produces no events.
///
/// **WHY THIS MATTERS**: The watcher starts right after the startup load. A
/// spurious reload would trigger a second connection test on every launch.
#[test]
fn given_unmodified_file_when_ticking_then_no_events() {
    // GIVEN: A loaded store and a fresh watch state
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    write_record(&path, TEST_HOST, TEST_PORT, TEST_SECRET, Duration::ZERO);
    let store = ConfigStore::new(&path);
    store.load();
    let mut state = WatchState::new(&store);

    // WHEN / THEN: Ticking yields nothing
    assert!(state.tick(&store).is_empty());
    assert!(state.tick(&store).is_empty());
}

/// **VALUE**: Verifies a newer file with different content yields a reload
/// and exactly one change event.
///
/// **BUG THIS CATCHES**: Would catch the watermark not being advanced, which
/// would report the same change on every subsequent tick.
#[test]
fn given_changed_content_when_ticking_then_reload_and_single_change() {
    // GIVEN: A loaded store and watch state
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    write_record(&path, TEST_HOST, TEST_PORT, TEST_SECRET, Duration::ZERO);
    let store = ConfigStore::new(&path);
    store.load();
    let mut state = WatchState::new(&store);

    // WHEN: Another tool rewrites the file with a new password
    write_record(&path, TEST_HOST, TEST_PORT, "rotated", Duration::from_secs(5));
    let first = state.tick(&store);
    let second = state.tick(&store);

    // THEN: Reloaded + CredentialsChanged once, then quiet
    assert_eq!(first.len(), 2);
    assert!(matches!(first[0], ConfigEvent::Reloaded(_)));
    match &first[1] {
        ConfigEvent::CredentialsChanged(credentials) => {
            assert_eq!(credentials.secret.expose(), "rotated")
        }
        other => panic!("expected CredentialsChanged, got {other:?}"),
    }
    assert!(second.is_empty());
    assert_eq!(store.current().secret.expose(), "rotated");
}

/// **VALUE**: Verifies a touched file with identical content reloads without
/// reporting a change.
///
/// **WHY THIS MATTERS**: Editors often re-save unchanged files. Reconnecting
/// on each save would spam the server with probes.
#[test]
fn given_touched_file_with_same_content_when_ticking_then_no_change_event() {
    // GIVEN: A loaded store and watch state
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    write_record(&path, TEST_HOST, TEST_PORT, TEST_SECRET, Duration::ZERO);
    let store = ConfigStore::new(&path);
    store.load();
    let mut state = WatchState::new(&store);

    // WHEN: Only the modification time advances
    set_modified(&path, SystemTime::now() + Duration::from_secs(5));
    let events = state.tick(&store);

    // THEN: Reloaded only
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], ConfigEvent::Reloaded(_)));
}

/// **VALUE**: Verifies a file corrupted while running empties the credentials
/// and reports that as a single change.
///
/// **BUG THIS CATCHES**: Would catch the watcher keeping the last good
/// credentials when the file no longer parses, so the session silently keeps
/// talking to a server the operator has removed.
#[test]
fn given_corrupted_file_when_ticking_then_credentials_emptied_and_single_change() {
    // GIVEN: A configured store and watch state
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    write_record(&path, TEST_HOST, TEST_PORT, TEST_SECRET, Duration::ZERO);
    let store = ConfigStore::new(&path);
    store.load();
    assert!(store.is_configured());
    let mut state = WatchState::new(&store);

    // WHEN: The file is overwritten with garbage and its mtime advances
    std::fs::write(&path, "not json").unwrap();
    set_modified(&path, SystemTime::now() + Duration::from_secs(10));
    let first = state.tick(&store);
    let second = state.tick(&store);

    // THEN: Reloaded + CredentialsChanged(empty) once, memory empty
    assert_eq!(first.len(), 2);
    assert!(matches!(first[0], ConfigEvent::Reloaded(_)));
    assert_eq!(
        first[1],
        ConfigEvent::CredentialsChanged(Credentials::default())
    );
    assert!(second.is_empty());
    assert!(!store.is_configured());
    assert_eq!(store.current(), Credentials::default());
}

/// **VALUE**: Verifies an older modification time is ignored.
///
/// **BUG THIS CATCHES**: Would catch a `!=` comparison replacing the strict
/// "newer than" check, which would reload when a backup is restored.
#[test]
fn given_older_modification_time_when_ticking_then_ignored() {
    // GIVEN: A file whose mtime is in the future, observed by the watch state
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    write_record(&path, TEST_HOST, TEST_PORT, TEST_SECRET, Duration::from_secs(60));
    let store = ConfigStore::new(&path);
    store.load();
    let mut state = WatchState::new(&store);

    // WHEN: The file is replaced by one with an older timestamp
    write_record(&path, "other.host", TEST_PORT, TEST_SECRET, Duration::ZERO);
    let events = state.tick(&store);

    // THEN: Nothing happens
    assert!(events.is_empty());
    assert_eq!(store.current().host, TEST_HOST);
}

/// **VALUE**: Verifies a file created after startup is picked up.
#[test]
fn given_file_created_after_start_when_ticking_then_credentials_loaded() {
    // GIVEN: No file at start
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let store = ConfigStore::new(&path);
    store.load();
    let mut state = WatchState::new(&store);
    assert_eq!(state.last_known_modified(), SystemTime::UNIX_EPOCH);

    // WHEN: The operator creates the file
    write_record(&path, TEST_HOST, TEST_PORT, TEST_SECRET, Duration::ZERO);
    let events = state.tick(&store);

    // THEN: Loaded and reported as a change
    assert_eq!(events.len(), 2);
    assert!(store.is_configured());
}

// ============================================================================
// ConfigWatcher - background polling
// ============================================================================

/// **VALUE**: Verifies the background watcher delivers a change within one
/// polling interval, exactly once.
///
/// **WHY THIS MATTERS**: This is the hot-reconfiguration path: editing
/// config.json while the panel runs must switch the session to the new server.
#[tokio::test]
async fn given_running_watcher_when_file_changes_then_change_delivered_once() {
    // GIVEN: A loaded store and a fast watcher
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    write_record(&path, TEST_HOST, TEST_PORT, TEST_SECRET, Duration::ZERO);
    let store = Arc::new(ConfigStore::new(&path));
    store.load();
    let (watcher, mut events) = ConfigWatcher::start(Arc::clone(&store), Duration::from_millis(20));

    // WHEN: The file changes
    write_record(&path, "new.example.org", TEST_PORT, TEST_SECRET, Duration::from_secs(5));

    // THEN: Reloaded then CredentialsChanged, and nothing after
    let first = timeout(Duration::from_secs(2), events.recv()).await.unwrap();
    let second = timeout(Duration::from_secs(2), events.recv()).await.unwrap();
    assert!(matches!(first, Some(ConfigEvent::Reloaded(_))));
    assert!(matches!(second, Some(ConfigEvent::CredentialsChanged(ref c)) if c.host == "new.example.org"));
    assert!(timeout(Duration::from_millis(150), events.recv()).await.is_err());
    assert_eq!(store.current().host, "new.example.org");
    assert!(watcher.is_running());
}

/// **VALUE**: Verifies a zero poll interval is raised to the minimum instead
/// of aborting the polling task.
///
/// **BUG THIS CATCHES**: Would catch `interval(Duration::ZERO)` panicking
/// inside the spawned task, which leaves a watcher that reports nothing.
#[tokio::test]
async fn given_zero_interval_when_starting_then_watcher_still_polls() {
    // GIVEN: A loaded store and a watcher started with a zero interval
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    write_record(&path, TEST_HOST, TEST_PORT, TEST_SECRET, Duration::ZERO);
    let store = Arc::new(ConfigStore::new(&path));
    store.load();
    let (watcher, mut events) = ConfigWatcher::start(Arc::clone(&store), Duration::ZERO);

    // WHEN: A few minimum periods pass and the file changes
    tokio::time::sleep(MIN_POLL_INTERVAL * 3).await;
    assert!(watcher.is_running());
    write_record(&path, "new.example.org", TEST_PORT, TEST_SECRET, Duration::from_secs(5));

    // THEN: The change is still delivered
    let first = timeout(Duration::from_secs(2), events.recv()).await.unwrap();
    assert!(matches!(first, Some(ConfigEvent::Reloaded(_))));
    assert!(watcher.is_running());
}

/// **VALUE**: Verifies dropping the handle stops polling and closes the stream.
#[tokio::test]
async fn given_running_watcher_when_dropped_then_event_stream_ends() {
    // GIVEN: A running watcher
    let dir = tempdir().unwrap();
    let store = Arc::new(ConfigStore::new(dir.path().join("config.json")));
    let (watcher, mut events) = ConfigWatcher::start(store, Duration::from_millis(20));

    // WHEN: Dropping the handle
    drop(watcher);

    // THEN: The receiver sees the channel close
    let next = timeout(Duration::from_secs(2), events.recv()).await.unwrap();
    assert!(next.is_none());
}
