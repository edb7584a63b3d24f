use crate::helpers::{TEST_HOST, TEST_PORT, TEST_SECRET, test_credentials, write_record};

use rcon_core::config::ConfigStore;
use rcon_core::error::config::ConfigError;

use models::{Credentials, CredentialsBuilder};

use common::RedactedSecret;

use std::time::Duration;

use tempfile::tempdir;

// ============================================================================
// ConfigStore::load()
// ============================================================================

/// **VALUE**: Verifies a missing file degrades to "not configured".
///
/// **WHY THIS MATTERS**: First launch has no config.json. The panel must come
/// up and prompt for settings instead of failing.
#[test]
fn given_missing_file_when_loading_then_returns_empty_and_unconfigured() {
    // GIVEN: A path with no file
    let dir = tempdir().unwrap();
    let store = ConfigStore::new(dir.path().join("config.json"));

    // WHEN: Loading
    let (credentials, configured) = store.load();

    // THEN: Empty credentials, not configured
    assert!(!configured);
    assert_eq!(credentials, Credentials::default());
    assert!(!store.is_configured());
    assert_eq!(store.modified(), None);
}

/// **VALUE**: Verifies malformed JSON degrades to "not configured" and
/// clears previously loaded credentials.
///
/// **BUG THIS CATCHES**: Would catch `load()` propagating a parse error or
/// keeping stale credentials from an earlier successful load.
#[test]
fn given_malformed_file_when_loading_then_returns_unconfigured() {
    // GIVEN: A store that loaded valid credentials, then a corrupted file
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    write_record(&path, TEST_HOST, TEST_PORT, TEST_SECRET, Duration::ZERO);
    let store = ConfigStore::new(&path);
    assert!(store.load().1);
    std::fs::write(&path, "{ \"server_ip\": ").unwrap();

    // WHEN: Loading again
    let (credentials, configured) = store.load();

    // THEN: Not configured, memory reset
    assert!(!configured);
    assert_eq!(credentials, Credentials::default());
    assert_eq!(store.current(), Credentials::default());
}

/// **VALUE**: Verifies a record with an empty or absent field is not "configured".
///
/// **WHY THIS MATTERS**: Hand-edited files often have `"password": ""`.
/// Invoking the client with an empty password only produces a confusing
/// authentication error.
#[test]
fn given_incomplete_record_when_loading_then_values_kept_but_unconfigured() {
    // GIVEN: A record missing the password key
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"server_ip": "10.0.0.5", "port": "25575"}"#).unwrap();
    let store = ConfigStore::new(&path);

    // WHEN: Loading
    let (credentials, configured) = store.load();

    // THEN: Present fields are kept, configured is false
    assert!(!configured);
    assert_eq!(credentials.host, "10.0.0.5");
    assert_eq!(credentials.port, "25575");
    assert!(credentials.secret.is_empty());
}

// ============================================================================
// ConfigStore::save()
// ============================================================================

/// **VALUE**: Verifies `save` rejects any credential triple with an empty field.
///
/// **WHY THIS MATTERS**: Replace-all-or-reject-all. A rejected save must not
/// create or touch the file and must not flip the store to configured.
///
/// **BUG THIS CATCHES**: Would catch validation being skipped for one field,
/// or the temp file being written before validation.
#[test]
fn given_credentials_with_empty_field_when_saving_then_rejected_and_nothing_written() {
    let cases = vec![
        ("", TEST_PORT, TEST_SECRET),
        (TEST_HOST, "", TEST_SECRET),
        (TEST_HOST, TEST_PORT, ""),
        ("", "", ""),
    ];

    for (host, port, secret) in cases {
        // GIVEN: A fresh store and an incomplete triple
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = ConfigStore::new(&path);
        let credentials = Credentials {
            host: host.to_string(),
            port: port.to_string(),
            secret: RedactedSecret::new(secret),
        };

        // WHEN: Saving
        let result = store.save(&credentials);

        // THEN: Validation error, nothing on disk, still unconfigured
        assert!(
            matches!(result, Err(ConfigError::ValidationError { .. })),
            "expected validation error for ({host:?}, {port:?})"
        );
        assert!(!path.exists());
        assert!(!dir.path().join("config.json.tmp").exists());
        assert!(!store.is_configured());
    }
}

/// **VALUE**: Verifies `save(C)` then `load()` yields `C`.
///
/// **WHY THIS MATTERS**: This is the basic durability guarantee of the panel.
#[test]
fn given_valid_credentials_when_saved_then_load_round_trips() {
    // GIVEN: A store and valid credentials with unusual characters
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let credentials = CredentialsBuilder::default()
        .with_host("192.168.1.20")
        .with_port("25575")
        .with_secret("p\"ä$s w0rd\\")
        .build()
        .unwrap();

    // WHEN: Saving, then loading from a second store on the same file
    ConfigStore::new(&path).save(&credentials).unwrap();
    let (loaded, configured) = ConfigStore::new(&path).load();

    // THEN: Identical credentials
    assert!(configured);
    assert_eq!(loaded, credentials);
}

/// **VALUE**: Verifies the file has exactly the three interoperable field names.
///
/// **BUG THIS CATCHES**: Would catch a serde rename (e.g. `host` instead of
/// `server_ip`) that breaks files shared with other tools.
#[test]
fn given_saved_credentials_when_file_inspected_then_has_exactly_three_fields() {
    // GIVEN: Saved credentials
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    ConfigStore::new(&path).save(&test_credentials()).unwrap();

    // WHEN: Parsing the raw file
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    // THEN: Exactly server_ip, port, password as strings
    let object = raw.as_object().expect("top-level object");
    let mut keys: Vec<_> = object.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["password", "port", "server_ip"]);
    assert_eq!(object["server_ip"], TEST_HOST);
    assert_eq!(object["port"], TEST_PORT);
    assert_eq!(object["password"], TEST_SECRET);
}

/// **VALUE**: Verifies save creates missing parent directories, leaves no temp
/// file behind, and updates the in-memory copy.
#[test]
fn given_nested_path_when_saving_then_creates_directory_and_updates_memory() {
    // GIVEN: A path whose parent does not exist
    let dir = tempdir().unwrap();
    let path = dir.path().join("panel").join("config.json");
    let store = ConfigStore::new(&path);

    // WHEN: Saving
    store.save(&test_credentials()).unwrap();

    // THEN: File exists, temp file gone, memory updated
    assert!(path.exists());
    assert!(!dir.path().join("panel").join("config.json.tmp").exists());
    assert_eq!(store.current(), test_credentials());
    assert!(store.is_configured());
}

// ============================================================================
// ConfigStore::reload()
// ============================================================================

/// **VALUE**: Verifies reload reports whether the content changed.
///
/// **BUG THIS CATCHES**: Would catch `previous` being read after the swap,
/// which would make every reload look unchanged.
#[test]
fn given_changed_file_when_reloading_then_reports_previous_and_current() {
    // GIVEN: A loaded store
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    write_record(&path, TEST_HOST, TEST_PORT, TEST_SECRET, Duration::ZERO);
    let store = ConfigStore::new(&path);
    store.load();

    // WHEN: Reloading unchanged, then changed content
    let unchanged = store.reload();
    write_record(&path, TEST_HOST, "25576", TEST_SECRET, Duration::ZERO);
    let changed = store.reload();

    // THEN: Change detection is accurate
    assert!(!unchanged.changed());
    assert!(changed.changed());
    assert_eq!(changed.previous.port, TEST_PORT);
    assert_eq!(changed.current.port, "25576");
    assert_eq!(store.current().port, "25576");
}

/// **VALUE**: Verifies a reload that cannot parse the file falls back to
/// empty credentials, exactly like startup `load()`.
///
/// **BUG THIS CATCHES**: Would catch the watcher path keeping stale
/// credentials after the file was corrupted, so commands keep running against
/// a server the file no longer names.
#[test]
fn given_corrupt_file_when_reloading_then_credentials_become_empty() {
    // GIVEN: A loaded store and then a corrupt file
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    write_record(&path, TEST_HOST, TEST_PORT, TEST_SECRET, Duration::ZERO);
    let store = ConfigStore::new(&path);
    store.load();
    std::fs::write(&path, "not json").unwrap();

    // WHEN: Reloading
    let reload = store.reload();

    // THEN: Previous copy reported, memory now empty
    assert!(reload.changed());
    assert_eq!(reload.previous, test_credentials());
    assert_eq!(reload.current, Credentials::default());
    assert!(!store.is_configured());
}
