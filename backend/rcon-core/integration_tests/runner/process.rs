//! End-to-end runner tests against shell scripts standing in for the client.

use crate::helpers::{TEST_SECRET, test_credentials};

use rcon_core::runner::{CommandRunner, Invocation, McrconRunner};

use models::ErrorKind;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tempfile::tempdir;

#[cfg(unix)]
fn write_script(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("mcrcon");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// **VALUE**: Verifies the client receives `-H host -P port -p secret command`
/// and its trimmed stdout becomes the outcome.
///
/// **WHY THIS MATTERS**: This is the whole contract with the bundled client.
/// A reordered flag silently targets the wrong server or port.
#[cfg(unix)]
#[tokio::test]
async fn given_echo_client_when_running_command_then_arguments_and_output_returned() {
    // GIVEN: A client that echoes its arguments
    let dir = tempdir().unwrap();
    let script = write_script(dir.path(), r#"echo "$@""#);
    let runner = McrconRunner::new(&script, Duration::from_secs(5));

    // WHEN: Running a command
    let outcome = runner
        .run(&test_credentials(), &Invocation::Command("say hello".to_string()))
        .await;

    // THEN: Success with the exact argument vector
    assert!(outcome.succeeded());
    assert_eq!(
        outcome.output(),
        format!("-H mc.example.org -P 25575 -p {TEST_SECRET} say hello")
    );
}

/// **VALUE**: Verifies a silent successful probe reports the probe placeholder.
#[cfg(unix)]
#[tokio::test]
async fn given_silent_client_when_probing_then_success_placeholder() {
    // GIVEN: A client that exits 0 without output
    let dir = tempdir().unwrap();
    let script = write_script(dir.path(), "exit 0");
    let runner = McrconRunner::new(&script, Duration::from_secs(5));

    // WHEN
    let outcome = runner.run(&test_credentials(), &Invocation::Probe).await;

    // THEN
    assert!(outcome.succeeded());
    assert_eq!(outcome.output(), "Connected to server successfully");
}

/// **VALUE**: Verifies stderr from a failing client is classified.
///
/// **BUG THIS CATCHES**: Would catch stdout being read instead of stderr on
/// failure, which loses the refusal text and the matching hint.
#[cfg(unix)]
#[tokio::test]
async fn given_refusing_client_when_probing_then_connection_refused() {
    // GIVEN: A client that fails like mcrcon does against a closed port
    let dir = tempdir().unwrap();
    let script = write_script(
        dir.path(),
        "echo 'Connection failed.' ; echo 'Error 111: Connection refused' >&2 ; exit 1",
    );
    let runner = McrconRunner::new(&script, Duration::from_secs(5));

    // WHEN
    let outcome = runner.run(&test_credentials(), &Invocation::Probe).await;

    // THEN
    assert!(!outcome.succeeded());
    assert_eq!(outcome.error_kind(), Some(ErrorKind::ConnectionRefused));
    assert_eq!(outcome.output(), "Error 111: Connection refused");
}

/// **VALUE**: Verifies a hung client is killed at the deadline.
///
/// **WHY THIS MATTERS**: Unresponsive servers are common. Without a bound the
/// session would show an in-flight command forever.
#[cfg(unix)]
#[tokio::test]
async fn given_hanging_client_when_running_then_timeout_within_deadline() {
    // GIVEN: A client that sleeps far past a short timeout
    let dir = tempdir().unwrap();
    let script = write_script(dir.path(), "sleep 10");
    let runner = McrconRunner::new(&script, Duration::from_millis(200));

    // WHEN
    let started = Instant::now();
    let outcome = runner.run(&test_credentials(), &Invocation::Probe).await;

    // THEN: Timeout reported well before the child would have finished
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(outcome.error_kind(), Some(ErrorKind::Timeout));
    assert_eq!(outcome.output(), "Connection timeout");
}

/// **VALUE**: Verifies a missing client is reported without spawning anything.
#[tokio::test]
async fn given_missing_client_when_running_then_client_missing() {
    // GIVEN: A path that does not exist
    let dir = tempdir().unwrap();
    let runner = McrconRunner::new(dir.path().join("mcrcon"), Duration::from_secs(5));

    // WHEN
    let outcome = runner.run(&test_credentials(), &Invocation::Probe).await;

    // THEN
    assert!(!outcome.succeeded());
    assert_eq!(outcome.error_kind(), Some(ErrorKind::ClientMissing));
    assert_eq!(outcome.output(), "mcrcon not found in application directory");
}

/// **VALUE**: Verifies a file that cannot be executed is an invocation error,
/// not a missing client.
#[cfg(unix)]
#[tokio::test]
async fn given_non_executable_client_when_running_then_invocation_error() {
    // GIVEN: A client file without the execute bit
    let dir = tempdir().unwrap();
    let path = dir.path().join("mcrcon");
    std::fs::write(&path, "not a program").unwrap();
    let runner = McrconRunner::new(&path, Duration::from_secs(5));

    // WHEN
    let outcome = runner.run(&test_credentials(), &Invocation::Probe).await;

    // THEN
    assert_eq!(outcome.error_kind(), Some(ErrorKind::InvocationError));
    assert!(!outcome.output().is_empty());
}
