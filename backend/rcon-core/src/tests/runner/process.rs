// Unit tests for the subprocess runner's private helpers
// End-to-end runs against stand-in client scripts are in integration_tests/runner/process.rs

use crate::error::runner::RunnerError;
use crate::runner::Invocation;
use crate::runner::process::{McrconRunner, interpret, outcome_from_error};
use crate::{DEFAULT_INVOCATION_TIMEOUT, RCON_CLIENT_BINARY};

use common::ErrorLocation;
use models::{CredentialsBuilder, ErrorKind};

use std::io::{Error as IoError, ErrorKind as IoErrorKind};
use std::panic::Location;
use std::path::PathBuf;
use std::time::Duration;

/// **VALUE**: Verifies the client is called as `-H host -P port -p secret command`.
///
/// **WHY THIS MATTERS**: mcrcon parses flags positionally. A reordered or
/// missing flag turns every invocation into an authentication failure.
///
/// **BUG THIS CATCHES**: Would catch the command text being split into
/// several arguments, or the secret being passed in redacted form.
#[test]
fn given_credentials_when_build_command_called_then_passes_flags_in_order() {
    // GIVEN: A runner and credentials
    let runner = McrconRunner::new("/opt/rcon/mcrcon", Duration::from_secs(1));
    let credentials = CredentialsBuilder::default()
        .with_host("mc.example.org")
        .with_port("25575")
        .with_secret("pw")
        .build()
        .unwrap();

    // WHEN: Building the command
    let cmd = runner.build_command(&credentials, "say hello world");

    // THEN: Program and arguments match the client's CLI
    let std_cmd = cmd.as_std();
    assert_eq!(std_cmd.get_program(), "/opt/rcon/mcrcon");
    let args: Vec<_> = std_cmd
        .get_args()
        .map(|a| a.to_string_lossy().to_string())
        .collect();
    assert_eq!(
        args,
        vec!["-H", "mc.example.org", "-P", "25575", "-p", "pw", "say hello world"]
    );
}

/// **VALUE**: Verifies the default runner looks for the client in the working directory.
#[test]
fn given_default_runner_when_inspected_then_uses_local_client_and_default_timeout() {
    let runner = McrconRunner::default();

    assert_eq!(runner.client_path(), PathBuf::from(".").join(RCON_CLIENT_BINARY));
    assert_eq!(runner.timeout(), DEFAULT_INVOCATION_TIMEOUT);
}

/// **VALUE**: Verifies exit 0 yields trimmed stdout, or the placeholder for the call site.
///
/// **WHY THIS MATTERS**: Many RCON commands print nothing. Without the
/// placeholder the log line would read just "✓".
#[test]
fn given_successful_exit_when_interpreted_then_uses_stdout_or_placeholder() {
    // GIVEN / WHEN: Successful exits with and without output
    let with_output = interpret(
        &Invocation::Command("list".into()),
        true,
        b"  There are 2 of a max of 20 players online\n",
        b"",
    );
    let probe_silent = interpret(&Invocation::Probe, true, b"\n", b"");
    let command_silent = interpret(&Invocation::Command("time set day".into()), true, b"", b"");

    // THEN: Output or call-site placeholder
    assert!(with_output.succeeded());
    assert_eq!(with_output.output(), "There are 2 of a max of 20 players online");
    assert_eq!(probe_silent.output(), "Connected to server successfully");
    assert_eq!(command_silent.output(), "Command executed");
}

/// **VALUE**: Verifies non-zero exit yields classified stderr, or the placeholder.
///
/// **BUG THIS CATCHES**: Would catch stdout being reported instead of stderr
/// on failure, or the placeholders being swapped between call sites.
#[test]
fn given_failed_exit_when_interpreted_then_classifies_stderr() {
    // GIVEN / WHEN: Failed exits
    let refused = interpret(&Invocation::Probe, false, b"ignored", b"Connection refused\n");
    let probe_silent = interpret(&Invocation::Probe, false, b"", b"  ");
    let command_silent = interpret(&Invocation::Command("op bob".into()), false, b"", b"");

    // THEN: Classified failure with message
    assert!(!refused.succeeded());
    assert_eq!(refused.output(), "Connection refused");
    assert_eq!(refused.error_kind(), Some(ErrorKind::ConnectionRefused));
    assert_eq!(probe_silent.output(), "Connection failed");
    assert_eq!(probe_silent.error_kind(), Some(ErrorKind::Unclassified));
    assert_eq!(command_silent.output(), "Unknown error");
}

/// **VALUE**: Verifies runner errors fold into the right outcome kinds.
///
/// **WHY THIS MATTERS**: A missing client must stay distinguishable from a
/// connection failure so the operator knows to install the client.
#[test]
fn given_runner_errors_when_folded_then_maps_to_outcome_kinds() {
    // GIVEN: One error of each kind
    let missing = RunnerError::ClientMissing {
        message: "mcrcon not found in application directory".to_string(),
        path: PathBuf::from("./mcrcon"),
        location: ErrorLocation::from(Location::caller()),
    };
    let timeout = RunnerError::Timeout {
        message: "mcrcon did not finish".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };
    let spawn = RunnerError::Spawn {
        message: "Failed to run".to_string(),
        location: ErrorLocation::from(Location::caller()),
        source: IoError::new(IoErrorKind::PermissionDenied, "permission denied"),
    };

    // WHEN: Folding
    let missing = outcome_from_error(missing);
    let timeout = outcome_from_error(timeout);
    let spawn = outcome_from_error(spawn);

    // THEN: Kinds and messages
    assert_eq!(missing.error_kind(), Some(ErrorKind::ClientMissing));
    assert!(missing.output().contains("not found"));
    assert_eq!(timeout.error_kind(), Some(ErrorKind::Timeout));
    assert_eq!(timeout.output(), "Connection timeout");
    assert_eq!(spawn.error_kind(), Some(ErrorKind::InvocationError));
    assert_eq!(spawn.output(), "permission denied");
}
