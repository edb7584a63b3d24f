use crate::helpers::{StubRunner, session_in};

use rcon_panel::commands::{Flow, HELP_TEXT, PanelCommand};
use rcon_panel::error::PanelError;

use rcon_core::session::SessionManager;

use models::ConnectionStatus;

use std::time::Duration;

use tempfile::tempdir;

/// Wait for dispatched invocations to finish.
async fn settle(session: &SessionManager<StubRunner>) {
    for _ in 0..200 {
        if session.in_flight() == 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("invocations still running");
}

// ============================================================================
// Integration tests for line commands driving a real session
// ============================================================================

/// **VALUE**: Verifies a plain line is executed on the server and the status follows.
#[tokio::test]
async fn given_plain_line_when_executed_then_runs_on_server() {
    // GIVEN
    let dir = tempdir().unwrap();
    let (session, runner) = session_in(dir.path(), true);

    // WHEN
    let flow = PanelCommand::parse("time set day").unwrap().execute(&session).unwrap();
    settle(&session).await;

    // THEN
    assert_eq!(flow, Flow::Continue);
    assert_eq!(runner.commands(), vec!["time set day"]);
    assert_eq!(session.status(), ConnectionStatus::Connected);
}

/// **VALUE**: Verifies `/say` and `/quick` reach the server as `say` and preset text.
#[tokio::test]
async fn given_say_and_quick_when_executed_then_expected_commands_sent() {
    // GIVEN
    let dir = tempdir().unwrap();
    let (session, runner) = session_in(dir.path(), true);

    // WHEN
    PanelCommand::parse("/say hello").unwrap().execute(&session).unwrap();
    settle(&session).await;
    PanelCommand::parse("/quick rain").unwrap().execute(&session).unwrap();
    settle(&session).await;

    // THEN
    assert_eq!(runner.commands(), vec!["say hello", "weather rain"]);
}

/// **VALUE**: Verifies session rejections are not surfaced as panel errors.
///
/// **WHY THIS MATTERS**: The session already logged a warning. Returning an
/// error too would print the same problem twice.
#[tokio::test]
async fn given_unconfigured_session_when_testing_then_continue_with_warning() {
    // GIVEN
    let dir = tempdir().unwrap();
    let (session, runner) = session_in(dir.path(), false);

    // WHEN
    let flow = PanelCommand::Test.execute(&session).unwrap();

    // THEN
    assert_eq!(flow, Flow::Continue);
    assert!(runner.commands().is_empty());
    assert_eq!(session.log_snapshot()[0].text, "⚠ Configuration not set");
}

/// **VALUE**: Verifies `/config` saves, then the new server is probed.
#[tokio::test]
async fn given_config_command_when_executed_then_saved_and_probed() {
    // GIVEN
    let dir = tempdir().unwrap();
    let (session, runner) = session_in(dir.path(), false);

    // WHEN
    PanelCommand::parse("/config play.example.net 25580 hunter2")
        .unwrap()
        .execute(&session)
        .unwrap();
    settle(&session).await;

    // THEN
    assert!(session.is_configured());
    assert_eq!(session.credentials().host, "play.example.net");
    assert_eq!(runner.commands(), vec!["list"]);
    assert!(dir.path().join("config.json").exists());
}

/// **VALUE**: Verifies a failed save surfaces as `PanelError::Core`.
#[tokio::test]
async fn given_unwritable_config_when_configuring_then_core_error() {
    // GIVEN: A config path below a regular file
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let (session, _runner) = session_in(&blocker, false);

    // WHEN
    let result = PanelCommand::parse("/config play.example.net 25580 hunter2")
        .unwrap()
        .execute(&session);

    // THEN
    assert!(matches!(result, Err(PanelError::Core { .. })));
}

/// **VALUE**: Verifies local commands answer without touching the server.
#[tokio::test]
async fn given_local_commands_when_executed_then_printed_or_quit() {
    // GIVEN
    let dir = tempdir().unwrap();
    let (session, runner) = session_in(dir.path(), true);

    // WHEN / THEN
    assert_eq!(
        PanelCommand::Help.execute(&session).unwrap(),
        Flow::Print(HELP_TEXT.to_string())
    );
    assert_eq!(
        PanelCommand::Status.execute(&session).unwrap(),
        Flow::Print("Status: Unknown (mc.example.org:25575)".to_string())
    );
    assert_eq!(PanelCommand::Quit.execute(&session).unwrap(), Flow::Quit);
    assert!(matches!(
        PanelCommand::parse("/fly").unwrap().execute(&session).unwrap(),
        Flow::Print(text) if text.contains("/fly")
    ));
    assert!(runner.commands().is_empty());
}

/// **VALUE**: Verifies `/clear` leaves only the cleared marker.
#[tokio::test]
async fn given_clear_command_when_executed_then_log_reset() {
    // GIVEN
    let dir = tempdir().unwrap();
    let (session, _runner) = session_in(dir.path(), false);
    PanelCommand::Test.execute(&session).unwrap();

    // WHEN
    PanelCommand::Clear.execute(&session).unwrap();

    // THEN
    let log = session.log_snapshot();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].text, "Console cleared");
}
