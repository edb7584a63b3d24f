use crate::session::QuickCommand;
use crate::session::hints::hint_for;

use models::ErrorKind;

/// **VALUE**: Verifies each quick command maps to the expected RCON command.
#[test]
fn given_quick_commands_when_resolved_then_match_presets() {
    let commands: Vec<_> = QuickCommand::ALL.iter().map(|q| q.command()).collect();

    assert_eq!(
        commands,
        vec!["time set day", "time set night", "weather clear", "weather rain", "list"]
    );
}

/// **VALUE**: Verifies quick commands round-trip through their short names.
///
/// **BUG THIS CATCHES**: Would catch a name collision, e.g. "clear" resolving
/// to something other than clear weather.
#[test]
fn given_short_names_when_parsed_then_resolve_case_insensitively() {
    for quick in QuickCommand::ALL {
        assert_eq!(QuickCommand::from_name(quick.name()), Some(quick));
    }
    assert_eq!(QuickCommand::from_name(" DAY "), Some(QuickCommand::Day));
    assert_eq!(QuickCommand::from_name("snow"), None);
}

/// **VALUE**: Verifies which error kinds carry a troubleshooting hint.
///
/// **WHY THIS MATTERS**: A missing client already has a self-explanatory
/// message; adding a network tip would send the operator the wrong way.
#[test]
fn given_error_kinds_when_hint_requested_then_only_actionable_kinds_have_one() {
    assert!(hint_for(ErrorKind::ConnectionRefused).unwrap().contains("RCON is enabled"));
    assert!(hint_for(ErrorKind::Timeout).unwrap().contains("IP and port"));
    assert!(hint_for(ErrorKind::AuthFailure).unwrap().contains("password"));
    assert!(hint_for(ErrorKind::InvocationError).is_some());
    assert_eq!(hint_for(ErrorKind::ClientMissing), None);
    assert_eq!(hint_for(ErrorKind::Unclassified), None);
}
