// Unit tests for line command parsing

use crate::commands::PanelCommand;

use rcon_core::session::QuickCommand;

/// **VALUE**: Verifies plain lines go to the server untouched apart from trimming.
#[test]
fn given_plain_line_when_parsed_then_run_command() {
    assert_eq!(
        PanelCommand::parse("  time set day  "),
        Some(PanelCommand::Run("time set day".to_string()))
    );
}

/// **VALUE**: Verifies blank input is ignored rather than sent.
#[test]
fn given_blank_line_when_parsed_then_none() {
    assert_eq!(PanelCommand::parse(""), None);
    assert_eq!(PanelCommand::parse(" \t "), None);
}

/// **VALUE**: Verifies argument-free panel commands, case-insensitively.
#[test]
fn given_simple_commands_when_parsed_then_recognised() {
    assert_eq!(PanelCommand::parse("/test"), Some(PanelCommand::Test));
    assert_eq!(PanelCommand::parse("/REFRESH"), Some(PanelCommand::Refresh));
    assert_eq!(PanelCommand::parse("/clear"), Some(PanelCommand::Clear));
    assert_eq!(PanelCommand::parse("/status"), Some(PanelCommand::Status));
    assert_eq!(PanelCommand::parse("/help"), Some(PanelCommand::Help));
    assert_eq!(PanelCommand::parse("/quit"), Some(PanelCommand::Quit));
    assert_eq!(PanelCommand::parse("/exit"), Some(PanelCommand::Quit));
}

/// **VALUE**: Verifies `/say` keeps inner spacing and allows an empty body.
///
/// **WHY THIS MATTERS**: An empty `/say` must reach the session so it can
/// log its "Please enter a message" warning.
#[test]
fn given_say_when_parsed_then_text_kept() {
    assert_eq!(
        PanelCommand::parse("/say hello   world"),
        Some(PanelCommand::Say("hello   world".to_string()))
    );
    assert_eq!(PanelCommand::parse("/say"), Some(PanelCommand::Say(String::new())));
}

/// **VALUE**: Verifies quick command names and the usage fallback.
#[test]
fn given_quick_when_parsed_then_preset_or_usage() {
    assert_eq!(
        PanelCommand::parse("/quick night"),
        Some(PanelCommand::Quick(QuickCommand::Night))
    );
    assert!(matches!(
        PanelCommand::parse("/quick snow"),
        Some(PanelCommand::Usage(_))
    ));
    assert!(matches!(PanelCommand::parse("/quick"), Some(PanelCommand::Usage(_))));
}

/// **VALUE**: Verifies `/config` splits host and port, keeping the rest as password.
///
/// **BUG THIS CATCHES**: Would catch passwords containing spaces being cut
/// at the first space.
#[test]
fn given_config_when_parsed_then_password_keeps_spaces() {
    assert_eq!(
        PanelCommand::parse("/config  mc.example.org 25575 correct horse"),
        Some(PanelCommand::Config {
            host: "mc.example.org".to_string(),
            port: "25575".to_string(),
            secret: "correct horse".to_string(),
        })
    );
}

/// **VALUE**: Verifies missing `/config` parts are left empty for the session to reject.
#[test]
fn given_partial_config_when_parsed_then_missing_parts_empty() {
    assert_eq!(
        PanelCommand::parse("/config mc.example.org"),
        Some(PanelCommand::Config {
            host: "mc.example.org".to_string(),
            port: String::new(),
            secret: String::new(),
        })
    );
}

#[test]
fn given_unknown_slash_command_when_parsed_then_unknown() {
    assert_eq!(
        PanelCommand::parse("/teleport Steve"),
        Some(PanelCommand::Unknown("teleport".to_string()))
    );
}
