//! Operator line commands.
//!
//! Lines starting with `/` are panel commands; anything else is sent to the
//! server as a free-form RCON command.

use crate::error::PanelError;

use rcon_core::error::CoreError;
use rcon_core::error::session::SessionError;
use rcon_core::runner::CommandRunner;
use rcon_core::session::{QuickCommand, SessionManager};

use log::debug;

pub const HELP_TEXT: &str = "\
Commands:
  /test                             test the connection
  /refresh                          re-test the connection
  /say <text>                       broadcast a message to all players
  /quick <day|night|clear|rain|list> run a preset command
  /config <host> <port> <password>  save new connection settings
  /clear                            clear the console
  /status                           show connection status
  /help                             show this help
  /quit                             exit
Any other line is sent to the server as an RCON command.";

const QUICK_USAGE: &str = "Usage: /quick <day|night|clear|rain|list>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    Test,
    Refresh,
    Say(String),
    Quick(QuickCommand),
    Config {
        host: String,
        port: String,
        secret: String,
    },
    Clear,
    Status,
    Help,
    Quit,
    /// Free-form RCON command.
    Run(String),
    /// A panel command that was recognised but malformed.
    Usage(&'static str),
    Unknown(String),
}

/// What the input loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Print(String),
    Quit,
}

impl PanelCommand {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let Some(rest) = line.strip_prefix('/') else {
            return Some(PanelCommand::Run(line.to_string()));
        };

        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "test" => PanelCommand::Test,
            "refresh" => PanelCommand::Refresh,
            "say" => PanelCommand::Say(args.to_string()),
            "quick" => QuickCommand::from_name(args)
                .map(PanelCommand::Quick)
                .unwrap_or(PanelCommand::Usage(QUICK_USAGE)),
            "config" => parse_config(args),
            "clear" => PanelCommand::Clear,
            "status" => PanelCommand::Status,
            "help" | "?" => PanelCommand::Help,
            "quit" | "exit" => PanelCommand::Quit,
            _ => PanelCommand::Unknown(name.to_string()),
        };

        Some(command)
    }

    /// Hand the command to the session.
    ///
    /// Rejections the session already reported on the console (blank input,
    /// missing configuration) are not errors here. A failed save is.
    pub fn execute<R: CommandRunner>(self, session: &SessionManager<R>) -> Result<Flow, PanelError> {
        let result = match self {
            PanelCommand::Test => session.test_connection(),
            PanelCommand::Refresh => session.refresh(),
            PanelCommand::Say(text) => session.send_message(&text),
            PanelCommand::Quick(quick) => session.quick_command(quick),
            PanelCommand::Config { host, port, secret } => session.reconfigure(&host, &port, &secret),
            PanelCommand::Run(command) => session.execute_command(&command),
            PanelCommand::Clear => {
                session.clear_log();
                return Ok(Flow::Continue);
            }
            PanelCommand::Status => return Ok(Flow::Print(status_line(session))),
            PanelCommand::Help => return Ok(Flow::Print(HELP_TEXT.to_string())),
            PanelCommand::Usage(usage) => return Ok(Flow::Print(usage.to_string())),
            PanelCommand::Unknown(name) => {
                return Ok(Flow::Print(format!("Unknown command '/{name}', try /help")));
            }
            PanelCommand::Quit => return Ok(Flow::Quit),
        };

        match result {
            Ok(_pending) => Ok(Flow::Continue),
            Err(SessionError::Config(e)) => Err(PanelError::from(CoreError::from(e))),
            Err(e) => {
                debug!("Command rejected: {e}");
                Ok(Flow::Continue)
            }
        }
    }
}

/// `/config <host> <port> <password...>`; missing parts stay empty so the
/// session reports them.
fn parse_config(args: &str) -> PanelCommand {
    let (host, rest) = next_word(args);
    let (port, secret) = next_word(rest);

    PanelCommand::Config {
        host: host.to_string(),
        port: port.to_string(),
        secret: secret.to_string(),
    }
}

fn next_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}

pub fn status_line<R: CommandRunner>(session: &SessionManager<R>) -> String {
    if !session.is_configured() {
        return format!("Status: {} (not configured)", session.status());
    }

    let credentials = session.credentials();
    let mut line = format!("Status: {} ({})", session.status(), credentials.endpoint());

    let in_flight = session.in_flight();
    if in_flight > 0 {
        line.push_str(&format!(", {in_flight} running"));
    }
    if session.is_refreshing() {
        line.push_str(", refreshing");
    }

    line
}
