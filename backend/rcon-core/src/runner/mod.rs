//! Protocol command execution.
//!
//! The session never talks to the RCON server itself. It hands a command to a
//! [`CommandRunner`] and gets back a [`CommandOutcome`]; the default runner
//! shells out to the bundled `mcrcon` client.

pub mod classify;
pub mod process;

pub use classify::classify;
pub use process::McrconRunner;

use crate::PROBE_COMMAND;

use models::{CommandOutcome, Credentials};

use std::future::Future;

const PROBE_SUCCESS_PLACEHOLDER: &str = "Connected to server successfully";
const PROBE_FAILURE_PLACEHOLDER: &str = "Connection failed";
const COMMAND_SUCCESS_PLACEHOLDER: &str = "Command executed";
const COMMAND_FAILURE_PLACEHOLDER: &str = "Unknown error";

/// What to send to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Side-effect free connectivity check (`list`).
    Probe,
    /// Free-form operator command, e.g. `say hello` or `time set day`.
    Command(String),
}

impl Invocation {
    pub fn command_text(&self) -> &str {
        match self {
            Invocation::Probe => PROBE_COMMAND,
            Invocation::Command(text) => text,
        }
    }

    pub fn is_probe(&self) -> bool {
        matches!(self, Invocation::Probe)
    }

    /// Output reported when the client succeeds without printing anything.
    pub fn success_placeholder(&self) -> &'static str {
        match self {
            Invocation::Probe => PROBE_SUCCESS_PLACEHOLDER,
            Invocation::Command(_) => COMMAND_SUCCESS_PLACEHOLDER,
        }
    }

    /// Message reported when the client fails without writing to stderr.
    pub fn failure_placeholder(&self) -> &'static str {
        match self {
            Invocation::Probe => PROBE_FAILURE_PLACEHOLDER,
            Invocation::Command(_) => COMMAND_FAILURE_PLACEHOLDER,
        }
    }
}

/// Executes one command against the server described by `credentials`.
///
/// Implementations never retry and never return an error: every failure is
/// folded into a failed [`CommandOutcome`] with an [`ErrorKind`](models::ErrorKind).
pub trait CommandRunner: Send + Sync + 'static {
    fn run(
        &self,
        credentials: &Credentials,
        invocation: &Invocation,
    ) -> impl Future<Output = CommandOutcome> + Send;
}
