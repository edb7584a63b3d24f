use crate::error::runner::RunnerError;
use crate::runner::{CommandRunner, Invocation, classify};
use crate::{DEFAULT_INVOCATION_TIMEOUT, RCON_CLIENT_BINARY};

use common::ErrorLocation;
use models::{CommandOutcome, Credentials, ErrorKind};

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use log::{debug, trace, warn};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout as TokioTimeout;

const HOST_FLAG: &str = "-H";
const PORT_FLAG: &str = "-P";
const PASSWORD_FLAG: &str = "-p";
const TIMEOUT_MESSAGE: &str = "Connection timeout";

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Runs commands through the external `mcrcon` client.
///
/// Every invocation is bounded by the same timeout; a child still running
/// at the deadline is killed.
#[derive(Debug, Clone)]
pub struct McrconRunner {
    client_path: PathBuf,
    timeout: Duration,
}

impl McrconRunner {
    pub fn new(client_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            client_path: client_path.into(),
            timeout,
        }
    }

    pub fn client_path(&self) -> &Path {
        &self.client_path
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn build_command(&self, credentials: &Credentials, command_text: &str) -> TokioCommand {
        let mut cmd = TokioCommand::new(&self.client_path);
        cmd.arg(HOST_FLAG)
            .arg(&credentials.host)
            .arg(PORT_FLAG)
            .arg(&credentials.port)
            .arg(PASSWORD_FLAG)
            .arg(credentials.secret.expose())
            .arg(command_text)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(windows)]
        cmd.creation_flags(CREATE_NO_WINDOW);

        cmd
    }

    async fn invoke(
        &self,
        credentials: &Credentials,
        invocation: &Invocation,
    ) -> Result<Output, RunnerError> {
        if !self.client_path.exists() {
            return Err(RunnerError::ClientMissing {
                message: format!("{} not found in application directory", self.client_name()),
                path: self.client_path.clone(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        debug!(
            "Invoking {} {HOST_FLAG} {} {PORT_FLAG} {} {PASSWORD_FLAG} {} {}",
            self.client_path.display(),
            credentials.host,
            credentials.port,
            credentials.secret,
            invocation.command_text()
        );

        let output = self.build_command(credentials, invocation.command_text()).output();

        match TokioTimeout(self.timeout, output).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(RunnerError::Spawn {
                message: format!("Failed to run {}: {e}", self.client_path.display()),
                location: ErrorLocation::from(Location::caller()),
                source: e,
            }),
            Err(_) => Err(RunnerError::Timeout {
                message: format!(
                    "{} did not finish within {:?}",
                    self.client_name(),
                    self.timeout
                ),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    fn client_name(&self) -> String {
        self.client_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| RCON_CLIENT_BINARY.to_string())
    }
}

impl Default for McrconRunner {
    fn default() -> Self {
        Self::new(Path::new(".").join(RCON_CLIENT_BINARY), DEFAULT_INVOCATION_TIMEOUT)
    }
}

impl CommandRunner for McrconRunner {
    async fn run(&self, credentials: &Credentials, invocation: &Invocation) -> CommandOutcome {
        match self.invoke(credentials, invocation).await {
            Ok(output) => interpret(
                invocation,
                output.status.success(),
                &output.stdout,
                &output.stderr,
            ),
            Err(e) => {
                warn!("{e}");
                outcome_from_error(e)
            }
        }
    }
}

/// Turn a finished client process into an outcome.
pub(crate) fn interpret(
    invocation: &Invocation,
    exited_ok: bool,
    stdout: &[u8],
    stderr: &[u8],
) -> CommandOutcome {
    if exited_ok {
        let output = String::from_utf8_lossy(stdout);
        let output = output.trim();
        trace!("Client stdout: {output}");

        if output.is_empty() {
            CommandOutcome::success(invocation.success_placeholder())
        } else {
            CommandOutcome::success(output)
        }
    } else {
        let message = String::from_utf8_lossy(stderr);
        let message = message.trim();
        trace!("Client stderr: {message}");

        if message.is_empty() {
            let placeholder = invocation.failure_placeholder();
            CommandOutcome::failure(classify(placeholder), placeholder)
        } else {
            CommandOutcome::failure(classify(message), message)
        }
    }
}

pub(crate) fn outcome_from_error(error: RunnerError) -> CommandOutcome {
    match error {
        RunnerError::ClientMissing { message, .. } => {
            CommandOutcome::failure(ErrorKind::ClientMissing, message)
        }
        RunnerError::Timeout { .. } => CommandOutcome::failure(ErrorKind::Timeout, TIMEOUT_MESSAGE),
        RunnerError::Spawn { source, .. } => {
            CommandOutcome::failure(ErrorKind::InvocationError, source.to_string())
        }
    }
}
