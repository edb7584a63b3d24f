use serde::Serialize;

use std::fmt;

/// Why an invocation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// The protocol client binary is not where it is expected.
    ClientMissing,
    ConnectionRefused,
    Timeout,
    AuthFailure,
    /// The client could not be started or its output could not be read.
    InvocationError,
    Unclassified,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::ClientMissing => "client missing",
            ErrorKind::ConnectionRefused => "connection refused",
            ErrorKind::Timeout => "timeout",
            ErrorKind::AuthFailure => "authentication failure",
            ErrorKind::InvocationError => "invocation error",
            ErrorKind::Unclassified => "unclassified",
        };
        f.write_str(label)
    }
}

/// Result of a single protocol invocation.
///
/// `error_kind` is present exactly when the invocation failed; the
/// constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    succeeded: bool,
    output: String,
    error_kind: Option<ErrorKind>,
}

impl CommandOutcome {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            output: output.into(),
            error_kind: None,
        }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            output: message.into(),
            error_kind: Some(kind),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Success payload, or the failure message.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }
}
