use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Failures of the subprocess runner before an exit code is available.
///
/// Never returned to session callers: the runner folds these into a failed
/// `CommandOutcome`.
#[derive(Debug, ThisError)]
pub enum RunnerError {
    #[error("Client Missing Error: {message} {location}")]
    ClientMissing {
        message: String,
        path: PathBuf,
        location: ErrorLocation,
    },

    #[error("Spawn Error: {message} {location}")]
    Spawn {
        message: String,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Timeout Error: {message} {location}")]
    Timeout {
        message: String,
        location: ErrorLocation,
    },
}
