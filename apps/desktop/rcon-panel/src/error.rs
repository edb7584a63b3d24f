use rcon_core::error::CoreError;

use common::ErrorLocation;

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the terminal front end.
///
/// Core errors are flattened to their message so the enum stays
/// serializable for structured log sinks.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum PanelError {
    /// Error from this App
    #[error("Panel Error: {message} {location}")]
    Panel {
        message: String,
        location: ErrorLocation,
    },

    /// Invalid environment or `.env` setting
    #[error("Settings Error: {message} {location}")]
    Settings {
        message: String,
        location: ErrorLocation,
    },

    /// Error from rcon-core operations (config store, session)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },
}

impl From<CoreError> for PanelError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        PanelError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
