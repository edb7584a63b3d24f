use crate::error::config::ConfigError;

use common::ErrorLocation;
use models::ModelError;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Local rejections raised before anything reaches the protocol client.
#[derive(Debug, ThisError)]
pub enum SessionError {
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Not Configured Error: {message} {location}")]
    NotConfigured {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<ModelError> for SessionError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        match error {
            ModelError::Validation { message, .. } => SessionError::Validation {
                message,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}
