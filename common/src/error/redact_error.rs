use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// A secret reached a serializer instead of being exposed explicitly.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Secret Leak Error: {message} {location}")]
    SerializeRefused {
        message: String,
        location: ErrorLocation,
    },
}
