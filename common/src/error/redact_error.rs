use crate::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Raised when a secret is handed to a serializer instead of being read out
/// explicitly.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Secret Serialization Error: {message} {location}")]
    SecretSerialization {
        message: String,
        location: ErrorLocation,
    },
}

impl RedactError {
    /// The secret named `type_name` refused to serialize itself.
    #[track_caller]
    pub fn refused(type_name: &str) -> Self {
        RedactError::SecretSerialization {
            message: format!("{type_name} cannot be serialized; read it with as_str()"),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            RedactError::SecretSerialization { message, .. } => message,
        }
    }
}
