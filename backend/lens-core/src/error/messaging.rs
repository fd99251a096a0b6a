use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Failures of the host messaging substrate itself, as opposed to errors
/// carried inside a reply.
#[derive(Debug, ThisError)]
pub enum MessagingError {
    /// Nothing is listening on the target context.
    #[error("Unreachable Error: {context}: {message} {location}")]
    Unreachable {
        context: String,
        message: String,
        location: ErrorLocation,
    },

    /// The target accepted the request but dropped it without replying.
    #[error("No Response Error: {context} {location}")]
    NoResponse {
        context: String,
        location: ErrorLocation,
    },
}

impl MessagingError {
    #[track_caller]
    pub fn unreachable(context: impl Into<String>, message: impl Into<String>) -> Self {
        MessagingError::Unreachable {
            context: context.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn no_response(context: impl Into<String>) -> Self {
        MessagingError::NoResponse {
            context: context.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Name of the context the request was addressed to.
    pub fn context(&self) -> &str {
        match self {
            MessagingError::Unreachable { context, .. } => context,
            MessagingError::NoResponse { context, .. } => context,
        }
    }
}
