use common::ErrorLocation;

use std::fmt::Display;
use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Errors reported by the command-line shell.
///
/// Core errors are flattened to their user-facing message here; the full
/// error (with its own location) is logged where it is converted.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum CliError {
    /// Error from the shell itself (arguments, files, runtime)
    #[error("Cli Error: {message} {location}")]
    Cli {
        message: String,
        location: ErrorLocation,
    },

    /// Config could not be located, loaded or validated
    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },

    /// Credential storage failed
    #[error("Credential Error: {message} {location}")]
    Credential {
        message: String,
        location: ErrorLocation,
    },

    /// No code could be extracted from the page
    #[error("Extraction Error: {message} {location}")]
    Extraction {
        message: String,
        location: ErrorLocation,
    },

    /// The analysis cycle failed
    #[error("Analysis Error: {message} {location}")]
    Analysis {
        message: String,
        location: ErrorLocation,
    },
}

impl CliError {
    #[track_caller]
    pub fn cli(message: impl Display) -> Self {
        CliError::Cli {
            message: message.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn config(message: impl Display) -> Self {
        CliError::Config {
            message: message.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn credential(message: impl Display) -> Self {
        CliError::Credential {
            message: message.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn extraction(message: impl Display) -> Self {
        CliError::Extraction {
            message: message.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn analysis(message: impl Display) -> Self {
        CliError::Analysis {
            message: message.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Message printed to the terminal, without the source location.
    pub fn message(&self) -> &str {
        match self {
            CliError::Cli { message, .. }
            | CliError::Config { message, .. }
            | CliError::Credential { message, .. }
            | CliError::Extraction { message, .. }
            | CliError::Analysis { message, .. } => message,
        }
    }
}
