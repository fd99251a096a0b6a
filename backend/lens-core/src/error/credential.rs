use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

/// Storage-layer failures of the credential store.
///
/// A missing key is not an error; stores return `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Storage Read Error: {path}: {source} {location}")]
    ReadError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage Parse Error: {path}: {reason} {location}")]
    ParseError {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Storage Write Error: {path}: {source} {location}")]
    WriteError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage Serialization Error: {reason} {location}")]
    SerializeError {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Storage Unavailable Error: {reason} {location}")]
    Unavailable {
        location: ErrorLocation,
        reason: String,
    },
}

impl CredentialError {
    /// Message shown to the user, without the source location.
    pub fn message(&self) -> String {
        match self {
            CredentialError::ReadError { path, source, .. } => {
                format!("{}: {}", path.display(), source)
            }
            CredentialError::ParseError { path, reason, .. } => {
                format!("{}: {}", path.display(), reason)
            }
            CredentialError::WriteError { path, source, .. } => {
                format!("{}: {}", path.display(), source)
            }
            CredentialError::SerializeError { reason, .. } => reason.clone(),
            CredentialError::Unavailable { reason, .. } => reason.clone(),
        }
    }
}
