//! Error types for the coordinator's analysis request.
//!
//! - HTTP status codes stored directly (not parsed from strings)
//! - Remote diagnostic payloads travel with the error as `details`
//! - All errors include ErrorLocation, captured with `#[track_caller]`

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use serde_json::Value;
use thiserror::Error as ThisError;

const CREDENTIAL_MISSING_MESSAGE: &str = "Gemini API key not set. Please set it in the extension popup.";
const NO_CODE_MESSAGE: &str = "No code provided in the request.";
const UNPARSEABLE_MESSAGE: &str = "Could not parse analysis from Gemini response.";

/// Errors that terminate an analysis request.
#[derive(Debug, ThisError)]
pub enum AnalysisError {
    #[error("Credential Missing Error: {message} {location}")]
    CredentialMissing {
        message: String,
        location: ErrorLocation,
    },

    #[error("Credential Error: {message} {location}")]
    Credential {
        message: String,
        location: ErrorLocation,
    },

    #[error("No Code Error: {message} {location}")]
    NoCode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Endpoint Error: {message} {location}")]
    Endpoint {
        message: String,
        location: ErrorLocation,
    },

    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("API Error: HTTP {status_code} - {message} {location}")]
    Api {
        message: String,
        status_code: HttpStatusCode,
        details: Option<Value>,
        location: ErrorLocation,
    },

    #[error("Incomplete Error: {message} {location}")]
    Incomplete {
        reason: String,
        message: String,
        details: Option<Value>,
        location: ErrorLocation,
    },

    #[error("Blocked Error: {message} {location}")]
    Blocked {
        reason: String,
        message: String,
        details: Option<Value>,
        location: ErrorLocation,
    },

    #[error("Unparseable Error: {message} {location}")]
    Unparseable {
        message: String,
        details: Option<Value>,
        location: ErrorLocation,
    },
}

impl AnalysisError {
    #[track_caller]
    pub fn credential_missing() -> Self {
        AnalysisError::CredentialMissing {
            message: CREDENTIAL_MISSING_MESSAGE.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn credential(message: impl Into<String>) -> Self {
        AnalysisError::Credential {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn no_code() -> Self {
        AnalysisError::NoCode {
            message: NO_CODE_MESSAGE.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn endpoint(message: impl Into<String>) -> Self {
        AnalysisError::Endpoint {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Transport-level failure, or a body that is not JSON.
    #[track_caller]
    pub fn network(message: impl std::fmt::Display) -> Self {
        AnalysisError::Network {
            message: format!("Network or fetch error: {message}"),
            is_timeout: false,
            is_connection: false,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from reqwest error, keeping timeout/connect classification.
    #[track_caller]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        AnalysisError::Network {
            message: format!("Network or fetch error: {error}"),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Non-2xx answer. `body` is the parsed error payload when there was one.
    #[track_caller]
    pub fn api(status_code: u16, reason: Option<&str>, body: Option<Value>) -> Self {
        let remote_message = body
            .as_ref()
            .and_then(|value| value.pointer("/error/message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP Error {}: {}", status_code, reason.unwrap_or("")));

        AnalysisError::Api {
            message: format!("Gemini API Error: {remote_message}"),
            status_code: HttpStatusCode(status_code),
            details: body,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Generation stopped without content (e.g. `SAFETY`).
    #[track_caller]
    pub fn incomplete(reason: impl Into<String>, safety_ratings: Option<&Value>, details: Value) -> Self {
        let reason = reason.into();
        let mut message = format!("Analysis could not be generated. Reason: {reason}.");
        if reason == "SAFETY" {
            if let Some(ratings) = safety_ratings {
                message.push_str(&format!(" Safety concerns: {ratings}"));
            }
        }

        AnalysisError::Incomplete {
            reason,
            message,
            details: Some(details),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn blocked(reason: impl Into<String>, details: Value) -> Self {
        let reason = reason.into();
        AnalysisError::Blocked {
            message: format!("Prompt was blocked by Gemini. Reason: {reason}"),
            reason,
            details: Some(details),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unparseable(details: Value) -> Self {
        AnalysisError::Unparseable {
            message: UNPARSEABLE_MESSAGE.to_string(),
            details: Some(details),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Message shown to the user, without the source location.
    pub fn message(&self) -> &str {
        match self {
            AnalysisError::CredentialMissing { message, .. }
            | AnalysisError::Credential { message, .. }
            | AnalysisError::NoCode { message, .. }
            | AnalysisError::Endpoint { message, .. }
            | AnalysisError::Network { message, .. }
            | AnalysisError::Api { message, .. }
            | AnalysisError::Incomplete { message, .. }
            | AnalysisError::Blocked { message, .. }
            | AnalysisError::Unparseable { message, .. } => message,
        }
    }

    /// Diagnostic payload from the remote service, if any.
    pub fn details(&self) -> Option<&Value> {
        match self {
            AnalysisError::Api { details, .. }
            | AnalysisError::Incomplete { details, .. }
            | AnalysisError::Blocked { details, .. }
            | AnalysisError::Unparseable { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    /// Get error category for logs.
    pub fn error_category(&self) -> &'static str {
        match self {
            AnalysisError::CredentialMissing { .. } => "credential_missing",
            AnalysisError::Credential { .. } => "credential_storage",
            AnalysisError::NoCode { .. } => "no_code",
            AnalysisError::Endpoint { .. } => "endpoint",
            AnalysisError::Network { is_timeout: true, .. } => "timeout",
            AnalysisError::Network { is_connection: true, .. } => "connection",
            AnalysisError::Network { .. } => "network",
            AnalysisError::Api { status_code, .. } if status_code.is_auth_failure() => "auth",
            AnalysisError::Api { status_code, .. } if status_code.is_client_error() => "client_error",
            AnalysisError::Api { status_code, .. } if status_code.is_server_error() => "server_error",
            AnalysisError::Api { .. } => "api",
            AnalysisError::Incomplete { .. } => "incomplete",
            AnalysisError::Blocked { .. } => "blocked",
            AnalysisError::Unparseable { .. } => "unparseable",
        }
    }

    /// Get HTTP status code if applicable.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AnalysisError::Api { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }
}
