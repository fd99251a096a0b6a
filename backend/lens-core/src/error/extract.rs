use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

const NO_CODE_ELEMENT_MESSAGE: &str = "Could not find the code element on the page. Make sure the code editor or submission code is visible.";
const EMPTY_TEXT_MESSAGE: &str = "Found code container, but failed to extract text content.";

/// Failures raised while locating code in a page.
#[derive(Debug, ThisError)]
pub enum ExtractError {
    #[error("No Code Element Error: {message} {location}")]
    NoCodeElement {
        message: String,
        location: ErrorLocation,
    },

    #[error("Empty Text Error: {message} {location}")]
    EmptyText {
        message: String,
        location: ErrorLocation,
    },

    /// A single pattern failed to evaluate. Logged and skipped by the search.
    #[error("Selector Error: '{selector}': {message} {location}")]
    Selector {
        selector: String,
        message: String,
        location: ErrorLocation,
    },
}

impl ExtractError {
    #[track_caller]
    pub fn no_code_element() -> Self {
        ExtractError::NoCodeElement {
            message: NO_CODE_ELEMENT_MESSAGE.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn empty_text() -> Self {
        ExtractError::EmptyText {
            message: EMPTY_TEXT_MESSAGE.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        ExtractError::Selector {
            selector: selector.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Message shown to the user, without the source location.
    pub fn message(&self) -> &str {
        match self {
            ExtractError::NoCodeElement { message, .. } => message,
            ExtractError::EmptyText { message, .. } => message,
            ExtractError::Selector { message, .. } => message,
        }
    }
}
