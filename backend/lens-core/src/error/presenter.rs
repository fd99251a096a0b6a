use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

const NO_ACTIVE_TAB_MESSAGE: &str = "Could not get active tab information.";
const MISSING_TAB_ID_MESSAGE: &str = "Active tab has no ID.";
const UNSUPPORTED_PAGE_MESSAGE: &str = "Analysis only works on LeetCode problem or submission pages.";
const BUSY_MESSAGE: &str = "An analysis is already in progress.";

/// Terminal failures of one popup analysis cycle.
///
/// Every variant carries the exact text the result panel shows after "Failed: ".
#[derive(Debug, ThisError)]
pub enum PopupError {
    #[error("Tab Error: {message} {location}")]
    Tab {
        message: String,
        location: ErrorLocation,
    },

    #[error("Scope Error: {message} ({url}) {location}")]
    Scope {
        url: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Extraction Error: {message} {location}")]
    Extraction {
        message: String,
        location: ErrorLocation,
    },

    #[error("Analysis Error: {message} {location}")]
    Analysis {
        message: String,
        location: ErrorLocation,
    },

    #[error("Busy Error: {message} {location}")]
    Busy {
        message: String,
        location: ErrorLocation,
    },
}

impl PopupError {
    #[track_caller]
    pub fn no_active_tab() -> Self {
        PopupError::Tab {
            message: NO_ACTIVE_TAB_MESSAGE.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_tab_id() -> Self {
        PopupError::Tab {
            message: MISSING_TAB_ID_MESSAGE.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unsupported_page(url: impl Into<String>) -> Self {
        PopupError::Scope {
            url: url.into(),
            message: UNSUPPORTED_PAGE_MESSAGE.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn extraction(message: impl Into<String>) -> Self {
        PopupError::Extraction {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn analysis(message: impl Into<String>) -> Self {
        PopupError::Analysis {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn busy() -> Self {
        PopupError::Busy {
            message: BUSY_MESSAGE.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Message shown to the user, without the source location.
    pub fn message(&self) -> &str {
        match self {
            PopupError::Tab { message, .. }
            | PopupError::Scope { message, .. }
            | PopupError::Extraction { message, .. }
            | PopupError::Analysis { message, .. }
            | PopupError::Busy { message, .. } => message,
        }
    }
}
