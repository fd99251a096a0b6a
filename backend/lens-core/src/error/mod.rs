pub mod analysis;
pub mod config;
pub mod credential;
pub mod extract;
pub mod messaging;
pub mod presenter;

pub use analysis::AnalysisError;
pub use credential::CredentialError;
pub use extract::ExtractError;
pub use messaging::MessagingError;
pub use presenter::PopupError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Extract(#[from] extract::ExtractError),

    #[error(transparent)]
    Analysis(#[from] analysis::AnalysisError),

    #[error(transparent)]
    Messaging(#[from] messaging::MessagingError),

    #[error(transparent)]
    Credential(#[from] credential::CredentialError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Popup(#[from] presenter::PopupError),
}
