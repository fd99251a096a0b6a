use crate::cli::KeyAction;
use crate::commands::Session;
use crate::error::CliError;

use lens_core::credential::CredentialStore;
use lens_core::messaging::BrowserTabs;
use lens_core::presenter::NullRenderer;

use std::sync::Arc;

/// Apply `action` to the stored key and return the line to print.
///
/// `set` and `clear` go through the popup's save flow, so input is trimmed
/// and blank input clears the key.
pub async fn run(session: &Session, action: &KeyAction) -> Result<String, CliError> {
    let input = match action {
        KeyAction::Show => return show(session).await,
        KeyAction::Set { key } => key.as_str(),
        KeyAction::Clear => "",
    };

    let popup = session.popup(BrowserTabs::new(), Arc::new(NullRenderer))?;
    popup.set_api_key_input(input).await;
    popup
        .save_api_key()
        .await
        .map_err(|e| CliError::credential(e.message()))?;

    Ok(popup
        .surface()
        .await
        .api_key_status
        .map(|status| status.message)
        .unwrap_or_default())
}

async fn show(session: &Session) -> Result<String, CliError> {
    let stored = session
        .credentials()
        .get()
        .await
        .map_err(|e| CliError::credential(e.message()))?;

    Ok(match stored {
        Some(key) => format!("API Key is set ({} characters).", key.len()),
        None => String::from("API Key not set. Analysis will fail."),
    })
}
