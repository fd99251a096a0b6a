//! Command implementations.
//!
//! Each command gets a [`Session`]: the resolved config directory plus the
//! config loaded from it.

pub mod analyze;
pub mod extract;
pub mod key;

use crate::error::CliError;

use lens_core::config::AppConfig;
use lens_core::coordinator::Analyzer;
use lens_core::credential::FileCredentialStore;
use lens_core::messaging::{BrowserTabs, spawn_background_context};
use lens_core::presenter::{Popup, Renderer};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, error};

pub struct Session {
    config_dir: PathBuf,
    config: AppConfig,
}

impl Session {
    /// Load `config.json` from `config_dir` (defaults when absent).
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] if the file exists but is invalid.
    pub fn load(config_dir: PathBuf) -> Result<Self, CliError> {
        let config = AppConfig::load(&config_dir).map_err(|e| {
            error!("{}", e);
            CliError::config(e)
        })?;

        debug!("Using config dir {}", config_dir.display());
        Ok(Self { config_dir, config })
    }

    pub fn credentials(&self) -> FileCredentialStore {
        FileCredentialStore::new(&self.config_dir)
    }

    /// Wire a popup to `tabs` and a fresh background context.
    pub fn popup(
        &self,
        tabs: BrowserTabs,
        renderer: Arc<dyn Renderer>,
    ) -> Result<Popup<FileCredentialStore>, CliError> {
        let credentials = self.credentials();
        let analyzer = Analyzer::new(&self.config.api, credentials.clone()).map_err(|e| {
            error!("{}", e);
            CliError::config(e.message())
        })?;

        Ok(Popup::new(
            tabs,
            spawn_background_context(analyzer),
            credentials,
            self.config.ui.clone(),
        )
        .with_renderer(renderer))
    }
}

/// Read a saved page.
pub(crate) fn read_page(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path)
        .map_err(|e| CliError::cli(format!("Failed to read page {}: {}", path.display(), e)))
}
