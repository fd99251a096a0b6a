//! Popup: drives one analysis cycle and manages the stored credential.
//!
//! A cycle moves `Idle → RequestingCode → RequestingAnalysis` and ends in
//! `Succeeded` or `Failed`. Whatever the outcome, the analyze trigger is
//! enabled again when [`Popup::analyze`] returns. While a cycle runs the
//! trigger is disabled and further calls fail with [`PopupError::Busy`].

pub mod scope;
pub mod surface;

pub use scope::{SUPPORTED_URL_PREFIXES, is_supported_url};
pub use surface::{NullRenderer, PopupSurface, Renderer, ResultPanel, StatusKind, StatusLine};

use crate::config::UiConfig;
use crate::credential::CredentialStore;
use crate::error::{CredentialError, MessagingError, PopupError};
use crate::messaging::{
    AnalysisReply, BackgroundRequest, BrowserTabs, Mailbox, PageReply, PageRequest,
};

use common::RedactedApiKey;

use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use serde_json::Value;
use tokio::sync::RwLock;

const REQUESTING_CODE_STATUS: &str = "Requesting code from page...";
const ANALYZING_STATUS: &str = "Analyzing code with Gemini...";
const COMPLETE_STATUS: &str = "Analysis complete.";
const FAILED_STATUS: &str = "Error during analysis.";
const NO_PAGE_RESPONSE: &str =
    "No response from content script. Ensure it's loaded correctly on the page.";
const NO_CODE_FOUND: &str = "No code found on the page by content script.";
const NO_BACKGROUND_RESPONSE: &str = "No response received from background script.";
const EMPTY_ANALYSIS: &str =
    "Received an unexpected or empty response from the background script.";
const KEY_NOT_SET_STATUS: &str = "API Key not set. Analysis will fail.";
const KEY_SAVED_STATUS: &str = "API Key saved!";
const KEY_CLEARED_STATUS: &str = "API Key cleared!";

/// Where the current (or last) analysis cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleState {
    #[default]
    Idle,
    RequestingCode,
    RequestingAnalysis,
    Succeeded,
    Failed,
}

pub struct Popup<S: CredentialStore> {
    tabs: BrowserTabs,
    background: Mailbox<BackgroundRequest, AnalysisReply>,
    credentials: S,
    ui: UiConfig,
    surface: Arc<RwLock<PopupSurface>>,
    cycle: Arc<RwLock<CycleState>>,
    renderer: Arc<dyn Renderer>,
}

impl<S: CredentialStore> Popup<S> {
    pub fn new(
        tabs: BrowserTabs,
        background: Mailbox<BackgroundRequest, AnalysisReply>,
        credentials: S,
        ui: UiConfig,
    ) -> Self {
        Self {
            tabs,
            background,
            credentials,
            ui,
            surface: Arc::new(RwLock::new(PopupSurface::default())),
            cycle: Arc::new(RwLock::new(CycleState::Idle)),
            renderer: Arc::new(NullRenderer),
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Snapshot of the visible controls.
    pub async fn surface(&self) -> PopupSurface {
        self.surface.read().await.clone()
    }

    pub async fn cycle_state(&self) -> CycleState {
        *self.cycle.read().await
    }

    // ============================================
    // CREDENTIAL MANAGEMENT
    // ============================================

    /// Populate the key input from storage, or warn that none is set.
    pub async fn open(&self) {
        let stored = self.credentials.get().await;

        {
            let mut surface = self.surface.write().await;
            match &stored {
                Ok(Some(key)) => {
                    surface.api_key_input = key.as_str().to_string();
                }
                Ok(None) => {
                    surface.show_api_key_status(KEY_NOT_SET_STATUS, StatusKind::Error);
                }
                Err(e) => {
                    error!("Error loading API Key: {}", e);
                    surface.show_api_key_status(
                        format!("Error loading key: {}", e.message()),
                        StatusKind::Error,
                    );
                }
            }
        }

        self.render().await;
    }

    pub async fn set_api_key_input(&self, value: impl Into<String>) {
        self.surface.write().await.api_key_input = value.into();
        self.render().await;
    }

    /// Persist the key input; blank input clears the stored key.
    ///
    /// # Errors
    ///
    /// Returns the storage failure after showing it in the key status line.
    pub async fn save_api_key(&self) -> Result<(), CredentialError> {
        let input = self.surface.read().await.api_key_input.clone();

        let (outcome, confirmation, kind, failure_prefix) = match RedactedApiKey::from_input(&input) {
            Some(key) => (
                self.credentials.set(&key).await,
                KEY_SAVED_STATUS,
                StatusKind::Success,
                "Error saving key",
            ),
            None => (
                self.credentials.remove().await,
                KEY_CLEARED_STATUS,
                StatusKind::Info,
                "Error clearing key",
            ),
        };

        match outcome {
            Ok(()) => {
                info!("{}", confirmation);
                self.surface
                    .write()
                    .await
                    .show_api_key_status(confirmation, kind);
                self.render().await;
                self.schedule_key_status_clear(confirmation);
                Ok(())
            }
            Err(e) => {
                error!("{}: {}", failure_prefix, e);
                self.surface.write().await.show_api_key_status(
                    format!("{}: {}", failure_prefix, e.message()),
                    StatusKind::Error,
                );
                self.render().await;
                Err(e)
            }
        }
    }

    // ============================================
    // ANALYSIS CYCLE
    // ============================================

    /// Run one end-to-end analysis cycle.
    ///
    /// On success the analysis text is shown verbatim; on failure the result
    /// panel shows `Failed: <reason>`.
    pub async fn analyze(&self) -> Result<String, PopupError> {
        {
            let mut surface = self.surface.write().await;
            if !surface.analyze_enabled {
                warn!("Analyze requested while a cycle is in flight");
                return Err(PopupError::busy());
            }
            surface.show_status(REQUESTING_CODE_STATUS, StatusKind::Info);
            surface.result = ResultPanel::Empty;
        }
        self.set_cycle(CycleState::RequestingCode).await;
        self.render().await;

        let outcome = self.run_cycle().await;

        {
            let mut surface = self.surface.write().await;
            match &outcome {
                Ok(analysis) => {
                    info!("Analysis successful");
                    surface.show_status(COMPLETE_STATUS, StatusKind::Success);
                    surface.result = ResultPanel::Analysis(analysis.clone());
                }
                Err(e) => {
                    error!("Popup analysis process error: {}", e);
                    surface.show_status(FAILED_STATUS, StatusKind::Error);
                    surface.result = ResultPanel::Error(format!("Failed: {}", e.message()));
                }
            }
            surface.analyze_enabled = true;
        }

        let final_state = if outcome.is_ok() {
            self.schedule_success_clear();
            CycleState::Succeeded
        } else {
            CycleState::Failed
        };
        self.set_cycle(final_state).await;
        self.render().await;

        outcome
    }

    async fn run_cycle(&self) -> Result<String, PopupError> {
        let Some(tab) = self.tabs.active_tab().cloned() else {
            return Err(PopupError::no_active_tab());
        };

        let Some(tab_id) = tab.id else {
            return Err(PopupError::missing_tab_id());
        };

        let url = tab.url.unwrap_or_default();
        if !is_supported_url(&url) {
            return Err(PopupError::unsupported_page(url));
        }

        let page_reply = self
            .tabs
            .send_to_tab(tab_id, PageRequest::GetCode)
            .await
            .map_err(|e| PopupError::extraction(describe_page_failure(&e)))?;

        let code = code_from_reply(page_reply)?;

        {
            self.surface
                .write()
                .await
                .show_status(ANALYZING_STATUS, StatusKind::Info);
        }
        self.set_cycle(CycleState::RequestingAnalysis).await;
        self.render().await;

        let analysis_reply = self
            .background
            .send(BackgroundRequest::AnalyzeCode { code })
            .await
            .map_err(|e| PopupError::analysis(describe_background_failure(&e)))?;

        analysis_from_reply(analysis_reply)
    }

    // ============================================
    // HELPERS
    // ============================================

    async fn set_cycle(&self, state: CycleState) {
        *self.cycle.write().await = state;
    }

    async fn render(&self) {
        let snapshot = self.surface.read().await.clone();
        self.renderer.render(&snapshot);
    }

    /// Clear the success banner later, unless something replaced it.
    fn schedule_success_clear(&self) {
        let surface = Arc::clone(&self.surface);
        let renderer = Arc::clone(&self.renderer);
        let delay = self.ui.success_clear_delay();

        spawn_delayed(delay, async move {
            let mut guard = surface.write().await;
            if guard.status_kind() == Some(StatusKind::Success) {
                guard.clear_status();
                renderer.render(&guard);
            }
        });
    }

    /// Clear the key status line later, if it still shows `message`.
    fn schedule_key_status_clear(&self, message: &'static str) {
        let surface = Arc::clone(&self.surface);
        let renderer = Arc::clone(&self.renderer);
        let delay = self.ui.key_status_clear_delay();

        spawn_delayed(delay, async move {
            let mut guard = surface.write().await;
            let still_shown = guard
                .api_key_status
                .as_ref()
                .is_some_and(|status| status.message == message);
            if still_shown {
                guard.api_key_status = None;
                renderer.render(&guard);
            }
        });
    }
}

fn spawn_delayed<F>(delay: Duration, task: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        task.await;
    });
}

fn describe_page_failure(error: &MessagingError) -> String {
    match error {
        MessagingError::Unreachable { message, .. } => {
            format!("Error messaging content script: {message}")
        }
        MessagingError::NoResponse { .. } => NO_PAGE_RESPONSE.to_string(),
    }
}

fn describe_background_failure(error: &MessagingError) -> String {
    match error {
        MessagingError::Unreachable { message, .. } => {
            format!("Error messaging background script: {message}")
        }
        MessagingError::NoResponse { .. } => NO_BACKGROUND_RESPONSE.to_string(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

fn code_from_reply(reply: PageReply) -> Result<String, PopupError> {
    if let Some(error) = non_empty(reply.error) {
        return Err(PopupError::extraction(error));
    }

    non_empty(reply.code).ok_or_else(|| PopupError::extraction(NO_CODE_FOUND))
}

fn analysis_from_reply(reply: AnalysisReply) -> Result<String, PopupError> {
    if let Some(error) = non_empty(reply.error) {
        return Err(PopupError::analysis(compose_error_message(
            &error,
            reply.details.as_ref(),
        )));
    }

    non_empty(reply.analysis).ok_or_else(|| PopupError::analysis(EMPTY_ANALYSIS))
}

/// Primary error plus the most useful part of the diagnostic payload.
///
/// A nested `error.message` wins, then the nested `error` object as JSON,
/// then a plain string payload.
pub fn compose_error_message(error: &str, details: Option<&Value>) -> String {
    let detail = match details {
        Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        Some(payload) => payload
            .get("error")
            .filter(|nested| !nested.is_null())
            .map(|nested| {
                nested
                    .get("message")
                    .and_then(Value::as_str)
                    .filter(|message| !message.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| nested.to_string())
            }),
        None => None,
    };

    match detail {
        Some(detail) => format!("{error}\nDetails: {detail}"),
        None => error.to_string(),
    }
}
