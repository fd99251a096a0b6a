//! State of the popup's visible controls.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Info,
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    pub message: String,
    pub kind: StatusKind,
}

impl StatusLine {
    pub fn new(message: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

/// Result area: nothing, an error line, or the analysis text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum ResultPanel {
    #[default]
    Empty,
    Error(String),
    Analysis(String),
}

impl ResultPanel {
    pub fn heading(&self) -> Option<&'static str> {
        match self {
            ResultPanel::Empty => None,
            ResultPanel::Error(_) => Some("Error:"),
            ResultPanel::Analysis(_) => Some("Analysis Result:"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopupSurface {
    pub api_key_input: String,
    pub api_key_status: Option<StatusLine>,
    pub status: Option<StatusLine>,
    pub result: ResultPanel,
    pub analyze_enabled: bool,
}

impl Default for PopupSurface {
    fn default() -> Self {
        Self {
            api_key_input: String::new(),
            api_key_status: None,
            status: None,
            result: ResultPanel::Empty,
            analyze_enabled: true,
        }
    }
}

impl PopupSurface {
    /// Info means work in progress, so it disables the trigger; any other
    /// kind re-enables it.
    pub fn show_status(&mut self, message: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusLine::new(message, kind));
        self.analyze_enabled = kind != StatusKind::Info;
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn show_api_key_status(&mut self, message: impl Into<String>, kind: StatusKind) {
        self.api_key_status = Some(StatusLine::new(message, kind));
    }

    pub fn status_kind(&self) -> Option<StatusKind> {
        self.status.as_ref().map(|status| status.kind)
    }
}

/// Draws the surface. Called after every change.
pub trait Renderer: Send + Sync {
    fn render(&self, surface: &PopupSurface);
}

/// Renderer for headless use.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&self, _surface: &PopupSurface) {}
}
