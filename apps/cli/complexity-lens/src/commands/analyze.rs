use crate::commands::{Session, read_page};
use crate::error::CliError;

use lens_core::error::PopupError;
use lens_core::extractor::{Extractor, HtmlDocument};
use lens_core::messaging::{BrowserTabs, Tab, spawn_page_context};
use lens_core::presenter::Renderer;

use std::path::Path;
use std::sync::Arc;

use log::info;

/// Tab id given to the saved page.
const PAGE_TAB_ID: u32 = 1;

/// Run one analysis cycle against the saved page at `page`, as if it were
/// open at `url`.
///
/// Progress and the result are drawn through `renderer`; the analysis text
/// is also returned.
pub async fn run(
    session: &Session,
    page: &Path,
    url: &str,
    renderer: Arc<dyn Renderer>,
) -> Result<String, CliError> {
    let html = read_page(page)?;
    let page_context = spawn_page_context(move || HtmlDocument::parse(&html), Extractor::new());

    let mut tabs = BrowserTabs::new();
    tabs.open(Tab::new(PAGE_TAB_ID, url), Some(page_context));

    let popup = session.popup(tabs, renderer)?;
    popup.open().await;

    info!("Analyzing {}", url);
    popup.analyze().await.map_err(|e| match e {
        PopupError::Extraction { message, .. } => CliError::extraction(message),
        other => CliError::analysis(other.message()),
    })
}
