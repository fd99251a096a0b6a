use crate::commands::read_page;
use crate::error::CliError;

use lens_core::extractor::{Extractor, HtmlDocument};

use std::path::Path;

/// Code found on the saved page at `page`.
pub fn run(page: &Path) -> Result<String, CliError> {
    let html = read_page(page)?;
    let document = HtmlDocument::parse(&html);

    Extractor::new()
        .extract(&document)
        .map_err(|e| CliError::extraction(e.message()))
}
