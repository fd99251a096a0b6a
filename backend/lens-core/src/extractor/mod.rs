//! Page-context code extraction.
//!
//! The search walks an ordered list of selector patterns. For each pattern it
//! collects every rendered match, extracts text with the element's
//! [`CodeFamily`] strategy and keeps the longest text above
//! [`MIN_CODE_LENGTH`]. The first pattern producing such a candidate wins,
//! even when a later pattern would yield more text.
//!
//! A pattern that fails to evaluate is logged and skipped; it never aborts
//! the search.

pub mod document;
pub mod family;
pub mod html;
pub mod patterns;

pub use document::{DocumentView, ElementView};
pub use family::CodeFamily;
pub use html::HtmlDocument;
pub use patterns::{SelectorPattern, default_patterns};

use crate::error::ExtractError;

use log::{debug, info, warn};

/// Candidates must be strictly longer than this many characters.
pub const MIN_CODE_LENGTH: usize = 50;

/// Winning candidate of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeMatch {
    pub pattern: String,
    pub family: CodeFamily,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Extractor {
    patterns: Vec<SelectorPattern>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::with_patterns(default_patterns())
    }
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patterns(patterns: Vec<SelectorPattern>) -> Self {
        Self { patterns }
    }

    /// Locate the best code candidate in `document`.
    ///
    /// Returns `None` when no pattern yields a rendered element whose text
    /// exceeds [`MIN_CODE_LENGTH`].
    pub fn find_code(&self, document: &dyn DocumentView) -> Option<CodeMatch> {
        debug!("Searching {} selector patterns for code", self.patterns.len());

        for pattern in &self.patterns {
            let elements = match document.query_all(&pattern.selector) {
                Ok(elements) => elements,
                Err(e) => {
                    warn!("Error processing selector '{}': {}", pattern.label, e);
                    continue;
                }
            };

            let mut best: Option<CodeMatch> = None;
            let mut max_length = MIN_CODE_LENGTH;

            for element in elements {
                if !element.is_rendered() {
                    continue;
                }

                let family = CodeFamily::classify(element.as_ref());
                let text = family.extract(element.as_ref());
                let length = text.chars().count();

                if length > max_length {
                    max_length = length;
                    best = Some(CodeMatch {
                        pattern: pattern.label.clone(),
                        family,
                        text,
                    });
                }
            }

            if let Some(found) = best {
                info!(
                    "Found code with pattern '{}' ({:?}, {} chars)",
                    found.pattern, found.family, max_length
                );
                return Some(found);
            }
        }

        warn!("Could not find a code element on the page");
        None
    }

    /// Extract the page's code text.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::NoCodeElement`] if no pattern qualifies
    /// - [`ExtractError::EmptyText`] if the winning element has no text
    pub fn extract(&self, document: &dyn DocumentView) -> Result<String, ExtractError> {
        let Some(found) = self.find_code(document) else {
            return Err(ExtractError::no_code_element());
        };

        if found.text.is_empty() {
            return Err(ExtractError::empty_text());
        }

        Ok(found.text)
    }
}
