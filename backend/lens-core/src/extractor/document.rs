//! Read-only view of a page document.
//!
//! The extractor never touches a global document. Callers hand it something
//! implementing [`DocumentView`]: the scraper-backed [`HtmlDocument`] for page
//! snapshots, or a synthetic tree in tests.
//!
//! [`HtmlDocument`]: crate::extractor::html::HtmlDocument

use crate::error::ExtractError;

/// A document that can be queried with CSS selectors.
pub trait DocumentView {
    /// All elements matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Selector`] if the selector cannot be evaluated.
    fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn ElementView + '_>>, ExtractError>;
}

/// The element operations the extraction strategies rely on.
pub trait ElementView {
    /// Lowercase tag name (`pre`, `div`, ...).
    fn tag_name(&self) -> String;

    fn has_class(&self, class: &str) -> bool;

    /// True if this element or any ancestor carries `class`.
    fn closest_has_class(&self, class: &str) -> bool;

    /// True if this element or any ancestor carries `attribute`.
    fn closest_has_attribute(&self, attribute: &str) -> bool;

    /// Text of every descendant carrying `class`, in document order.
    fn descendant_texts_by_class(&self, class: &str) -> Vec<String>;

    /// Text of the first descendant with tag `tag`, if any.
    fn first_descendant_text_by_tag(&self, tag: &str) -> Option<String>;

    /// Concatenated text of this element's subtree.
    fn text_content(&self) -> String;

    /// False for elements that take no space on the page.
    fn is_rendered(&self) -> bool;
}
