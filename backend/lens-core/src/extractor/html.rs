//! [`DocumentView`] over a static HTML snapshot.
//!
//! A snapshot has no layout, so "rendered" is approximated: an element is
//! considered hidden when it or an ancestor has the `hidden` attribute or an
//! inline `display: none` style.

use crate::error::ExtractError;
use crate::extractor::document::{DocumentView, ElementView};

use scraper::{ElementRef, Html, Selector};

/// Parsed page snapshot.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }
}

impl DocumentView for HtmlDocument {
    fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn ElementView + '_>>, ExtractError> {
        let parsed =
            Selector::parse(selector).map_err(|e| ExtractError::selector(selector, e.to_string()))?;

        Ok(self
            .html
            .select(&parsed)
            .map(|element| Box::new(HtmlElement { element }) as Box<dyn ElementView + '_>)
            .collect())
    }
}

struct HtmlElement<'a> {
    element: ElementRef<'a>,
}

impl<'a> HtmlElement<'a> {
    fn self_and_ancestors(&self) -> impl Iterator<Item = ElementRef<'a>> {
        std::iter::once(self.element).chain(self.element.ancestors().filter_map(ElementRef::wrap))
    }

    fn strict_descendants(&self) -> impl Iterator<Item = ElementRef<'a>> {
        self.element.descendants().skip(1).filter_map(ElementRef::wrap)
    }
}

fn carries_class(element: &ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|candidate| candidate == class)
}

fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

fn is_hidden(element: &ElementRef<'_>) -> bool {
    let value = element.value();
    if value.attr("hidden").is_some() {
        return true;
    }

    value.attr("style").is_some_and(|style| {
        let compact: String = style.chars().filter(|c| !c.is_whitespace()).collect();
        compact.to_ascii_lowercase().contains("display:none")
    })
}

impl ElementView for HtmlElement<'_> {
    fn tag_name(&self) -> String {
        self.element.value().name().to_ascii_lowercase()
    }

    fn has_class(&self, class: &str) -> bool {
        carries_class(&self.element, class)
    }

    fn closest_has_class(&self, class: &str) -> bool {
        self.self_and_ancestors().any(|element| carries_class(&element, class))
    }

    fn closest_has_attribute(&self, attribute: &str) -> bool {
        self.self_and_ancestors()
            .any(|element| element.value().attr(attribute).is_some())
    }

    fn descendant_texts_by_class(&self, class: &str) -> Vec<String> {
        self.strict_descendants()
            .filter(|element| carries_class(element, class))
            .map(|element| text_of(&element))
            .collect()
    }

    fn first_descendant_text_by_tag(&self, tag: &str) -> Option<String> {
        self.strict_descendants()
            .find(|element| element.value().name().eq_ignore_ascii_case(tag))
            .map(|element| text_of(&element))
    }

    fn text_content(&self) -> String {
        text_of(&self.element)
    }

    fn is_rendered(&self) -> bool {
        !self.self_and_ancestors().any(|element| is_hidden(&element))
    }
}
