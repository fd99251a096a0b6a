//! Text extraction strategies per editor structure.
//!
//! Line-based editors render one node per source line, so their text has to
//! be rebuilt line by line. Classification walks [`CodeFamily::ORDER`] and
//! takes the first family whose matcher accepts the element.

use crate::extractor::document::ElementView;

const NON_BREAKING_SPACE: char = '\u{a0}';

/// Structural family of a code container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeFamily {
    Monaco,
    Ace,
    CodeMirror,
    Preformatted,
    Plain,
}

impl CodeFamily {
    /// Matcher precedence. `Plain` accepts everything and stays last.
    pub const ORDER: [CodeFamily; 5] = [
        CodeFamily::Monaco,
        CodeFamily::Ace,
        CodeFamily::CodeMirror,
        CodeFamily::Preformatted,
        CodeFamily::Plain,
    ];

    pub fn classify(element: &dyn ElementView) -> CodeFamily {
        Self::ORDER
            .into_iter()
            .find(|family| family.matches(element))
            .unwrap_or(CodeFamily::Plain)
    }

    pub fn matches(&self, element: &dyn ElementView) -> bool {
        match self {
            CodeFamily::Monaco => {
                element.has_class("view-lines")
                    || element.closest_has_attribute("data-monaco-editor-id")
            }
            CodeFamily::Ace => {
                element.has_class("ace_content") || element.has_class("ace_text-layer")
            }
            CodeFamily::CodeMirror => element.closest_has_class("CodeMirror"),
            CodeFamily::Preformatted => element.tag_name() == "pre",
            CodeFamily::Plain => true,
        }
    }

    /// Class carried by each rendered line, for line-based families.
    pub fn line_class(&self) -> Option<&'static str> {
        match self {
            CodeFamily::Monaco => Some("view-line"),
            CodeFamily::Ace => Some("ace_line"),
            CodeFamily::CodeMirror => Some("CodeMirror-line"),
            CodeFamily::Preformatted | CodeFamily::Plain => None,
        }
    }

    pub fn extract(&self, element: &dyn ElementView) -> String {
        if let Some(line_class) = self.line_class() {
            return join_lines(element.descendant_texts_by_class(line_class));
        }

        match self {
            CodeFamily::Preformatted => element
                .first_descendant_text_by_tag("code")
                .unwrap_or_else(|| element.text_content())
                .trim()
                .to_string(),
            _ => element.text_content().trim().to_string(),
        }
    }
}

/// Joins line texts with `\n`, turning non-breaking spaces into spaces.
///
/// Only the outer whitespace of the whole block is trimmed; indentation
/// inside it is kept as-is.
pub fn join_lines<I>(lines: I) -> String
where
    I: IntoIterator<Item = String>,
{
    lines
        .into_iter()
        .map(|line| line.replace(NON_BREAKING_SPACE, " "))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
