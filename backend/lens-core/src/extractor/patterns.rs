//! Ordered selector table, most specific first.

/// Full path to the problem page's Monaco line container.
pub const PROBLEM_EDITOR_SELECTOR: &str = "#editor > div.flex.flex-1.flex-col.overflow-hidden.pb-2 > div.flex-1.overflow-hidden > div > div > div.overflow-guard > div.monaco-scrollable-element.editor-scrollable.vs-dark > div.lines-content.monaco-editor-background > div.view-lines.monaco-mouse-cursor-text";

const DEFAULT_PATTERNS: &[(&str, &str)] = &[
    ("problem-editor", PROBLEM_EDITOR_SELECTOR),
    // Monaco
    ("monaco", r#"div[class*="monaco-editor"] .view-lines"#),
    ("monaco-instance", "div[data-monaco-editor-id] .view-lines"),
    ("editor-instance", r#"div[class*="editor-instance"] .view-lines"#),
    // Ace
    ("ace-content", ".ace_content"),
    ("ace-text-layer", ".ace_text-layer"),
    // Submission views
    ("code-area", r#"div[class*="code-area"] pre"#),
    ("code-panel", r#"div[class*="code-panel"] pre"#),
    ("layer-code", r#"div[class*="bg-layer-1"] pre[id*="code-"]"#),
    ("code-definition", r#"div[data-key="code-definition"] pre code"#),
    ("submission-code", "#submission-code pre"),
    ("language-python", ".language-python pre code"),
    ("language-javascript", ".language-javascript pre code"),
    ("language-java", ".language-java pre code"),
    ("language-cpp", ".language-cpp pre code"),
    ("scroll-block", "div.overflow-y-auto.break-all pre"),
    // Generic fallbacks
    ("mono-block", "div.font-mono.text-sm.overflow-x-auto.whitespace-pre pre"),
    ("pre-code", "pre > code"),
    ("pre", "pre"),
];

/// One entry of the candidate search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorPattern {
    /// Short name used in logs.
    pub label: String,
    pub selector: String,
}

impl SelectorPattern {
    pub fn new(label: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            selector: selector.into(),
        }
    }
}

/// The built-in search order.
pub fn default_patterns() -> Vec<SelectorPattern> {
    DEFAULT_PATTERNS
        .iter()
        .map(|(label, selector)| SelectorPattern::new(*label, *selector))
        .collect()
}
