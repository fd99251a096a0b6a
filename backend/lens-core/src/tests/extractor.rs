// Unit tests for the extractor module
// Tests candidate search order, length threshold and per-family text rebuilding

use crate::error::ExtractError;
use crate::extractor::{
    CodeFamily, Extractor, HtmlDocument, MIN_CODE_LENGTH, SelectorPattern, default_patterns,
};
use crate::extractor::family::join_lines;

fn page(body: &str) -> HtmlDocument {
    HtmlDocument::parse(&format!("<html><body>{body}</body></html>"))
}

fn pre_block(text: &str) -> String {
    format!("<pre>{text}</pre>")
}

// ============================================
// LINE JOINING
// ============================================

/// **VALUE**: Verifies non-breaking spaces become plain spaces and lines join with `\n`.
///
/// **WHY THIS MATTERS**: Line-based editors render indentation as U+00A0. Sending those
/// to the model mangles Python indentation.
///
/// **BUG THIS CATCHES**: Would catch the replacement being skipped or lines joined
/// without separators.
#[test]
fn given_lines_with_nbsp_when_join_lines_then_spaces_and_newlines_restored() {
    // GIVEN: Two rendered lines, the second indented with U+00A0
    let lines = vec![
        String::from("def f():"),
        String::from("\u{a0}\u{a0}\u{a0}\u{a0}return 1"),
    ];

    // WHEN: Joining
    let joined = join_lines(lines);

    // THEN: Indentation uses ordinary spaces
    assert_eq!(joined, "def f():\n    return 1");
}

/// **VALUE**: Verifies only the outer whitespace of the block is trimmed.
///
/// **BUG THIS CATCHES**: Would catch per-line trimming that strips indentation and
/// blank lines inside the code.
#[test]
fn given_blank_outer_lines_when_join_lines_then_only_block_edges_trimmed() {
    let lines = vec![
        String::new(),
        String::from("a = 1"),
        String::new(),
        String::from("\tb = 2"),
        String::from("   "),
    ];

    let joined = join_lines(lines);

    assert_eq!(joined, "a = 1\n\n\tb = 2");
}

// ============================================
// THRESHOLD AND SELECTION
// ============================================

/// **VALUE**: Verifies a candidate of exactly the threshold length is rejected.
///
/// **WHY THIS MATTERS**: The threshold filters out short labels and placeholders that
/// happen to live in `<pre>` blocks.
///
/// **BUG THIS CATCHES**: Would catch `>=` replacing the strict comparison.
#[test]
fn given_text_at_threshold_when_extract_then_no_code_element() {
    // GIVEN: A single block of exactly MIN_CODE_LENGTH characters
    let document = page(&pre_block(&"x".repeat(MIN_CODE_LENGTH)));

    // WHEN: Extracting
    let result = Extractor::new().extract(&document);

    // THEN: Nothing qualifies
    assert!(matches!(result, Err(ExtractError::NoCodeElement { .. })));
}

#[test]
fn given_text_one_over_threshold_when_extract_then_returned() {
    let text = "x".repeat(MIN_CODE_LENGTH + 1);
    let document = page(&pre_block(&text));

    let result = Extractor::new().extract(&document).expect("should extract");

    assert_eq!(result, text);
}

/// **VALUE**: Verifies the longest candidate within one pattern wins.
///
/// **BUG THIS CATCHES**: Would catch returning the first match in document order.
#[test]
fn given_two_blocks_for_same_pattern_when_extract_then_longest_wins() {
    // GIVEN: A short and a long block
    let short = format!("short {}", "a".repeat(60));
    let long = format!("long {}", "b".repeat(120));
    let document = page(&format!("{}{}", pre_block(&short), pre_block(&long)));

    // WHEN: Extracting
    let result = Extractor::new().extract(&document).expect("should extract");

    // THEN: The longer one
    assert_eq!(result, long);
}

/// **VALUE**: Verifies earlier patterns win even if a later one would yield more text.
///
/// **WHY THIS MATTERS**: The editor containers are listed first on purpose. A page can
/// also carry long `<pre>` blocks (examples in the problem statement) that must not
/// beat the user's code.
///
/// **BUG THIS CATCHES**: Would catch a global "longest across all patterns" search.
#[test]
fn given_editor_and_longer_pre_when_extract_then_editor_pattern_wins() {
    // GIVEN: An Ace editor with ~60 chars and a statement example with ~300 chars
    let ace_line = "int main() { return solve(read_input(), 42) + 0; } // ace";
    let statement = "example ".repeat(40);
    let document = page(&format!(
        r#"<div class="ace_content"><div class="ace_line">{ace_line}</div></div>{}"#,
        pre_block(&statement)
    ));

    // WHEN: Searching
    let found = Extractor::new().find_code(&document).expect("should find code");

    // THEN: The Ace editor text, not the statement example
    assert_eq!(found.family, CodeFamily::Ace);
    assert_eq!(found.pattern, "ace-content");
    assert_eq!(found.text, ace_line);
}

/// **VALUE**: Verifies a selector that fails to evaluate is skipped.
///
/// **BUG THIS CATCHES**: Would catch a malformed pattern aborting the whole search.
#[test]
fn given_malformed_selector_when_extract_then_next_pattern_used() {
    // GIVEN: A broken pattern ahead of a working one
    let extractor = Extractor::with_patterns(vec![
        SelectorPattern::new("broken", "div[[["),
        SelectorPattern::new("pre", "pre"),
    ]);
    let text = "y".repeat(80);
    let document = page(&pre_block(&text));

    // WHEN: Extracting
    let result = extractor.extract(&document);

    // THEN: The second pattern still finds the code
    assert_eq!(result.expect("should extract"), text);
}

/// **VALUE**: Verifies elements that take no space on the page are ignored.
///
/// **WHY THIS MATTERS**: Editors keep hidden copies of the buffer (other language tabs,
/// collapsed panels). Picking one sends stale code.
///
/// **BUG THIS CATCHES**: Would catch the visibility filter being dropped, or only
/// checking the element itself rather than its ancestors.
#[test]
fn given_hidden_longer_block_when_extract_then_visible_block_wins() {
    // GIVEN: A long block inside a hidden wrapper, a shorter visible block
    let hidden = "h".repeat(200);
    let hidden_attr = "z".repeat(180);
    let visible = "v".repeat(70);
    let document = page(&format!(
        r#"<div style="display: none"><pre>{hidden}</pre></div><pre hidden>{hidden_attr}</pre><pre>{visible}</pre>"#
    ));

    // WHEN: Extracting
    let result = Extractor::new().extract(&document).expect("should extract");

    // THEN: Only the visible one counts
    assert_eq!(result, visible);
}

#[test]
fn given_no_code_on_page_when_extract_then_user_facing_message() {
    let document = page("<p>Nothing to see</p>");

    let error = Extractor::new()
        .extract(&document)
        .expect_err("should fail");

    assert_eq!(
        error.message(),
        "Could not find the code element on the page. Make sure the code editor or submission code is visible."
    );
}

// ============================================
// FAMILIES
// ============================================

/// **VALUE**: Verifies Monaco editors are rebuilt line by line with indentation kept.
///
/// **BUG THIS CATCHES**: Would catch using the container's raw text, which concatenates
/// lines with no separator.
#[test]
fn given_monaco_editor_when_extract_then_lines_rebuilt() {
    // GIVEN: A Monaco editor with three lines, one blank
    let document = page(
        r#"<div class="monaco-editor"><div class="view-lines">
            <div class="view-line"><span>class Solution:</span></div>
            <div class="view-line"><span></span></div>
            <div class="view-line"><span>&nbsp;&nbsp;&nbsp;&nbsp;def twoSum(self, nums, target):</span></div>
        </div></div>"#,
    );

    // WHEN: Searching
    let found = Extractor::new().find_code(&document).expect("should find code");

    // THEN: Lines joined with newlines, nbsp turned into spaces
    assert_eq!(found.family, CodeFamily::Monaco);
    assert_eq!(
        found.text,
        "class Solution:\n\n    def twoSum(self, nums, target):"
    );
}

#[test]
fn given_monaco_instance_attribute_when_classified_then_monaco() {
    let document = page(
        r#"<div data-monaco-editor-id="1"><div class="view-lines">
            <div class="view-line">function solve(input) { return input.split(",").map(Number); }</div>
        </div></div>"#,
    );

    let found = Extractor::new().find_code(&document).expect("should find code");

    assert_eq!(found.family, CodeFamily::Monaco);
    assert_eq!(found.pattern, "monaco-instance");
}

#[test]
fn given_codemirror_editor_when_extract_then_lines_rebuilt() {
    // GIVEN: A CodeMirror editor found by a custom pattern
    let extractor =
        Extractor::with_patterns(vec![SelectorPattern::new("cm", ".CodeMirror-code")]);
    let document = page(
        r#"<div class="CodeMirror"><div class="CodeMirror-code">
            <pre class="CodeMirror-line"><span>fn main() {</span></pre>
            <pre class="CodeMirror-line"><span>&nbsp;&nbsp;&nbsp;&nbsp;println!("{}", 1 + 2 + 3 + 4 + 5 + 6);</span></pre>
            <pre class="CodeMirror-line"><span>}</span></pre>
        </div></div>"#,
    );

    // WHEN: Searching
    let found = extractor.find_code(&document).expect("should find code");

    // THEN: CodeMirror lines
    assert_eq!(found.family, CodeFamily::CodeMirror);
    assert_eq!(
        found.text,
        "fn main() {\n    println!(\"{}\", 1 + 2 + 3 + 4 + 5 + 6);\n}"
    );
}

/// **VALUE**: Verifies a `<pre>` prefers its nested `<code>` text.
///
/// **BUG THIS CATCHES**: Would catch line-number gutters or copy buttons inside the
/// `<pre>` leaking into the extracted code.
#[test]
fn given_pre_with_code_child_when_extract_then_code_text_used() {
    let code = "SELECT name FROM employees WHERE salary > 1000 ORDER BY name;";
    let document = page(&format!(
        r#"<div class="code-area"><pre><span class="gutter">12</span><code>
{code}
</code></pre></div>"#
    ));

    let found = Extractor::new().find_code(&document).expect("should find code");

    assert_eq!(found.family, CodeFamily::Preformatted);
    assert_eq!(found.text, code);
}

#[test]
fn given_plain_container_when_extract_then_trimmed_text_content() {
    let extractor =
        Extractor::with_patterns(vec![SelectorPattern::new("snippet", "div.snippet")]);
    let code = "val xs = List(1, 2, 3).map(_ * 2).filter(_ > 2).sum // plain";
    let document = page(&format!(r#"<div class="snippet">   {code}   </div>"#));

    let found = extractor.find_code(&document).expect("should find code");

    assert_eq!(found.family, CodeFamily::Plain);
    assert_eq!(found.text, code);
}

// ============================================
// PATTERN TABLE
// ============================================

/// **VALUE**: Verifies the built-in table order that the selection rule depends on.
///
/// **BUG THIS CATCHES**: Would catch the generic `pre` fallbacks moving ahead of the
/// editor containers.
#[test]
fn given_default_patterns_then_editor_first_and_generic_pre_last() {
    let patterns = default_patterns();

    assert_eq!(patterns.len(), 19);
    assert_eq!(patterns[0].label, "problem-editor");
    assert_eq!(patterns[patterns.len() - 2].selector, "pre > code");
    assert_eq!(patterns[patterns.len() - 1].selector, "pre");
}
