// Integration tests for the CLI commands.
// These run the commands against a temp config dir and a mock Gemini endpoint.

use complexity_lens::cli::KeyAction;
use complexity_lens::commands::{Session, analyze, extract, key};
use complexity_lens::error::CliError;
use complexity_lens::terminal::TerminalRenderer;

use lens_core::config::{ApiConfig, AppConfig};

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROBLEM_URL: &str = "https://leetcode.com/problems/valid-parentheses/";
const ANALYSIS_TEXT: &str = "Time Complexity: O(N)\nSpace Complexity: O(N)";

const SUBMISSION_PAGE: &str = r#"<html><body>
<div class="code-area"><pre><code>class Solution {
public:
    bool isValid(string s) {
        stack&lt;char&gt; st;
        return st.empty();
    }
};</code></pre></div>
</body></html>"#;

const SUBMISSION_CODE: &str = "class Solution {
public:
    bool isValid(string s) {
        stack<char> st;
        return st.empty();
    }
};";

fn write_page(dir: &TempDir, html: &str) -> PathBuf {
    let path = dir.path().join("page.html");
    std::fs::write(&path, html).expect("write page");
    path
}

fn session_for(dir: &TempDir, server: &MockServer) -> Session {
    let config = AppConfig {
        api: ApiConfig {
            endpoint: format!("{}/v1beta/models/gemini-2.0-flash:generateContent", server.uri()),
            ..ApiConfig::default()
        },
        ..AppConfig::default()
    };
    config.save(dir.path()).expect("save config");
    Session::load(dir.path().to_path_buf()).expect("load session")
}

/// **VALUE**: Verifies `extract` prints the submission code with entities decoded.
///
/// **BUG THIS CATCHES**: Would catch raw HTML (`&lt;`) reaching the output.
#[test]
fn given_submission_page_when_extract_then_code_printed() {
    let dir = TempDir::new().expect("temp dir");
    let page = write_page(&dir, SUBMISSION_PAGE);

    let code = extract::run(&page).expect("extract should succeed");

    assert_eq!(code, SUBMISSION_CODE);
}

#[test]
fn given_missing_page_file_when_extract_then_cli_error() {
    let result = extract::run(&PathBuf::from("/definitely/not/here.html"));

    assert!(matches!(result, Err(CliError::Cli { .. })));
}

/// **VALUE**: Verifies key set/show/clear round trip through the storage file.
///
/// **WHY THIS MATTERS**: `key set` is the only way to provide the credential from the
/// command line; `show` must never print it.
///
/// **BUG THIS CATCHES**: Would catch:
/// - Whitespace around a pasted key being stored
/// - `show` echoing the key
/// - `clear` leaving the key in place
#[tokio::test]
async fn given_key_commands_when_run_then_storage_updated_and_key_never_printed() {
    // GIVEN: A fresh config dir
    let dir = TempDir::new().expect("temp dir");
    let server = MockServer::start().await;
    let session = session_for(&dir, &server);

    // WHEN: Setting a padded key
    let saved = key::run(
        &session,
        &KeyAction::Set {
            key: String::from("  AIza-cli-key  "),
        },
    )
    .await
    .expect("set should succeed");

    // THEN: Confirmation printed, trimmed key stored
    assert_eq!(saved, "API Key saved!");
    let storage = std::fs::read_to_string(dir.path().join("storage.json")).expect("storage");
    assert!(storage.contains("\"AIza-cli-key\""));

    // WHEN: Showing
    let shown = key::run(&session, &KeyAction::Show).await.expect("show");

    // THEN: Length only
    assert_eq!(shown, "API Key is set (12 characters).");
    assert!(!shown.contains("AIza"));

    // WHEN: Clearing
    let cleared = key::run(&session, &KeyAction::Clear).await.expect("clear");

    // THEN: Key gone
    assert_eq!(cleared, "API Key cleared!");
    let shown = key::run(&session, &KeyAction::Show).await.expect("show");
    assert_eq!(shown, "API Key not set. Analysis will fail.");
}

/// **VALUE**: Verifies `analyze` runs the full cycle and renders the result.
///
/// **BUG THIS CATCHES**: Would catch the CLI wiring (config endpoint, storage file,
/// renderer) diverging from what the core expects.
#[tokio::test]
async fn given_stored_key_and_page_when_analyze_then_result_rendered() {
    // GIVEN: A stored key, a saved page and a healthy endpoint
    let dir = TempDir::new().expect("temp dir");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(query_param("key", "AIza-cli-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": ANALYSIS_TEXT }] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&dir, &server);
    key::run(
        &session,
        &KeyAction::Set {
            key: String::from("AIza-cli-key"),
        },
    )
    .await
    .expect("set should succeed");
    let page = write_page(&dir, SUBMISSION_PAGE);

    // WHEN: Analyzing
    let analysis = analyze::run(
        &session,
        &page,
        PROBLEM_URL,
        Arc::new(TerminalRenderer::new(std::io::sink())),
    )
    .await
    .expect("analysis should succeed");

    // THEN: Analysis returned verbatim
    assert_eq!(analysis, ANALYSIS_TEXT);
}

#[tokio::test]
async fn given_unsupported_url_when_analyze_then_analysis_error_without_request() {
    let dir = TempDir::new().expect("temp dir");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = session_for(&dir, &server);
    let page = write_page(&dir, SUBMISSION_PAGE);

    let error = analyze::run(
        &session,
        &page,
        "https://github.com/",
        Arc::new(TerminalRenderer::new(std::io::sink())),
    )
    .await
    .expect_err("should fail");

    assert!(matches!(error, CliError::Analysis { .. }));
    assert_eq!(
        error.message(),
        "Analysis only works on LeetCode problem or submission pages."
    );
}

#[test]
fn given_invalid_config_when_session_loaded_then_config_error() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("config.json"),
        r#"{ "api": { "temperature": 3.0 } }"#,
    )
    .expect("write config");

    let result = Session::load(dir.path().to_path_buf());

    assert!(matches!(result, Err(CliError::Config { .. })));
}
