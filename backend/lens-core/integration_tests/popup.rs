use crate::helpers::{
    ANALYSIS_TEXT, EchoCode, PROBLEM_URL, TEST_API_KEY, background_context, empty_page, page_context,
    popup, prompt_of, success_body, tabs_with, two_sum_code, two_sum_page,
};

use lens_core::credential::MemoryCredentialStore;
use lens_core::error::PopupError;
use lens_core::messaging::{PAGE_CONTEXT, PageReply, PageRequest, channel};
use lens_core::presenter::{CycleState, ResultPanel, StatusKind};

use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_success(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(ANALYSIS_TEXT)))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// **VALUE**: Verifies the whole cycle from page snapshot to rendered analysis.
///
/// **WHY THIS MATTERS**: This is the product. The code the model sees must be the code
/// the user typed, including tabs, blank lines and indentation rendered as `&nbsp;`.
///
/// **BUG THIS CATCHES**: Would catch:
/// - Line structure lost between extractor and coordinator
/// - The status sequence skipping a phase
/// - The trigger left disabled after success
#[tokio::test]
async fn given_problem_page_when_analyze_then_code_reaches_model_and_analysis_shown() {
    // GIVEN: A problem page, a stored key and a healthy endpoint
    let server = MockServer::start().await;
    mount_success(&server, 1).await;

    let credentials = MemoryCredentialStore::with_key(TEST_API_KEY);
    let (popup, renderer) = popup(
        tabs_with(PROBLEM_URL, Some(page_context(two_sum_page()))),
        background_context(&server, credentials.clone()),
        credentials,
    );

    // WHEN: Running the cycle
    let analysis = popup.analyze().await.expect("analysis should succeed");

    // THEN: Model saw the exact source, analysis shown verbatim
    assert_eq!(analysis, ANALYSIS_TEXT);

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    assert!(prompt_of(&requests[0].body).contains(&format!("```\n{}\n```", two_sum_code())));

    let surface = popup.surface().await;
    assert_eq!(surface.result, ResultPanel::Analysis(ANALYSIS_TEXT.to_string()));
    assert_eq!(surface.status_kind(), Some(StatusKind::Success));
    assert!(surface.analyze_enabled);
    assert_eq!(popup.cycle_state().await, CycleState::Succeeded);

    assert_eq!(
        renderer.statuses(),
        vec![
            "Requesting code from page...",
            "Analyzing code with Gemini...",
            "Analysis complete.",
        ]
    );
}

/// **VALUE**: Verifies whitespace survives the full round trip from the page, through
/// the remote service and back to the result panel.
///
/// **WHY THIS MATTERS**: The result panel shows the answer verbatim. Tabs, blank lines
/// and indentation in the response must reach the user exactly as they were sent.
///
/// **BUG THIS CATCHES**: Would catch the response text being trimmed or re-indented on
/// the way back, which a fixed single-line answer would never reveal.
#[tokio::test]
async fn given_echoing_service_when_analyze_then_code_shown_with_whitespace_intact() {
    // GIVEN: A service that answers with the code it was sent
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(EchoCode)
        .expect(1)
        .mount(&server)
        .await;

    let credentials = MemoryCredentialStore::with_key(TEST_API_KEY);
    let (popup, _renderer) = popup(
        tabs_with(PROBLEM_URL, Some(page_context(two_sum_page()))),
        background_context(&server, credentials.clone()),
        credentials,
    );

    // WHEN: Running the cycle
    let analysis = popup.analyze().await.expect("analysis should succeed");

    // THEN: The panel holds the original code, tab and blank line included
    assert_eq!(analysis, two_sum_code());
    assert!(analysis.contains("\n\tseen = {}\n\n"));
    assert_eq!(
        popup.surface().await.result,
        ResultPanel::Analysis(two_sum_code())
    );
}

/// **VALUE**: Verifies pages outside the supported site never get a request.
///
/// **BUG THIS CATCHES**: Would catch the scope check running after the page request,
/// which would extract code from arbitrary sites.
#[tokio::test]
async fn given_unsupported_url_when_analyze_then_page_never_contacted() {
    // GIVEN: A tab on another site with an inbox we can inspect
    let server = MockServer::start().await;
    mount_success(&server, 0).await;

    let (page, mut page_inbox) = channel::<PageRequest, PageReply>(PAGE_CONTEXT, 4);
    let credentials = MemoryCredentialStore::with_key(TEST_API_KEY);
    let (popup, _renderer) = popup(
        tabs_with("https://example.com/problems/two-sum/", Some(page)),
        background_context(&server, credentials.clone()),
        credentials,
    );

    // WHEN: Running the cycle
    let error = popup.analyze().await.expect_err("should fail");

    // THEN: Scope error, nothing delivered
    assert!(matches!(error, PopupError::Scope { .. }));
    assert!(page_inbox.try_recv().is_none());

    let surface = popup.surface().await;
    assert_eq!(
        surface.result,
        ResultPanel::Error(String::from(
            "Failed: Analysis only works on LeetCode problem or submission pages."
        ))
    );
    assert_eq!(
        surface.status.as_ref().map(|status| status.message.as_str()),
        Some("Error during analysis.")
    );
    assert!(surface.analyze_enabled);
    assert_eq!(popup.cycle_state().await, CycleState::Failed);
}

#[tokio::test]
async fn given_page_without_code_when_analyze_then_extraction_message_and_no_request() {
    let server = MockServer::start().await;
    mount_success(&server, 0).await;

    let credentials = MemoryCredentialStore::with_key(TEST_API_KEY);
    let (popup, _renderer) = popup(
        tabs_with(PROBLEM_URL, Some(page_context(empty_page()))),
        background_context(&server, credentials.clone()),
        credentials,
    );

    let error = popup.analyze().await.expect_err("should fail");

    assert_eq!(
        error.message(),
        "Could not find the code element on the page. Make sure the code editor or submission code is visible."
    );
}

/// **VALUE**: Verifies a tab with no page context reports a messaging failure.
///
/// **BUG THIS CATCHES**: Would catch the popup waiting forever on a tab that was opened
/// before the extension was installed.
#[tokio::test]
async fn given_tab_without_page_context_when_analyze_then_messaging_error_shown() {
    let server = MockServer::start().await;
    mount_success(&server, 0).await;

    let credentials = MemoryCredentialStore::with_key(TEST_API_KEY);
    let (popup, _renderer) = popup(
        tabs_with(PROBLEM_URL, None),
        background_context(&server, credentials.clone()),
        credentials,
    );

    popup.analyze().await.expect_err("should fail");

    assert_eq!(
        popup.surface().await.result,
        ResultPanel::Error(String::from(
            "Failed: Error messaging content script: Could not establish connection. Receiving end does not exist."
        ))
    );
}

#[tokio::test]
async fn given_no_stored_key_when_analyze_then_key_prompt_shown_and_no_request() {
    let server = MockServer::start().await;
    mount_success(&server, 0).await;

    let credentials = MemoryCredentialStore::new();
    let (popup, _renderer) = popup(
        tabs_with(PROBLEM_URL, Some(page_context(two_sum_page()))),
        background_context(&server, credentials.clone()),
        credentials,
    );

    popup.analyze().await.expect_err("should fail");

    assert_eq!(
        popup.surface().await.result,
        ResultPanel::Error(String::from(
            "Failed: Gemini API key not set. Please set it in the extension popup."
        ))
    );
}

/// **VALUE**: Verifies remote errors show both the summary and the nested details.
///
/// **BUG THIS CATCHES**: Would catch details being lost between the background reply and
/// the result panel.
#[tokio::test]
async fn given_quota_error_when_analyze_then_details_appended() {
    // GIVEN: The API reports exhausted quota
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "code": 429, "message": "Resource has been exhausted (e.g. check quota).", "status": "RESOURCE_EXHAUSTED" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = MemoryCredentialStore::with_key(TEST_API_KEY);
    let (popup, _renderer) = popup(
        tabs_with(PROBLEM_URL, Some(page_context(two_sum_page()))),
        background_context(&server, credentials.clone()),
        credentials,
    );

    // WHEN: Running the cycle
    popup.analyze().await.expect_err("should fail");

    // THEN: Summary line plus details line
    assert_eq!(
        popup.surface().await.result,
        ResultPanel::Error(String::from(
            "Failed: Gemini API Error: Resource has been exhausted (e.g. check quota).\nDetails: Resource has been exhausted (e.g. check quota)."
        ))
    );
}

#[tokio::test]
async fn given_failed_cycle_when_retried_then_result_replaced() {
    let server = MockServer::start().await;
    mount_success(&server, 1).await;

    let credentials = MemoryCredentialStore::new();
    let (popup, _renderer) = popup(
        tabs_with(PROBLEM_URL, Some(page_context(two_sum_page()))),
        background_context(&server, credentials.clone()),
        credentials.clone(),
    );

    popup.analyze().await.expect_err("first cycle fails without a key");

    popup.set_api_key_input(TEST_API_KEY).await;
    popup.save_api_key().await.expect("save should succeed");
    let analysis = popup.analyze().await.expect("second cycle should succeed");

    assert_eq!(analysis, ANALYSIS_TEXT);
    assert_eq!(
        popup.surface().await.result,
        ResultPanel::Analysis(ANALYSIS_TEXT.to_string())
    );
}
