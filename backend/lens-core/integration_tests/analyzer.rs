use crate::helpers::{
    ANALYSIS_TEXT, GENERATE_PATH, TEST_API_KEY, api_config, prompt_of, success_body,
};

use lens_core::config::ApiConfig;
use lens_core::coordinator::Analyzer;
use lens_core::credential::MemoryCredentialStore;
use lens_core::error::AnalysisError;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies one well-formed request and a verbatim result on success.
///
/// **WHY THIS MATTERS**: The key travels as the `key` query parameter and the body must
/// match the generateContent schema; otherwise every analysis fails with HTTP 400.
///
/// **BUG THIS CATCHES**: Would catch:
/// - The key sent in a header or body instead of the query string
/// - camelCase renames lost on `generationConfig` / `maxOutputTokens`
/// - The code missing from the prompt
#[tokio::test]
async fn given_valid_key_when_analyze_then_single_request_and_text_returned() {
    // GIVEN: An endpoint expecting exactly one well-formed request
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", TEST_API_KEY))
        .and(body_partial_json(
            json!({ "generationConfig": { "maxOutputTokens": 1000 } }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(ANALYSIS_TEXT)))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = Analyzer::new(
        &api_config(&server),
        MemoryCredentialStore::with_key(TEST_API_KEY),
    )
    .expect("valid analyzer");

    // WHEN: Analyzing
    let analysis = analyzer
        .analyze("def f(n):\n    return n")
        .await
        .expect("analysis should succeed");

    // THEN: Text returned verbatim, code embedded in the prompt
    assert_eq!(analysis, ANALYSIS_TEXT);
    let requests = server.received_requests().await.expect("recording enabled");
    assert!(prompt_of(&requests[0].body).contains("```\ndef f(n):\n    return n\n```"));
}

/// **VALUE**: Verifies a missing key fails before any network traffic.
///
/// **BUG THIS CATCHES**: Would catch a request going out with an empty `key` parameter.
#[tokio::test]
async fn given_no_key_when_analyze_then_credential_missing_and_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let analyzer = Analyzer::new(&api_config(&server), MemoryCredentialStore::new())
        .expect("valid analyzer");

    let error = analyzer.analyze("x = 1").await.expect_err("should fail");

    assert!(matches!(error, AnalysisError::CredentialMissing { .. }));
}

#[tokio::test]
async fn given_empty_code_when_analyze_then_no_code_and_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let analyzer = Analyzer::new(
        &api_config(&server),
        MemoryCredentialStore::with_key(TEST_API_KEY),
    )
    .expect("valid analyzer");

    let error = analyzer.analyze("").await.expect_err("should fail");

    assert_eq!(error.message(), "No code provided in the request.");
}

/// **VALUE**: Verifies non-2xx answers surface the remote message and keep the body.
///
/// **BUG THIS CATCHES**: Would catch the error body being discarded, which leaves users
/// with "HTTP 400" and no hint that their key is wrong.
#[tokio::test]
async fn given_rejected_key_when_analyze_then_api_error_with_details() {
    // GIVEN: The API rejects the key
    let server = MockServer::start().await;
    let body = json!({
        "error": { "code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT" }
    });
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let analyzer = Analyzer::new(
        &api_config(&server),
        MemoryCredentialStore::with_key(TEST_API_KEY),
    )
    .expect("valid analyzer");

    // WHEN: Analyzing
    let error = analyzer.analyze("x = 1").await.expect_err("should fail");

    // THEN: Remote message, status and body all available
    assert_eq!(
        error.message(),
        "Gemini API Error: API key not valid. Please pass a valid API key."
    );
    assert_eq!(error.status_code(), Some(400));
    assert_eq!(error.details(), Some(&body));
}

/// **VALUE**: Verifies a body that is not JSON is a network error, even on non-2xx.
///
/// **BUG THIS CATCHES**: Would catch a gateway's HTML error page causing a panic or an
/// API error with no message.
#[tokio::test]
async fn given_html_error_page_when_analyze_then_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let analyzer = Analyzer::new(
        &api_config(&server),
        MemoryCredentialStore::with_key(TEST_API_KEY),
    )
    .expect("valid analyzer");

    let error = analyzer.analyze("x = 1").await.expect_err("should fail");

    assert_eq!(error.error_category(), "network");
    assert!(error.message().starts_with("Network or fetch error: "));
    assert!(error.details().is_none());
}

/// **VALUE**: Verifies the request timeout applies and the key stays out of the error.
///
/// **WHY THIS MATTERS**: The request URL carries the key, and reqwest errors print their
/// URL by default. Error text ends up in logs and the popup.
///
/// **BUG THIS CATCHES**: Would catch `without_url()` being dropped from the error path.
#[tokio::test]
async fn given_slow_endpoint_when_analyze_then_timeout_without_key_in_message() {
    // GIVEN: An endpoint slower than the configured timeout
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body(ANALYSIS_TEXT))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = ApiConfig {
        request_timeout_secs: 1,
        ..api_config(&server)
    };
    let analyzer = Analyzer::new(&config, MemoryCredentialStore::with_key(TEST_API_KEY))
        .expect("valid analyzer");

    // WHEN: Analyzing
    let error = analyzer.analyze("x = 1").await.expect_err("should time out");

    // THEN: Timeout, no key in any rendering of the error
    assert_eq!(error.error_category(), "timeout");
    assert!(!error.to_string().contains(TEST_API_KEY));
    assert!(!format!("{error:?}").contains(TEST_API_KEY));
}

#[test]
fn given_invalid_endpoint_when_new_then_endpoint_error() {
    let config = ApiConfig {
        endpoint: String::from("not a url"),
        ..ApiConfig::default()
    };

    let result = Analyzer::new(&config, MemoryCredentialStore::new());

    assert!(matches!(result, Err(AnalysisError::Endpoint { .. })));
}
