// Unit tests for the coordinator module
// Tests prompt construction, request shape and response interpretation

use crate::coordinator::{
    GenerateContentRequest, GenerationConfig, build_prompt, interpret_response,
};
use crate::error::AnalysisError;

use serde_json::json;

// ============================================
// PROMPT
// ============================================

/// **VALUE**: Verifies the code is embedded verbatim between fences.
///
/// **WHY THIS MATTERS**: Any normalization of the user's code (trimming, tab expansion)
/// changes what the model analyzes.
///
/// **BUG THIS CATCHES**: Would catch the code being escaped or trimmed before embedding.
#[test]
fn given_code_with_tabs_when_build_prompt_then_embedded_verbatim() {
    // GIVEN: Code with a tab and a blank line
    let code = "for i in range(n):\n\tpass\n\nreturn x";

    // WHEN: Building the prompt
    let prompt = build_prompt(code);

    // THEN: Fenced block holds the exact code
    assert!(prompt.contains(&format!("--- Code ---\n```\n{code}\n```\n--- Analysis ---")));
    assert!(prompt.contains("Time Complexity: O(N)\nSpace Complexity: O(1)"));
    assert!(prompt.contains("DO NOT GIVE ANYTHING ELSE"));
}

#[test]
fn given_prompt_when_request_serialized_then_gemini_shape() {
    let request = GenerateContentRequest::from_prompt(
        String::from("hello"),
        GenerationConfig {
            temperature: 0.2,
            max_output_tokens: 1000,
        },
    );

    let value = serde_json::to_value(&request).expect("serializes");

    assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
    assert_eq!(value["generationConfig"]["maxOutputTokens"], 1000);
    let temperature = value["generationConfig"]["temperature"]
        .as_f64()
        .expect("temperature is a number");
    assert!((temperature - 0.2).abs() < 1e-6);
}

// ============================================
// RESPONSE INTERPRETATION
// ============================================

/// **VALUE**: Verifies the first part of the first candidate is returned unchanged.
///
/// **BUG THIS CATCHES**: Would catch trimming or reformatting of the model's answer.
#[test]
fn given_candidate_text_when_interpreted_then_returned_verbatim() {
    // GIVEN: A normal response
    let body = json!({
        "candidates": [{
            "content": { "parts": [
                { "text": "Time Complexity: O(N)\nSpace Complexity: O(1)\n" },
                { "text": "ignored" }
            ]},
            "finishReason": "STOP"
        }]
    });

    // WHEN: Interpreting
    let analysis = interpret_response(body).expect("should succeed");

    // THEN: Exactly the first part's text
    assert_eq!(analysis, "Time Complexity: O(N)\nSpace Complexity: O(1)\n");
}

/// **VALUE**: Verifies a safety stop names the reason and echoes the ratings.
///
/// **WHY THIS MATTERS**: Users need to know the analysis was withheld, not lost.
///
/// **BUG THIS CATCHES**: Would catch the safety ratings being dropped from the message or
/// the raw body not being carried as details.
#[test]
fn given_safety_finish_when_interpreted_then_reason_and_ratings_reported() {
    // GIVEN: No content, finish reason SAFETY with ratings
    let body = json!({
        "candidates": [{
            "finishReason": "SAFETY",
            "safetyRatings": [{ "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "probability": "HIGH" }]
        }]
    });

    // WHEN: Interpreting
    let error = interpret_response(body.clone()).expect_err("should fail");

    // THEN: Incomplete, with reason and ratings in the message
    assert!(matches!(error, AnalysisError::Incomplete { .. }));
    assert!(error.message().starts_with("Analysis could not be generated. Reason: SAFETY."));
    assert!(error.message().contains("Safety concerns: "));
    assert!(error.message().contains("HARM_CATEGORY_DANGEROUS_CONTENT"));
    assert_eq!(error.details(), Some(&body));
}

#[test]
fn given_max_tokens_finish_when_interpreted_then_exact_message() {
    let body = json!({ "candidates": [{ "finishReason": "MAX_TOKENS", "safetyRatings": [] }] });

    let error = interpret_response(body).expect_err("should fail");

    assert_eq!(
        error.message(),
        "Analysis could not be generated. Reason: MAX_TOKENS."
    );
}

/// **VALUE**: Verifies a candidate with content but no text falls through to its finish reason.
///
/// **BUG THIS CATCHES**: Would catch an empty parts array being treated as success.
#[test]
fn given_empty_parts_with_reason_when_interpreted_then_incomplete() {
    let body = json!({
        "candidates": [{ "content": { "parts": [] }, "finishReason": "RECITATION" }]
    });

    let error = interpret_response(body).expect_err("should fail");

    assert_eq!(error.error_category(), "incomplete");
    assert!(error.message().contains("RECITATION"));
}

#[test]
fn given_prompt_block_when_interpreted_then_blocked() {
    let body = json!({ "promptFeedback": { "blockReason": "OTHER" } });

    let error = interpret_response(body).expect_err("should fail");

    assert!(matches!(error, AnalysisError::Blocked { .. }));
    assert_eq!(error.message(), "Prompt was blocked by Gemini. Reason: OTHER");
}

/// **VALUE**: Verifies a null or malformed `candidates` field still reaches the
/// prompt-block check.
///
/// **WHY THIS MATTERS**: Gemini answers a blocked prompt without usable candidates. The
/// user must see the block reason, not a generic parse failure.
///
/// **BUG THIS CATCHES**: Would catch a strict decode of `candidates` failing the whole body
/// and short-circuiting to "could not parse".
#[test]
fn given_null_candidates_with_block_reason_when_interpreted_then_blocked() {
    for candidates in [json!(null), json!("nope"), json!([{ "content": 7 }])] {
        // GIVEN: Candidates that carry no usable text, plus a prompt block
        let body = json!({
            "candidates": candidates,
            "promptFeedback": { "blockReason": "SAFETY" }
        });

        // WHEN: Interpreting
        let error = interpret_response(body.clone()).expect_err("should fail");

        // THEN: The block reason is reported with the body attached
        assert!(matches!(error, AnalysisError::Blocked { .. }));
        assert_eq!(error.message(), "Prompt was blocked by Gemini. Reason: SAFETY");
        assert_eq!(error.details(), Some(&body));
    }
}

#[test]
fn given_null_finish_reason_with_block_reason_when_interpreted_then_blocked() {
    let body = json!({
        "candidates": [{ "content": null, "finishReason": null }],
        "promptFeedback": { "blockReason": "OTHER" }
    });

    let error = interpret_response(body).expect_err("should fail");

    assert_eq!(error.error_category(), "blocked");
}

/// **VALUE**: Verifies anything else becomes "could not parse" with the body attached.
///
/// **BUG THIS CATCHES**: Would catch unexpected bodies panicking on field access or
/// being reported as success with an empty string.
#[test]
fn given_unexpected_body_when_interpreted_then_unparseable_with_details() {
    for body in [json!({}), json!({ "candidates": [] }), json!({ "candidates": "nope" })] {
        let error = interpret_response(body.clone()).expect_err("should fail");

        assert_eq!(
            error.message(),
            "Could not parse analysis from Gemini response."
        );
        assert_eq!(error.details(), Some(&body));
    }
}

// ============================================
// ERROR CONSTRUCTION
// ============================================

/// **VALUE**: Verifies non-2xx errors prefer the remote message.
///
/// **BUG THIS CATCHES**: Would catch the generic status text hiding "API key not valid".
#[test]
fn given_api_error_body_when_api_error_built_then_remote_message_used() {
    let body = json!({ "error": { "code": 400, "message": "API key not valid. Please pass a valid API key." } });

    let error = AnalysisError::api(400, Some("Bad Request"), Some(body));

    assert_eq!(
        error.message(),
        "Gemini API Error: API key not valid. Please pass a valid API key."
    );
    assert_eq!(error.status_code(), Some(400));
    assert_eq!(error.error_category(), "client_error");
}

#[test]
fn given_api_error_without_message_when_built_then_status_fallback() {
    let error = AnalysisError::api(503, Some("Service Unavailable"), Some(json!({})));

    assert_eq!(
        error.message(),
        "Gemini API Error: HTTP Error 503: Service Unavailable"
    );
    assert_eq!(error.error_category(), "server_error");
}

#[test]
fn given_missing_credential_then_popup_instructions_in_message() {
    let error = AnalysisError::credential_missing();

    assert_eq!(
        error.message(),
        "Gemini API key not set. Please set it in the extension popup."
    );
    match error {
        AnalysisError::CredentialMissing { location, .. } => {
            assert_eq!(location.file_name(), "coordinator.rs");
        }
        other => panic!("unexpected variant: {other:?}"),
    }
}
