// Unit tests for the messaging module
// Tests request/reply delivery, failure classification and message wire shape

use crate::error::{AnalysisError, ExtractError, MessagingError};
use crate::messaging::{
    AnalysisReply, BackgroundRequest, BrowserTabs, PAGE_CONTEXT, PageReply, PageRequest, Tab,
    channel,
};

use serde_json::json;

/// **VALUE**: Verifies one request gets exactly the reply its handler sent.
///
/// **BUG THIS CATCHES**: Would catch replies being routed to the wrong requester.
#[tokio::test]
async fn given_listening_inbox_when_send_then_reply_received() {
    // GIVEN: A context that echoes the code length
    let (mailbox, mut inbox) = channel::<BackgroundRequest, AnalysisReply>("test", 4);
    tokio::spawn(async move {
        while let Some(envelope) = inbox.recv().await {
            let BackgroundRequest::AnalyzeCode { code } = envelope.message;
            envelope.responder.reply(AnalysisReply {
                analysis: Some(format!("{} chars", code.len())),
                ..Default::default()
            });
        }
    });

    // WHEN: Sending
    let reply = mailbox
        .send(BackgroundRequest::AnalyzeCode {
            code: String::from("abc"),
        })
        .await
        .expect("send should succeed");

    // THEN: The handler's reply
    assert_eq!(reply.analysis.as_deref(), Some("3 chars"));
}

/// **VALUE**: Verifies a closed inbox is reported as unreachable.
///
/// **WHY THIS MATTERS**: The popup maps this to "Error messaging content script", which
/// tells users to reload the page.
///
/// **BUG THIS CATCHES**: Would catch the send hanging forever on a dead context.
#[tokio::test]
async fn given_dropped_inbox_when_send_then_unreachable() {
    let (mailbox, inbox) = channel::<PageRequest, PageReply>(PAGE_CONTEXT, 1);
    drop(inbox);

    let error = mailbox
        .send(PageRequest::GetCode)
        .await
        .expect_err("send should fail");

    assert!(matches!(error, MessagingError::Unreachable { .. }));
    assert_eq!(error.context(), PAGE_CONTEXT);
}

/// **VALUE**: Verifies a request dropped without a reply is reported as no response.
///
/// **BUG THIS CATCHES**: Would catch a dropped responder being confused with an
/// unreachable context.
#[tokio::test]
async fn given_handler_drops_request_when_send_then_no_response() {
    // GIVEN: A context that swallows requests
    let (mailbox, mut inbox) = channel::<PageRequest, PageReply>(PAGE_CONTEXT, 1);
    tokio::spawn(async move {
        while let Some(envelope) = inbox.recv().await {
            drop(envelope);
        }
    });

    // WHEN: Sending
    let error = mailbox
        .send(PageRequest::GetCode)
        .await
        .expect_err("send should fail");

    // THEN: No response
    assert!(matches!(error, MessagingError::NoResponse { .. }));
}

#[tokio::test]
async fn given_tab_without_page_context_when_send_to_tab_then_unreachable() {
    let mut tabs = BrowserTabs::new();
    tabs.open(Tab::new(7, "https://leetcode.com/problems/two-sum/"), None);

    let error = tabs
        .send_to_tab(7, PageRequest::GetCode)
        .await
        .expect_err("send should fail");

    match error {
        MessagingError::Unreachable { message, .. } => {
            assert_eq!(
                message,
                "Could not establish connection. Receiving end does not exist."
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn given_opened_tabs_then_last_opened_is_active() {
    let mut tabs = BrowserTabs::new();
    assert!(tabs.active_tab().is_none());

    tabs.open(Tab::new(1, "https://example.com/"), None);
    tabs.open(Tab::new(2, "https://leetcode.com/problems/a/"), None);

    assert_eq!(tabs.active_tab().and_then(|tab| tab.id), Some(2));
}

// ============================================
// WIRE SHAPE
// ============================================

/// **VALUE**: Verifies requests carry their `type` tag in camelCase.
///
/// **BUG THIS CATCHES**: Would catch a serde attribute change that breaks the message
/// names other contexts match on.
#[test]
fn given_requests_when_serialized_then_tagged_by_type() {
    let get_code = serde_json::to_value(PageRequest::GetCode).expect("serializes");
    let analyze = serde_json::to_value(BackgroundRequest::AnalyzeCode {
        code: String::from("x = 1"),
    })
    .expect("serializes");

    assert_eq!(get_code, json!({ "type": "getCode" }));
    assert_eq!(analyze, json!({ "type": "analyzeCode", "code": "x = 1" }));
}

#[test]
fn given_extraction_failure_when_converted_then_error_only() {
    let reply = PageReply::from(Err(ExtractError::empty_text()));

    assert!(reply.code.is_none());
    assert_eq!(
        reply.error.as_deref(),
        Some("Found code container, but failed to extract text content.")
    );
    assert_eq!(
        serde_json::to_value(&reply).expect("serializes"),
        json!({ "error": "Found code container, but failed to extract text content." })
    );
}

/// **VALUE**: Verifies failed analyses forward the remote payload as details.
///
/// **BUG THIS CATCHES**: Would catch details being dropped, which hides the remote
/// error message from the popup.
#[test]
fn given_api_failure_when_converted_then_error_and_details() {
    let body = json!({ "error": { "message": "quota" } });

    let reply = AnalysisReply::from(Err(AnalysisError::api(429, None, Some(body.clone()))));

    assert!(reply.analysis.is_none());
    assert_eq!(reply.error.as_deref(), Some("Gemini API Error: quota"));
    assert_eq!(reply.details, Some(body));
}
