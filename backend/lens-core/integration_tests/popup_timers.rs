// Popup flows that depend on timers. These run on a paused clock, so the
// background context is scripted instead of talking to a mock server.

use crate::helpers::{
    ANALYSIS_TEXT, PROBLEM_URL, page_context, popup, scripted_background, tabs_with,
    two_sum_page,
};

use lens_core::credential::{CredentialStore, MemoryCredentialStore};
use lens_core::error::PopupError;
use lens_core::messaging::AnalysisReply;
use lens_core::presenter::{CycleState, ResultPanel, StatusKind, StatusLine};

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

fn analysis_reply() -> AnalysisReply {
    AnalysisReply {
        analysis: Some(ANALYSIS_TEXT.to_string()),
        ..Default::default()
    }
}

async fn settle(duration_ms: u64) {
    tokio::time::sleep(Duration::from_millis(duration_ms)).await;
    tokio::task::yield_now().await;
}

/// **VALUE**: Verifies the success banner disappears after its delay and the result stays.
///
/// **BUG THIS CATCHES**: Would catch the timer clearing the result panel too, or never
/// firing.
#[tokio::test(start_paused = true)]
async fn given_successful_cycle_when_delay_elapses_then_status_cleared_result_kept() {
    // GIVEN: A completed cycle
    let (popup, _renderer) = popup(
        tabs_with(PROBLEM_URL, Some(page_context(two_sum_page()))),
        scripted_background(analysis_reply(), None),
        MemoryCredentialStore::new(),
    );
    popup.analyze().await.expect("analysis should succeed");

    // WHEN: Just under the delay
    settle(3_900).await;

    // THEN: Banner still shown
    assert_eq!(
        popup.surface().await.status_kind(),
        Some(StatusKind::Success)
    );

    // WHEN: Past the delay
    settle(200).await;

    // THEN: Banner gone, analysis still visible
    let surface = popup.surface().await;
    assert!(surface.status.is_none());
    assert_eq!(surface.result, ResultPanel::Analysis(ANALYSIS_TEXT.to_string()));
}

/// **VALUE**: Verifies a second trigger during an in-flight cycle is refused.
///
/// **WHY THIS MATTERS**: Overlapping cycles race on the status line and can show one
/// cycle's result under another's banner.
///
/// **BUG THIS CATCHES**: Would catch the in-flight check being skipped or the trigger
/// not being disabled while waiting on the background context.
#[tokio::test(start_paused = true)]
async fn given_cycle_in_flight_when_analyze_again_then_busy() {
    // GIVEN: A background context that holds its reply until released
    let gate = Arc::new(Notify::new());
    let (popup, _renderer) = popup(
        tabs_with(PROBLEM_URL, Some(page_context(two_sum_page()))),
        scripted_background(analysis_reply(), Some(gate.clone())),
        MemoryCredentialStore::new(),
    );
    let popup = Arc::new(popup);

    let first = tokio::spawn({
        let popup = Arc::clone(&popup);
        async move { popup.analyze().await }
    });

    while popup.cycle_state().await != CycleState::RequestingAnalysis {
        tokio::task::yield_now().await;
    }

    // WHEN: Triggering again
    let second = popup.analyze().await;

    // THEN: Refused, first cycle untouched
    assert!(matches!(second, Err(PopupError::Busy { .. })));
    let surface = popup.surface().await;
    assert!(!surface.analyze_enabled);
    assert_eq!(
        surface.status,
        Some(StatusLine::new(
            "Analyzing code with Gemini...",
            StatusKind::Info
        ))
    );

    // WHEN: The background answers
    gate.notify_one();
    let analysis = first
        .await
        .expect("task should not panic")
        .expect("first cycle should succeed");

    // THEN: First cycle completes normally
    assert_eq!(analysis, ANALYSIS_TEXT);
    assert!(popup.surface().await.analyze_enabled);
}

#[tokio::test(start_paused = true)]
async fn given_empty_analysis_when_analyze_then_unexpected_response_shown() {
    let (popup, _renderer) = popup(
        tabs_with(PROBLEM_URL, Some(page_context(two_sum_page()))),
        scripted_background(AnalysisReply::default(), None),
        MemoryCredentialStore::new(),
    );

    popup.analyze().await.expect_err("should fail");

    assert_eq!(
        popup.surface().await.result,
        ResultPanel::Error(String::from(
            "Failed: Received an unexpected or empty response from the background script."
        ))
    );
}

// ============================================
// API KEY MANAGEMENT
// ============================================

#[tokio::test(start_paused = true)]
async fn given_no_stored_key_when_open_then_warning_shown() {
    let (popup, _renderer) = popup(
        tabs_with(PROBLEM_URL, None),
        scripted_background(analysis_reply(), None),
        MemoryCredentialStore::new(),
    );

    popup.open().await;

    assert_eq!(
        popup.surface().await.api_key_status,
        Some(StatusLine::new(
            "API Key not set. Analysis will fail.",
            StatusKind::Error
        ))
    );
}

#[tokio::test(start_paused = true)]
async fn given_stored_key_when_open_then_input_populated() {
    let (popup, _renderer) = popup(
        tabs_with(PROBLEM_URL, None),
        scripted_background(analysis_reply(), None),
        MemoryCredentialStore::with_key("AIza-stored"),
    );

    popup.open().await;

    let surface = popup.surface().await;
    assert_eq!(surface.api_key_input, "AIza-stored");
    assert!(surface.api_key_status.is_none());
}

/// **VALUE**: Verifies input is trimmed before saving and the confirmation times out.
///
/// **BUG THIS CATCHES**: Would catch a pasted key with a trailing newline being stored
/// verbatim, which the API rejects as invalid.
#[tokio::test(start_paused = true)]
async fn given_padded_key_when_saved_then_trimmed_and_confirmation_cleared() {
    // GIVEN: A key pasted with surrounding whitespace
    let credentials = MemoryCredentialStore::new();
    let (popup, _renderer) = popup(
        tabs_with(PROBLEM_URL, None),
        scripted_background(analysis_reply(), None),
        credentials.clone(),
    );
    popup.set_api_key_input("  AIza-new\n").await;

    // WHEN: Saving
    popup.save_api_key().await.expect("save should succeed");

    // THEN: Trimmed key stored, confirmation shown then cleared
    let stored = credentials.get().await.expect("get").expect("key stored");
    assert_eq!(stored.as_str(), "AIza-new");
    assert_eq!(
        popup.surface().await.api_key_status,
        Some(StatusLine::new("API Key saved!", StatusKind::Success))
    );

    settle(3_100).await;
    assert!(popup.surface().await.api_key_status.is_none());
}

/// **VALUE**: Verifies a stale timer does not clear a newer message.
///
/// **BUG THIS CATCHES**: Would catch the first save's timer wiping the "cleared"
/// confirmation of a later action.
#[tokio::test(start_paused = true)]
async fn given_save_then_clear_when_first_timer_fires_then_newer_message_kept() {
    // GIVEN: A saved key
    let credentials = MemoryCredentialStore::new();
    let (popup, _renderer) = popup(
        tabs_with(PROBLEM_URL, None),
        scripted_background(analysis_reply(), None),
        credentials.clone(),
    );
    popup.set_api_key_input("AIza-new").await;
    popup.save_api_key().await.expect("save should succeed");

    // WHEN: Clearing one second later with blank input
    settle(1_000).await;
    popup.set_api_key_input("   ").await;
    popup.save_api_key().await.expect("clear should succeed");

    // THEN: Key removed, "cleared" message survives the first timer
    assert!(credentials.get().await.expect("get").is_none());
    settle(2_100).await;
    assert_eq!(
        popup.surface().await.api_key_status,
        Some(StatusLine::new("API Key cleared!", StatusKind::Info))
    );

    // THEN: ...and goes away on its own timer
    settle(1_000).await;
    assert!(popup.surface().await.api_key_status.is_none());
}

#[tokio::test(start_paused = true)]
async fn given_storage_failure_when_saved_then_error_shown_and_kept() {
    let (popup, _renderer) = popup(
        tabs_with(PROBLEM_URL, None),
        scripted_background(analysis_reply(), None),
        MemoryCredentialStore::failing("quota exceeded"),
    );
    popup.set_api_key_input("AIza-new").await;

    let result = popup.save_api_key().await;

    assert!(result.is_err());
    settle(5_000).await;
    assert_eq!(
        popup.surface().await.api_key_status,
        Some(StatusLine::new(
            "Error saving key: quota exceeded",
            StatusKind::Error
        ))
    );
}
