//! Test helpers for end-to-end popup tests.
//!
//! - A mock generateContent endpoint (wiremock)
//! - Page snapshots shaped like the real editor markup
//! - Scripted background contexts for tests that must not touch the network

use lens_core::config::{ApiConfig, UiConfig};
use lens_core::coordinator::Analyzer;
use lens_core::credential::MemoryCredentialStore;
use lens_core::extractor::{Extractor, HtmlDocument};
use lens_core::messaging::{
    AnalysisReply, BACKGROUND_CONTEXT, BackgroundRequest, BrowserTabs, INBOX_CAPACITY, Mailbox,
    PageReply, PageRequest, Tab, channel, spawn_background_context, spawn_page_context,
};
use lens_core::presenter::{Popup, PopupSurface, Renderer};

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use tokio::sync::Notify;
use wiremock::{MockServer, Request, Respond, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-key-12345";
pub const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";
pub const PROBLEM_URL: &str = "https://leetcode.com/problems/two-sum/";
pub const ANALYSIS_TEXT: &str = "Time Complexity: O(N)\nSpace Complexity: O(N)";

/// Source lines of the editor in [`two_sum_page`], as the user typed them.
pub const TWO_SUM_LINES: [&str; 7] = [
    "class Solution:",
    "    def twoSum(self, nums, target):",
    "\tseen = {}",
    "",
    "        for i, n in enumerate(nums):",
    "            if target - n in seen: return [seen[target - n], i]",
    "            seen[n] = i",
];

pub fn two_sum_code() -> String {
    TWO_SUM_LINES.join("\n")
}

/// Problem page with a Monaco editor; leading spaces rendered as `&nbsp;`.
pub fn two_sum_page() -> String {
    let lines: String = TWO_SUM_LINES
        .iter()
        .map(|line| {
            let indent = line.len() - line.trim_start_matches(' ').len();
            format!(
                r#"<div class="view-line"><span>{}{}</span></div>"#,
                "&nbsp;".repeat(indent),
                &line[indent..]
            )
        })
        .collect();

    format!(
        r#"<html><body>
        <div class="description"><pre>Input: nums = [2,7,11,15], target = 9 Output: [0,1] Explanation: nums[0] + nums[1] == 9</pre></div>
        <div class="monaco-editor"><div class="view-lines">{lines}</div></div>
        </body></html>"#
    )
}

pub fn empty_page() -> String {
    String::from("<html><body><p>Loading...</p></body></html>")
}

pub fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        endpoint: format!("{}{}", server.uri(), GENERATE_PATH),
        ..ApiConfig::default()
    }
}

pub fn success_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }]
    })
}

/// Prompt text of a captured generateContent request.
pub fn prompt_of(body: &[u8]) -> String {
    let value: Value = serde_json::from_slice(body).expect("request body is JSON");
    value["contents"][0]["parts"][0]["text"]
        .as_str()
        .expect("prompt text present")
        .to_string()
}

/// Answers each generateContent call with the fenced code from its prompt.
pub struct EchoCode;

impl Respond for EchoCode {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let prompt = prompt_of(&request.body);
        let code = prompt
            .split_once("```\n")
            .and_then(|(_, rest)| rest.rsplit_once("\n```"))
            .map(|(code, _)| code.to_string())
            .expect("prompt carries a fenced code block");
        ResponseTemplate::new(200).set_body_json(success_body(&code))
    }
}

pub fn page_context(html: String) -> Mailbox<PageRequest, PageReply> {
    spawn_page_context(move || HtmlDocument::parse(&html), Extractor::new())
}

pub fn background_context(
    server: &MockServer,
    credentials: MemoryCredentialStore,
) -> Mailbox<BackgroundRequest, AnalysisReply> {
    let analyzer = Analyzer::new(&api_config(server), credentials).expect("valid analyzer");
    spawn_background_context(analyzer)
}

/// Background context answering every request with `reply`.
///
/// With a `gate`, each reply waits for one `notify_one`.
pub fn scripted_background(
    reply: AnalysisReply,
    gate: Option<Arc<Notify>>,
) -> Mailbox<BackgroundRequest, AnalysisReply> {
    let (mailbox, mut inbox) = channel(BACKGROUND_CONTEXT, INBOX_CAPACITY);

    tokio::spawn(async move {
        while let Some(envelope) = inbox.recv().await {
            if let Some(gate) = &gate {
                gate.notified().await;
            }
            envelope.responder.reply(reply.clone());
        }
    });

    mailbox
}

pub fn tabs_with(url: &str, page: Option<Mailbox<PageRequest, PageReply>>) -> BrowserTabs {
    let mut tabs = BrowserTabs::new();
    tabs.open(Tab::new(1, url), page);
    tabs
}

/// Records the status line of every rendered frame.
#[derive(Default)]
pub struct RecordingRenderer {
    frames: Mutex<Vec<Option<String>>>,
}

impl RecordingRenderer {
    /// Distinct status messages in the order they were shown.
    pub fn statuses(&self) -> Vec<String> {
        let frames = self.frames.lock().expect("renderer lock");
        let mut statuses: Vec<String> = Vec::new();
        for message in frames.iter().flatten() {
            if statuses.last() != Some(message) {
                statuses.push(message.clone());
            }
        }
        statuses
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, surface: &PopupSurface) {
        let status = surface.status.as_ref().map(|line| line.message.clone());
        self.frames.lock().expect("renderer lock").push(status);
    }
}

pub fn popup(
    tabs: BrowserTabs,
    background: Mailbox<BackgroundRequest, AnalysisReply>,
    credentials: MemoryCredentialStore,
) -> (Popup<MemoryCredentialStore>, Arc<RecordingRenderer>) {
    let renderer = Arc::new(RecordingRenderer::default());
    let popup = Popup::new(tabs, background, credentials, UiConfig::default())
        .with_renderer(renderer.clone());
    (popup, renderer)
}
