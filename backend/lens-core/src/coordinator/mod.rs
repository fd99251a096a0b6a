//! Background-context analysis coordinator.
//!
//! Reads the stored credential, wraps the code in the instruction template,
//! makes exactly one `generateContent` call and folds the outcome into
//! `Result<String, AnalysisError>`. No caching, no retry.

pub mod gemini;
pub mod prompt;

pub use gemini::{GenerateContentRequest, GenerateContentResponse, GenerationConfig};
pub use prompt::build_prompt;

use crate::config::ApiConfig;
use crate::credential::CredentialStore;
use crate::error::AnalysisError;

use log::{debug, error, info, warn};
use reqwest::Client;
use serde_json::Value;
use url::Url;

const API_KEY_QUERY_PARAM: &str = "key";

#[derive(Clone)]
pub struct Analyzer<S: CredentialStore> {
    client: Client,
    endpoint: Url,
    generation: GenerationConfig,
    credentials: S,
}

impl<S: CredentialStore> Analyzer<S> {
    /// Build an analyzer for `api.endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Endpoint`] if the endpoint is not a valid URL
    /// or the HTTP client cannot be built.
    pub fn new(api: &ApiConfig, credentials: S) -> Result<Self, AnalysisError> {
        let endpoint = Url::parse(&api.endpoint).map_err(|e| {
            AnalysisError::endpoint(format!("Invalid endpoint '{}': {}", api.endpoint, e))
        })?;

        let client = Client::builder()
            .timeout(api.request_timeout())
            .build()
            .map_err(|e| AnalysisError::endpoint(format!("HTTP client setup failed: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            generation: GenerationConfig {
                temperature: api.temperature,
                max_output_tokens: api.max_output_tokens,
            },
            credentials,
        })
    }

    /// Analyze `code` and return the model's text verbatim.
    ///
    /// A missing credential or empty code fails before any network traffic.
    pub async fn analyze(&self, code: &str) -> Result<String, AnalysisError> {
        let api_key = match self.credentials.get().await {
            Ok(Some(key)) => key,
            Ok(None) => {
                error!("API key not found in storage");
                return Err(AnalysisError::credential_missing());
            }
            Err(e) => {
                error!("Failed to read API key: {}", e);
                return Err(AnalysisError::credential(format!(
                    "Could not read API key: {}",
                    e.message()
                )));
            }
        };

        if code.is_empty() {
            return Err(AnalysisError::no_code());
        }

        let request =
            GenerateContentRequest::from_prompt(build_prompt(code), self.generation);

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair(API_KEY_QUERY_PARAM, api_key.as_str());

        info!(
            "Sending analysis request to {} ({} chars of code)",
            self.endpoint,
            code.chars().count()
        );

        // without_url(): the URL carries the key.
        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::from_reqwest(&e.without_url()))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| AnalysisError::from_reqwest(&e.without_url()))?;

        let body: Value = serde_json::from_str(&body_text).map_err(|e| {
            warn!("Response body is not JSON (HTTP {})", status.as_u16());
            AnalysisError::network(e)
        })?;

        if !status.is_success() {
            error!("Remote API returned HTTP {}", status.as_u16());
            return Err(AnalysisError::api(
                status.as_u16(),
                status.canonical_reason(),
                Some(body),
            ));
        }

        interpret_response(body)
    }
}

/// Fold a 2xx body into the analysis text or a descriptive error.
///
/// Precedence: generated text, then a non-content finish reason, then a
/// prompt-level block, then "could not parse".
pub fn interpret_response(body: Value) -> Result<String, AnalysisError> {
    let response: GenerateContentResponse = match serde_json::from_value(body.clone()) {
        Ok(response) => response,
        Err(e) => {
            warn!("Unexpected response shape: {}", e);
            return Err(AnalysisError::unparseable(body));
        }
    };

    if let Some(text) = response.first_text() {
        debug!("Extracted analysis ({} chars)", text.len());
        return Ok(text.to_string());
    }

    if let Some(candidate) = response.candidates.first() {
        if let Some(reason) = &candidate.finish_reason {
            warn!("Generation finished with reason: {}", reason);
            return Err(AnalysisError::incomplete(
                reason.clone(),
                candidate.safety_ratings.as_ref(),
                body,
            ));
        }
    }

    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.clone())
    {
        warn!("Prompt blocked. Reason: {}", reason);
        return Err(AnalysisError::blocked(reason, body));
    }

    error!("Could not extract analysis text from response structure");
    Err(AnalysisError::unparseable(body))
}
