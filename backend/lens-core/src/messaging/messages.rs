//! Typed messages exchanged between contexts.
//!
//! Replies keep the loose `{code | error}` / `{analysis | error, details}`
//! shape of the wire format; the popup decides what an absent field means.

use crate::error::{AnalysisError, ExtractError};

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PageRequest {
    GetCode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<String, ExtractError>> for PageReply {
    fn from(result: Result<String, ExtractError>) -> Self {
        match result {
            Ok(code) => PageReply {
                code: Some(code),
                error: None,
            },
            Err(e) => PageReply {
                code: None,
                error: Some(e.message().to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BackgroundRequest {
    AnalyzeCode { code: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<Result<String, AnalysisError>> for AnalysisReply {
    fn from(result: Result<String, AnalysisError>) -> Self {
        match result {
            Ok(analysis) => AnalysisReply {
                analysis: Some(analysis),
                ..Default::default()
            },
            Err(e) => AnalysisReply {
                analysis: None,
                error: Some(e.message().to_string()),
                details: e.details().cloned(),
            },
        }
    }
}
