//! Provider Adapter Traits
//! Defines the interface for all provider adapters

use crate::providers::{CallFailure, ProviderConfig};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

/// Sampling parameters for one generate call
#[derive(Debug, Clone, Copy)]
pub struct GenerateParams<'a> {
    pub system_prompt: &'a str,
    pub user_prompt: &'a str,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
}

impl<'a> GenerateParams<'a> {
    /// System message followed by the user message
    pub fn messages(&self) -> [ChatMessage<'a>; 2] {
        [
            ChatMessage {
                role: "system",
                content: self.system_prompt,
            },
            ChatMessage {
                role: "user",
                content: self.user_prompt,
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Answer text plus the token count reported by the vendor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub answer: String,
    pub tokens_used: u32,
}

/// Provider adapter trait
/// Each implementation owns exactly one wire shape: how the request body
/// looks and how the response envelope is read.
pub trait ProviderAdapter: Send + Sync {
    /// Get provider name
    fn provider_name(&self) -> &str;

    /// Get provider configuration
    fn config(&self) -> &ProviderConfig;

    /// Fully-qualified URL the request is POSTed to
    fn endpoint(&self) -> &Url;

    /// Build the JSON request body for this provider
    fn build_request_body(&self, params: &GenerateParams<'_>) -> serde_json::Value;

    /// Turn the raw HTTP status and body into a result
    fn parse_response(
        &self,
        status: StatusCode,
        body: &[u8],
    ) -> Result<GenerationResult, CallFailure>;
}

/// Append a path to a base URL, keeping every segment of the base.
pub(crate) fn join_endpoint(base_url: &str, path: &str) -> Result<Url, CallFailure> {
    let raw = format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'));
    Ok(Url::parse(&raw)?)
}

/// Trim the answer and reject it when nothing is left.
pub(crate) fn non_empty_answer(content: Option<String>) -> Result<String, CallFailure> {
    content
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(CallFailure::EmptyAnswer)
}
