//! OpenAI Compatible Provider Adapter
//! Handles every vendor that speaks the chat-completions protocol
//! (OpenAI, DeepSeek, Moonshot, Doubao, GLM)

use super::traits::{
    join_endpoint, non_empty_answer, GenerateParams, GenerationResult, ProviderAdapter,
};
use crate::providers::constants::get_base_url;
use crate::providers::{CallFailure, ProviderConfig, ProviderError};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

const CHAT_COMPLETIONS_PATH: &str = "chat/completions";

pub struct OpenAIAdapter {
    config: ProviderConfig,
    endpoint: Url,
}

impl OpenAIAdapter {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        if !config.enabled {
            return Err(ProviderError::ProviderUnavailable {
                provider: config.name,
            });
        }

        // Same behavior as the official client: no base URL means OpenAI itself
        let base_url = config
            .base_url
            .as_deref()
            .or_else(|| get_base_url("openai"))
            .unwrap_or_default();
        let endpoint = join_endpoint(base_url, CHAT_COMPLETIONS_PATH)
            .map_err(|err| ProviderError::call(&config.name, err))?;

        Ok(Self { config, endpoint })
    }
}

impl ProviderAdapter for OpenAIAdapter {
    fn provider_name(&self) -> &str {
        &self.config.name
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build_request_body(&self, params: &GenerateParams<'_>) -> Value {
        serde_json::to_value(ChatRequest {
            model: &self.config.model,
            messages: params.messages(),
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
        })
        .unwrap_or_default()
    }

    fn parse_response(
        &self,
        status: StatusCode,
        body: &[u8],
    ) -> Result<GenerationResult, CallFailure> {
        if !status.is_success() {
            let envelope: ErrorEnvelope = serde_json::from_slice(body).unwrap_or_default();
            let detail = envelope.error.unwrap_or_default();
            return Err(CallFailure::Status {
                status: status.as_u16(),
                code: detail.code.and_then(code_to_string),
                message: detail
                    .message
                    .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string()),
            });
        }

        let parsed: ChatResponse =
            serde_json::from_slice(body).map_err(|err| CallFailure::Malformed(err.to_string()))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);
        let answer = non_empty_answer(content)?;

        Ok(GenerationResult {
            answer,
            tokens_used: parsed.usage.map(|usage| usage.total_tokens).unwrap_or(0),
        })
    }
}

fn code_to_string(code: Value) -> Option<String> {
    match code {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [super::traits::ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<AssistantMessage>,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Usage {
    #[serde(default)]
    pub(crate) total_tokens: u32,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
    code: Option<Value>,
}
