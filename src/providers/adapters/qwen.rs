//! Qwen Provider Adapter
//! Talks to Alibaba DashScope's native text-generation API, which does not
//! follow the chat-completions request or response layout

use super::openai::Usage;
use super::traits::{
    join_endpoint, non_empty_answer, ChatMessage, GenerateParams, GenerationResult, ProviderAdapter,
};
use crate::providers::constants::DASHSCOPE_BASE_URL;
use crate::providers::{CallFailure, ProviderConfig, ProviderError};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

const GENERATION_PATH: &str = "services/aigc/text-generation/generation";

pub struct QwenAdapter {
    config: ProviderConfig,
    endpoint: Url,
}

impl QwenAdapter {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        if !config.enabled {
            return Err(ProviderError::ProviderUnavailable {
                provider: config.name,
            });
        }

        let base_url = config.base_url.as_deref().unwrap_or(DASHSCOPE_BASE_URL);
        let endpoint = join_endpoint(base_url, GENERATION_PATH)
            .map_err(|err| ProviderError::call(&config.name, err))?;

        Ok(Self { config, endpoint })
    }
}

impl ProviderAdapter for QwenAdapter {
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
        serde_json::to_value(GenerationRequest {
            model: &self.config.model,
            input: GenerationInput {
                messages: params.messages(),
            },
            parameters: GenerationParameters {
                result_format: "message",
                max_tokens: params.max_tokens,
                temperature: params.temperature,
                top_p: params.top_p,
            },
        })
        .unwrap_or_default()
    }

    fn parse_response(
        &self,
        status: StatusCode,
        body: &[u8],
    ) -> Result<GenerationResult, CallFailure> {
        // DashScope reports failures through status_code + code/message; only 200 is a success
        if status != StatusCode::OK {
            let parsed: GenerationResponse = serde_json::from_slice(body).unwrap_or_default();
            return Err(CallFailure::Status {
                status: status.as_u16(),
                code: parsed.code.filter(|code| !code.is_empty()),
                message: parsed
                    .message
                    .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string()),
            });
        }

        let parsed: GenerationResponse =
            serde_json::from_slice(body).map_err(|err| CallFailure::Malformed(err.to_string()))?;
        let content = parsed
            .output
            .and_then(|output| output.choices.into_iter().next())
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);
        let answer = non_empty_answer(content)?;

        Ok(GenerationResult {
            answer,
            tokens_used: parsed.usage.map(|usage| usage.total_tokens).unwrap_or(0),
        })
    }
}

#[derive(Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    input: GenerationInput<'a>,
    parameters: GenerationParameters,
}

#[derive(Serialize)]
struct GenerationInput<'a> {
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct GenerationParameters {
    result_format: &'static str,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
}

#[derive(Debug, Default, Deserialize)]
struct GenerationResponse {
    output: Option<GenerationOutput>,
    usage: Option<Usage>,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerationOutput {
    #[serde(default)]
    choices: Vec<GenerationChoice>,
}

#[derive(Debug, Deserialize)]
struct GenerationChoice {
    message: Option<GenerationMessage>,
}

#[derive(Debug, Deserialize)]
struct GenerationMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::adapters::base::Adapter;
    use serde_json::json;
    use std::time::Duration;

    fn config(base_url: Option<String>) -> ProviderConfig {
        ProviderConfig {
            name: "qwen".to_string(),
            api_key: "dash-key".to_string(),
            base_url,
            model: "qwen-turbo".to_string(),
            enabled: true,
        }
    }

    fn adapter(server: &mockito::Server) -> Adapter {
        let inner = QwenAdapter::new(config(Some(format!("{}/api/v1", server.url())))).unwrap();
        Adapter::new(Box::new(inner), reqwest::Client::new())
    }

    #[test]
    fn defaults_to_dashscope_endpoint() {
        let adapter = QwenAdapter::new(config(None)).unwrap();
        assert_eq!(
            adapter.endpoint().as_str(),
            "https://dashscope.aliyuncs.com/api/v1/services/aigc/text-generation/generation"
        );
    }

    #[test]
    fn refuses_disabled_provider() {
        let mut cfg = config(None);
        cfg.api_key.clear();
        cfg.enabled = false;
        assert!(matches!(
            QwenAdapter::new(cfg),
            Err(ProviderError::ProviderUnavailable { .. })
        ));
    }

    #[test]
    fn request_body_nests_messages_and_parameters() {
        let adapter = QwenAdapter::new(config(None)).unwrap();
        let body = adapter.build_request_body(&GenerateParams {
            system_prompt: "sys",
            user_prompt: "usr",
            temperature: 0.5,
            max_tokens: 60,
            top_p: 0.9,
        });

        assert_eq!(body["model"], "qwen-turbo");
        assert_eq!(body["input"]["messages"][0]["role"], "system");
        assert_eq!(body["input"]["messages"][1]["content"], "usr");
        assert_eq!(body["parameters"]["result_format"], "message");
        assert_eq!(body["parameters"]["max_tokens"], 60);
        assert_eq!(body["parameters"]["temperature"], 0.5);
        assert!(body.get("messages").is_none());
    }

    #[tokio::test]
    async fn generate_reads_nested_output_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/services/aigc/text-generation/generation")
            .match_header("authorization", "Bearer dash-key")
            .match_body(mockito::Matcher::PartialJson(json!({
                "model": "qwen-turbo",
                "parameters": {"result_format": "message", "max_tokens": 60}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "status_code": 200,
                    "request_id": "abc",
                    "output": {
                        "choices": [
                            {"finish_reason": "stop", "message": {"role": "assistant", "content": "猫，安静 "}}
                        ]
                    },
                    "usage": {"input_tokens": 20, "output_tokens": 4, "total_tokens": 24}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let result = adapter(&server).generate("sys", "猫还是狗？", 0.9).await.unwrap();

        assert_eq!(result.answer, "猫，安静");
        assert_eq!(result.tokens_used, 24);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rate_limited_status_is_a_call_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/services/aigc/text-generation/generation")
            .with_status(429)
            .with_body(
                json!({
                    "code": "Throttling.RateQuota",
                    "message": "Requests rate limit exceeded, please try again later.",
                    "request_id": "abc"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let err = adapter(&server).generate("sys", "q", 0.7).await.unwrap_err();
        match err {
            ProviderError::ProviderCall {
                provider,
                cause: CallFailure::Status { status, code, message },
            } => {
                assert_eq!(provider, "qwen");
                assert_eq!(status, 429);
                assert_eq!(code.as_deref(), Some("Throttling.RateQuota"));
                assert!(message.starts_with("Requests rate limit exceeded"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_200_success_class_status_is_still_a_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/services/aigc/text-generation/generation")
            .with_status(202)
            .with_body(r#"{"output": {"choices": [{"message": {"content": "partial"}}]}}"#)
            .create_async()
            .await;

        let err = adapter(&server).generate("sys", "q", 0.7).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::ProviderCall { cause: CallFailure::Status { status: 202, .. }, .. }
        ));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_failure() {
        // bind then drop so the port is closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let inner = QwenAdapter::new(config(Some(format!("http://{addr}/api/v1")))).unwrap();
        let adapter = Adapter::new(Box::new(inner), reqwest::Client::new());

        let err = adapter.generate("sys", "q", 0.7).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::ProviderCall { cause: CallFailure::Transport(_), .. }
        ));
    }

    #[tokio::test]
    async fn non_json_200_body_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/services/aigc/text-generation/generation")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;

        let err = adapter(&server).generate("sys", "q", 0.7).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::ProviderCall { cause: CallFailure::Malformed(_), .. }
        ));
    }

    #[tokio::test]
    async fn missing_output_is_an_empty_answer() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/services/aigc/text-generation/generation")
            .with_status(200)
            .with_body(json!({"request_id": "abc", "usage": {"total_tokens": 3}}).to_string())
            .create_async()
            .await;

        let err = adapter(&server).generate("sys", "q", 0.7).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::ProviderCall { cause: CallFailure::EmptyAnswer, .. }
        ));
    }

    #[tokio::test]
    async fn failed_call_is_attempted_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/services/aigc/text-generation/generation")
            .with_status(500)
            .with_body(r#"{"code": "InternalError", "message": "busy"}"#)
            .expect(1)
            .create_async()
            .await;

        let err = adapter(&server).generate("sys", "q", 0.7).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::ProviderCall { cause: CallFailure::Status { status: 500, .. }, .. }
        ));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn silent_upstream_hits_the_request_deadline() {
        // accepts connections but never writes a response
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let holder = tokio::spawn(async move {
            let mut open = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                open.push(socket);
            }
        });

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(300))
            .build()
            .unwrap();
        let inner = QwenAdapter::new(config(Some(format!("http://{addr}/api/v1")))).unwrap();
        let adapter = Adapter::new(Box::new(inner), http);

        let started = std::time::Instant::now();
        let err = adapter.generate("sys", "q", 0.7).await.unwrap_err();
        assert!(started.elapsed() < Duration::from_secs(5));
        match err {
            ProviderError::ProviderCall {
                cause: CallFailure::Transport(cause),
                ..
            } => assert!(cause.is_timeout(), "{cause}"),
            other => panic!("unexpected error: {other:?}"),
        }
        holder.abort();
    }
}
