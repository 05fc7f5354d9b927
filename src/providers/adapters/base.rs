//! Base Provider Adapter
//! Runs the HTTP round trip shared by every provider adapter

use super::traits::{GenerateParams, GenerationResult, ProviderAdapter};
use crate::providers::constants::{MAX_RESPONSE_TOKENS, TOP_P};
use crate::providers::ProviderError;
use tracing::{debug, info};

const DEFAULT_TEMPERATURE: f64 = 0.7;
const ANSWER_PREVIEW_CHARS: usize = 50;

/// A live adapter bound to one enabled provider.
pub struct Adapter {
    inner: Box<dyn ProviderAdapter>,
    http: reqwest::Client,
}

impl Adapter {
    pub fn new(inner: Box<dyn ProviderAdapter>, http: reqwest::Client) -> Self {
        Self { inner, http }
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }

    pub fn model(&self) -> &str {
        &self.inner.config().model
    }

    /// Send one system + user exchange and return the answer with its token count.
    /// Single attempt; the deadline is whatever the HTTP client was built with.
    pub async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f64,
    ) -> Result<GenerationResult, ProviderError> {
        let provider = self.provider_name();
        let temperature = if temperature.is_nan() {
            DEFAULT_TEMPERATURE
        } else {
            temperature.clamp(0.0, 1.0)
        };
        let params = GenerateParams {
            system_prompt,
            user_prompt,
            temperature,
            max_tokens: MAX_RESPONSE_TOKENS,
            top_p: TOP_P,
        };

        info!(provider, model = self.model(), "calling AI provider");
        let body = self.inner.build_request_body(&params);
        debug!(provider, endpoint = %self.inner.endpoint(), "request body built");

        let response = self
            .http
            .post(self.inner.endpoint().clone())
            .bearer_auth(&self.inner.config().api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| ProviderError::call(provider, err))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ProviderError::call(provider, err))?;

        let result = self
            .inner
            .parse_response(status, &bytes)
            .map_err(|cause| ProviderError::call(provider, cause))?;

        info!(
            provider,
            tokens = result.tokens_used,
            answer = %preview(&result.answer),
            "AI provider responded"
        );
        Ok(result)
    }
}

fn preview(answer: &str) -> String {
    let mut chars = answer.chars();
    let head: String = chars.by_ref().take(ANSWER_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::adapters::openai::OpenAIAdapter;
    use crate::providers::ProviderConfig;

    #[test]
    fn preview_cuts_on_char_boundaries() {
        let long = "狗".repeat(60);
        let shown = preview(&long);
        assert_eq!(shown.chars().count(), ANSWER_PREVIEW_CHARS + 3);
        assert!(shown.ends_with("..."));
        assert_eq!(preview("dog"), "dog");
    }

    #[tokio::test]
    async fn temperature_is_clamped_before_sending() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(mockito::Matcher::PartialJson(
                serde_json::json!({"temperature": 1.0}),
            ))
            .with_status(200)
            .with_body(r#"{"choices": [{"message": {"content": "ok"}}], "usage": {"total_tokens": 1}}"#)
            .create_async()
            .await;

        let inner = OpenAIAdapter::new(ProviderConfig {
            name: "openai".to_string(),
            api_key: "sk".to_string(),
            base_url: Some(server.url()),
            model: "gpt-4o-mini".to_string(),
            enabled: true,
        })
        .unwrap();
        let adapter = Adapter::new(Box::new(inner), reqwest::Client::new());

        assert_eq!(adapter.provider_name(), "openai");
        assert_eq!(adapter.model(), "gpt-4o-mini");
        adapter.generate("sys", "q", 3.5).await.unwrap();
        mock.assert_async().await;
    }
}
