//! Provider layer errors

/// Why a single `generate` call failed.
#[derive(Debug, thiserror::Error)]
pub enum CallFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("status {status}{}: {message}", code_suffix(.code))]
    Status {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("response contained no answer")]
    EmptyAnswer,
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("no AI provider is configured; set at least one provider API key")]
    NoProviderConfigured,
    #[error("provider {provider} is not available (missing API key)")]
    ProviderUnavailable { provider: String },
    #[error("unknown provider: {provider}")]
    UnknownProvider { provider: String },
    #[error("{provider} API error: {cause}")]
    ProviderCall {
        provider: String,
        #[source]
        cause: CallFailure,
    },
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref().map(|c| format!(" ({c})")).unwrap_or_default()
}

impl ProviderError {
    pub(crate) fn call(provider: &str, cause: impl Into<CallFailure>) -> Self {
        Self::ProviderCall {
            provider: provider.to_string(),
            cause: cause.into(),
        }
    }
}
