//! Provider configuration constants
//! Centralized defaults for all supported AI providers

/// Fixed provider list, in registry order
pub const PROVIDER_NAMES: &[&str] = &["openai", "deepseek", "qwen", "moonshot", "doubao", "glm"];

/// Base URLs for all providers
pub const PROVIDER_BASE_URLS: &[(&str, &str)] = &[
  ("openai", "https://api.openai.com/v1"),
  ("deepseek", "https://api.deepseek.com/v1"),
  ("moonshot", "https://api.moonshot.cn/v1"),
  ("doubao", "https://ark.cn-beijing.volces.com/api/v3"),
  ("glm", "https://open.bigmodel.cn/api/paas/v4"),
  // qwen goes through DashScope, which has its own endpoint layout
];

/// Default models for each provider
pub const DEFAULT_MODELS: &[(&str, &str)] = &[
  ("openai", "gpt-4o-mini"),
  ("deepseek", "deepseek-chat"),
  ("qwen", "qwen-turbo"),
  ("moonshot", "moonshot-v1-8k"),
  ("doubao", "ep-20240814170708-r523m"),
  ("glm", "glm-4-flash"),
];

pub const DASHSCOPE_BASE_URL: &str = "https://dashscope.aliyuncs.com/api/v1";

/// Answers are one-liners, so every request is capped hard.
pub const MAX_RESPONSE_TOKENS: u32 = 60;
pub const TOP_P: f64 = 0.9;

pub const API_KEY_SUFFIX: &str = "API_KEY";
pub const BASE_URL_SUFFIX: &str = "BASE_URL";
pub const MODEL_SUFFIX: &str = "MODEL";

/// Get base URL for a provider
pub fn get_base_url(provider: &str) -> Option<&'static str> {
  PROVIDER_BASE_URLS.iter().find(|(p, _)| *p == provider).map(|(_, url)| *url)
}

/// Get default model for a provider
pub fn get_default_model(provider: &str) -> Option<&'static str> {
  DEFAULT_MODELS.iter().find(|(p, _)| *p == provider).map(|(_, model)| *model)
}

/// Environment key for a provider setting, e.g. `("glm", "API_KEY")` -> `GLM_API_KEY`
pub fn env_key(provider: &str, suffix: &str) -> String {
  format!("{}_{}", provider.to_uppercase(), suffix)
}
