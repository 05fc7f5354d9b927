//! Service configuration
//! Everything is read once at startup from an environment-style key lookup

use std::time::Duration;

use crate::providers::constants::{
    env_key, PROVIDER_NAMES, API_KEY_SUFFIX, BASE_URL_SUFFIX, MODEL_SUFFIX,
};
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_PROVIDER: &str = "openai";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Top-level configuration for the answer service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub ai: AiConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Empty means any origin is accepted.
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Provider selection and credentials.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Lowercased provider name used when a request does not name one.
    pub default_provider: String,
    pub request_timeout: Duration,
    /// Raw per-provider settings in the fixed provider order.
    pub providers: Vec<ProviderSettings>,
}

/// Raw settings for one provider, before defaults are applied.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub name: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

impl ServiceConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match get("AI_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: "AI_REQUEST_TIMEOUT_SECS",
                    value: raw,
                })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let allowed_origins = get("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let providers = PROVIDER_NAMES
            .iter()
            .map(|name| ProviderSettings {
                name: name.to_string(),
                api_key: get(&env_key(name, API_KEY_SUFFIX)).unwrap_or_default(),
                base_url: get(&env_key(name, BASE_URL_SUFFIX)),
                model: get(&env_key(name, MODEL_SUFFIX)),
            })
            .collect();

        Ok(Self {
            server: ServerConfig {
                host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port,
                allowed_origins,
            },
            logging: LoggingConfig {
                level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                format: get("LOG_FORMAT").unwrap_or_else(|| "pretty".to_string()),
            },
            ai: AiConfig {
                default_provider: get("AI_PROVIDER")
                    .map(|name| name.to_lowercase())
                    .unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
                request_timeout: Duration::from_secs(timeout_secs),
                providers,
            },
        })
    }
}

impl LoggingConfig {
    /// Install the global tracing subscriber. `RUST_LOG` wins over `level`.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}
