//! Provider registry
//! Immutable name -> settings mapping built once at startup

use crate::config::AiConfig;
use crate::providers::constants::{get_base_url, get_default_model};

/// Resolved connection settings for one provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub name: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: String,
    /// True iff an API key was supplied.
    pub enabled: bool,
}

impl ProviderConfig {
    fn from_settings(settings: &crate::config::ProviderSettings) -> Self {
        let api_key = settings.api_key.trim().to_string();
        let base_url = settings
            .base_url
            .clone()
            .or_else(|| get_base_url(&settings.name).map(str::to_string));
        let model = settings
            .model
            .clone()
            .or_else(|| get_default_model(&settings.name).map(str::to_string))
            .unwrap_or_default();

        Self {
            name: settings.name.clone(),
            enabled: !api_key.is_empty(),
            api_key,
            base_url,
            model,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: Vec<ProviderConfig>,
    default_provider: String,
}

impl ProviderRegistry {
    pub fn new(config: &AiConfig) -> Self {
        let mut providers: Vec<ProviderConfig> = Vec::with_capacity(config.providers.len());
        for settings in &config.providers {
            // first entry wins so keys stay unique
            if providers.iter().any(|p| p.name == settings.name) {
                continue;
            }
            providers.push(ProviderConfig::from_settings(settings));
        }

        Self {
            providers,
            default_provider: config.default_provider.clone(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.name == name)
    }

    /// Enabled provider names in registry order.
    pub fn available(&self) -> Vec<&str> {
        self.providers
            .iter()
            .filter(|p| p.enabled)
            .map(|p| p.name.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.iter()
    }

    pub fn default_provider(&self) -> &str {
        &self.default_provider
    }
}
