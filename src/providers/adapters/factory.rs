//! Provider Adapter Factory
//! Creates the appropriate adapter based on provider name

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::base::Adapter;
use super::openai::OpenAIAdapter;
use super::qwen::QwenAdapter;
use super::traits::ProviderAdapter;
use crate::providers::{ProviderConfig, ProviderError, ProviderRegistry};

/// Wire protocol family of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterKind {
    ChatCompletion,
    DashScope,
}

// Provider name -> protocol family
static ADAPTER_KINDS: Lazy<HashMap<&'static str, AdapterKind>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // OpenAI and compatible
    map.insert("openai", AdapterKind::ChatCompletion);
    map.insert("deepseek", AdapterKind::ChatCompletion);
    map.insert("moonshot", AdapterKind::ChatCompletion);
    map.insert("doubao", AdapterKind::ChatCompletion);
    map.insert("glm", AdapterKind::ChatCompletion);

    // Qwen (DashScope native API)
    map.insert("qwen", AdapterKind::DashScope);

    map
});

impl AdapterKind {
    pub fn for_provider(provider: &str) -> Option<Self> {
        ADAPTER_KINDS.get(provider).copied()
    }

    fn build(self, config: ProviderConfig) -> Result<Box<dyn ProviderAdapter>, ProviderError> {
        let adapter: Box<dyn ProviderAdapter> = match self {
            AdapterKind::ChatCompletion => Box::new(OpenAIAdapter::new(config)?),
            AdapterKind::DashScope => Box::new(QwenAdapter::new(config)?),
        };
        Ok(adapter)
    }
}

/// Resolves a requested (or default) provider name to a live adapter
#[derive(Clone)]
pub struct AdapterFactory {
    registry: Arc<ProviderRegistry>,
    http: reqwest::Client,
}

impl AdapterFactory {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        request_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(request_timeout).build()?;
        Ok(Self::with_client(registry, http))
    }

    pub fn with_client(registry: Arc<ProviderRegistry>, http: reqwest::Client) -> Self {
        Self { registry, http }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Resolve `requested` (or the configured default) to an adapter.
    ///
    /// A known but disabled provider is swapped for the first available one;
    /// the swap is logged but not reported to the caller.
    pub fn resolve(&self, requested: Option<&str>) -> Result<Adapter, ProviderError> {
        let requested = requested
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.registry.default_provider());
        let name = requested.trim().to_lowercase();

        if AdapterKind::for_provider(&name).is_none() {
            return Err(ProviderError::UnknownProvider { provider: name });
        }

        let available = self.registry.available();
        let resolved = if available.contains(&name.as_str()) {
            name
        } else {
            let Some(first) = available.first() else {
                return Err(ProviderError::NoProviderConfigured);
            };
            warn!(
                requested = %name,
                using = %first,
                "requested provider not available, substituting"
            );
            first.to_string()
        };

        self.build(&resolved)
    }

    /// Construct the adapter for an exact provider name, without substitution.
    pub fn build(&self, provider: &str) -> Result<Adapter, ProviderError> {
        let kind =
            AdapterKind::for_provider(provider).ok_or_else(|| ProviderError::UnknownProvider {
                provider: provider.to_string(),
            })?;
        let config = self
            .registry
            .lookup(provider)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownProvider {
                provider: provider.to_string(),
            })?;

        let inner = kind.build(config)?;
        Ok(Adapter::new(inner, self.http.clone()))
    }
}
