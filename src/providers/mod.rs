//! Providers module
//! Centralized provider management for AI models

pub mod adapters;
pub mod constants;
pub mod error;
pub mod registry;

pub use adapters::{AdapterFactory, GenerationResult};
pub use constants::PROVIDER_NAMES;
pub use error::{CallFailure, ProviderError};
pub use registry::{ProviderConfig, ProviderRegistry};

/// Check if a provider is one of the fixed supported names
pub fn is_supported_provider(provider: &str) -> bool {
    PROVIDER_NAMES.contains(&provider)
}
