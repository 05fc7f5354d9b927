use std::sync::Arc;
use tracing::{info, warn};

mod answer;
mod config;
mod providers;
mod server;

use answer::AnswerService;
use config::ServiceConfig;
use providers::{is_supported_provider, AdapterFactory, ProviderRegistry};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load config: {err}");
            std::process::exit(1);
        }
    };
    config.logging.init();

    let registry = Arc::new(ProviderRegistry::new(&config.ai));
    report_providers(&registry);

    let factory = match AdapterFactory::new(registry, config.ai.request_timeout) {
        Ok(factory) => factory,
        Err(err) => {
            eprintln!("Failed to build HTTP client: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = server::serve(config.server, AnswerService::new(factory)).await {
        eprintln!("AI service failed: {err}");
        std::process::exit(1);
    }
}

fn report_providers(registry: &ProviderRegistry) {
    let current = registry.default_provider();
    let available = registry.available();
    info!(current, ?available, "providers loaded");

    if !is_supported_provider(current) {
        warn!(
            current,
            "AI_PROVIDER is not a supported provider; requests without an override will use fallback answers"
        );
    } else if available.is_empty() {
        warn!("no AI provider is configured; all answers will be fallback answers");
    } else if !available.contains(&current) {
        warn!(
            current,
            using = available[0],
            "default provider has no API key; requests will be served by the first available provider"
        );
    }
}
