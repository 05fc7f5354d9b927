use axum::{
  Router,
  extract::{Json, Query, State},
  http::{HeaderValue, Method, StatusCode},
  response::IntoResponse,
  routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::answer::{AnswerRequest, AnswerResponse, AnswerService};
use crate::config::ServerConfig;
use crate::providers::ProviderRegistry;

const SERVICE_NAME: &str = "AmIAI - AI Service";

#[derive(Clone)]
struct AppState {
  service: AnswerService,
}

impl AppState {
  fn registry(&self) -> &ProviderRegistry {
    self.service.factory().registry()
  }
}

#[derive(Debug, Deserialize)]
struct ProviderQuery {
  provider: Option<String>,
}

pub async fn serve(
  config: ServerConfig,
  service: AnswerService,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  let app = router(service, &config.allowed_origins);

  let listener = bind_listener(&config).await?;
  let addr = listener.local_addr()?;

  info!(%addr, "AmIAI AI service listening");

  axum::serve(listener, app).await?;
  Ok(())
}

/// Bind `host:port`, resolving hostnames such as `localhost`.
pub async fn bind_listener(config: &ServerConfig) -> std::io::Result<tokio::net::TcpListener> {
  tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await
}

pub fn router(service: AnswerService, allowed_origins: &[String]) -> Router {
  let cors = if allowed_origins.is_empty() {
    CorsLayer::new()
      .allow_origin(Any)
      .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
      .allow_headers(Any)
  } else {
    let origins = allowed_origins
      .iter()
      .filter_map(|origin| HeaderValue::from_str(origin).ok())
      .collect::<Vec<_>>();
    CorsLayer::new()
      .allow_origin(origins)
      .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
      .allow_headers(Any)
  };

  Router::new()
    .route("/", get(root))
    .route("/health", get(health))
    .route("/providers", get(list_providers))
    .route("/generate-answer", post(generate_answer))
    .with_state(AppState { service })
    .layer(cors)
}

async fn root(State(state): State<AppState>) -> impl IntoResponse {
  let registry = state.registry();
  let current = registry.default_provider();
  let model = registry
    .lookup(current)
    .map(|config| config.model.as_str())
    .unwrap_or("unknown");

  Json(json!({
    "name": SERVICE_NAME,
    "version": env!("CARGO_PKG_VERSION"),
    "status": "running",
    "current_provider": current,
    "available_providers": registry.available(),
    "model": model,
  }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
  let registry = state.registry();
  let available = registry.available();
  Json(json!({
    "status": "healthy",
    "current_provider": registry.default_provider(),
    "providers_count": available.len(),
    "available_providers": available,
  }))
}

async fn list_providers(State(state): State<AppState>) -> impl IntoResponse {
  let registry = state.registry();
  let current = registry.default_provider();
  let providers = registry
    .iter()
    .map(|config| {
      json!({
        "name": config.name,
        "enabled": config.enabled,
        "model": config.model,
        "current": config.name == current,
      })
    })
    .collect::<Vec<_>>();

  Json(json!({ "providers": providers, "current": current }))
}

async fn generate_answer(
  State(state): State<AppState>,
  Query(query): Query<ProviderQuery>,
  Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, (StatusCode, Json<Value>)> {
  payload.validate().map_err(|message| unprocessable(&message))?;

  let response = state.service.answer(&payload, query.provider.as_deref()).await;
  Ok(Json(response))
}

fn unprocessable(message: &str) -> (StatusCode, Json<Value>) {
  (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "error": message })))
}
