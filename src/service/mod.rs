use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use log::info;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::pipelines::text_classification::Analysis;

/// Service configuration
pub mod config;

/// Service errors and their HTTP mapping
pub mod error;

/// Startup state shared by the handlers
pub mod state;

pub use config::{ConfigError, ServiceConfig};
pub use error::ServiceError;
pub use state::{AppContext, Health, Info, ModelState};

/// Body of an analysis request
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// The raw article text
    #[serde(default)]
    pub text: Option<String>,
}

/// Build the HTTP router around a loaded context
pub fn router(context: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(context)
}

/// Load the artifacts and answer requests until the process is stopped
pub async fn serve(config: &ServiceConfig) -> std::io::Result<()> {
    let context = Arc::new(AppContext::load(&config.models_dir));

    let listener = TcpListener::bind(config.address()).await?;

    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(context)).await
}

async fn index() -> Json<Info> {
    Json(AppContext::info())
}

async fn health(State(context): State<Arc<AppContext>>) -> Json<Health> {
    Json(context.health())
}

async fn analyze(
    State(context): State<Arc<AppContext>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<Analysis>, ServiceError> {
    let Json(request) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServiceError::PayloadTooLarge(rejection.body_text())
        } else {
            ServiceError::MalformedRequest(rejection.body_text())
        }
    })?;

    context.analyze(request.text.as_deref()).map(Json)
}
