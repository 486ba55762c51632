use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::service::RuleConfigService;

use super::response::{no_store_json, ErrorResponse, HealthResponse};

/// Path the catalog page fetches first.
pub const CONFIG_PATH: &str = "/config.json";

/// Path the catalog page tries when the primary one fails.
pub const FALLBACK_CONFIG_PATH: &str = "/engine/config.json";

/// Shared application state.
pub struct AppState {
    /// Merges defaults with the deployment's override
    pub service: RuleConfigService,

    /// Application version
    pub version: String,
}

/// Create the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    Router::new()
        .route(CONFIG_PATH, get(handle_config))
        .route(FALLBACK_CONFIG_PATH, get(handle_config))
        .route("/health", get(handle_health))
        .route("/metrics", get(handle_metrics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the effective pricing rules.
async fn handle_config(State(state): State<Arc<AppState>>) -> Response {
    let start = Instant::now();
    let metrics = state.service.metrics();
    metrics.record_request();

    let effective = state.service.get_effective_config().await;

    match serde_json::to_vec(&effective) {
        Ok(body) => {
            debug!(
                categories = effective.len(),
                latency_us = start.elapsed().as_micros() as u64,
                "Config served"
            );
            no_store_json(StatusCode::OK, body)
        }
        Err(e) => {
            metrics.record_serialization_error();
            error!(error = %e, "Failed to serialize effective config");
            ErrorResponse::internal_error("failed to serialize configuration").into_response()
        }
    }
}

/// Health check endpoint.
async fn handle_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let service = &state.service;

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        deployment_id: service.deployment_id().to_string(),
        override_provider: service.provider_kind().to_string(),
        default_categories: service.defaults().len(),
        uptime_secs: service.metrics().uptime_secs(),
    })
}

/// Metrics endpoint (Prometheus format).
async fn handle_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        state.service.metrics().to_prometheus(),
    )
}
