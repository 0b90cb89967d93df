//! System endpoints: health check and client configuration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Client-side configuration values safe to expose publicly.
#[derive(Debug, Serialize, ToSchema)]
struct ClientConfigResponse {
    payment_public_key: String,
    site_url: String,
}

/// `GET /config/client` — Public client configuration.
#[utoipa::path(
    get,
    path = "/config/client",
    tag = "System",
    summary = "Public client configuration",
    description = "Returns the payment widget public key and site URL for client bootstrap.",
    responses(
        (status = 200, description = "Public configuration", body = ClientConfigResponse),
    )
)]
pub async fn client_config_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ClientConfigResponse {
            payment_public_key: state.config.payment_public_key.clone(),
            site_url: state.config.site_url.clone(),
        }),
    )
}

/// System routes mounted at the root level (not under /api).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/client", get(client_config_handler))
}
