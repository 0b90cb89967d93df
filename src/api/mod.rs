//! REST API layer: route handlers, DTOs, and router composition.
//!
//! JSON endpoints live under `/api`; the public tracking redirect is
//! additionally mounted at `/track/{slug}` for short links.

pub mod auth;
pub mod dto;
pub mod handlers;

use axum::Router;
use axum::routing::get;

use crate::app_state::AppState;

/// Builds the complete API router with all endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api", handlers::routes())
        .route("/track/{slug}", get(handlers::track::follow_slug))
        .merge(handlers::system::routes())
}
