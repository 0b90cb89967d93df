//! trackpitch server entry point.
//!
//! Starts the Axum HTTP server for the marketplace API.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use trackpitch::api;
use trackpitch::app_state::AppState;
use trackpitch::config::Config;
use trackpitch::store::postgres::PgStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env()?);
    tracing::info!(addr = %config.listen_addr, "starting trackpitch");

    // Connect to PostgreSQL and run migrations
    let store = Arc::new(PgStore::connect(&config).await?);

    // Build application state
    let app_state = AppState::new(store, Arc::clone(&config));

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
