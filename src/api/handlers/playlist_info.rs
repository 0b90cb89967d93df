//! Playlist metadata lookup endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::PlaylistInfoRequest;
use crate::app_state::AppState;
use crate::domain::normalize_url;
use crate::error::{ApiError, ErrorResponse};
use crate::service::playlist_info::{PlaylistInfo, fetch_playlist_info};

/// `POST /api/playlist-info` — Scrape a playlist page's Open Graph
/// metadata.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] on a missing URL and
/// [`ApiError::Upstream`] when the page cannot be fetched.
#[utoipa::path(
    post,
    path = "/api/playlist-info",
    tag = "Playlists",
    summary = "Look up playlist page metadata",
    request_body = PlaylistInfoRequest,
    responses(
        (status = 200, description = "Metadata extracted", body = PlaylistInfo),
        (status = 400, description = "Missing URL", body = ErrorResponse),
        (status = 500, description = "Fetch failure", body = ErrorResponse),
    )
)]
pub async fn lookup_playlist_info(
    State(state): State<AppState>,
    Json(req): Json<PlaylistInfoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.url.trim().is_empty() {
        return Err(ApiError::Validation("missing required field: url".to_string()));
    }

    let url = normalize_url(&req.url);
    let info = fetch_playlist_info(&state.http, &url).await?;
    Ok(Json(info))
}

/// Playlist metadata routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/playlist-info", post(lookup_playlist_info))
}
