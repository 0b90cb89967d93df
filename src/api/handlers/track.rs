//! Public click-tracking redirect endpoints.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect};
use axum::routing::get;
use axum::Router;

use crate::app_state::AppState;
use crate::domain::normalize_url;
use crate::error::{ApiError, ErrorResponse};

/// `GET /api/r/{slug}` — Resolve a tracking slug and redirect.
///
/// Anonymous and safe to call repeatedly: each hit increments the click
/// counter by exactly one and redirects to the same destination.
///
/// # Errors
///
/// Returns [`ApiError::SlugNotFound`] when no record matches.
#[utoipa::path(
    get,
    path = "/api/r/{slug}",
    tag = "Tracking",
    summary = "Follow a tracking link",
    params(
        ("slug" = String, Path, description = "Opaque tracking slug"),
    ),
    responses(
        (status = 307, description = "Redirect to the destination URL"),
        (status = 404, description = "Unknown slug", body = ErrorResponse),
    )
)]
pub async fn follow_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let destination = state
        .store
        .track_click(&slug)
        .await?
        .ok_or_else(|| ApiError::SlugNotFound(slug.clone()))?;

    let target = normalize_url(&destination);
    tracing::debug!(%slug, %target, "tracking redirect");
    Ok(Redirect::temporary(&target))
}

/// Tracking routes under `/api`. The root-level `/track/{slug}` alias
/// is mounted by the top-level router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/r/{slug}", get(follow_slug))
}
