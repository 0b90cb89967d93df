//! Analytics ingestion endpoint.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::auth::client_ip;
use crate::api::dto::{AnalyticsRequest, SuccessResponse};
use crate::app_state::AppState;

/// `POST /api/analytics` — Record a client analytics event.
///
/// Always answers `{"success": bool}`: analytics is a best-effort side
/// channel and never surfaces errors to the caller.
#[utoipa::path(
    post,
    path = "/api/analytics",
    tag = "Analytics",
    summary = "Record an analytics event",
    description = "Accepts init/heartbeat/login events. Malformed events are acknowledged \
                   with success=false rather than an error status.",
    request_body = AnalyticsRequest,
    responses(
        (status = 200, description = "Event acknowledged", body = SuccessResponse),
    )
)]
pub async fn record_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<AnalyticsRequest>,
) -> impl IntoResponse {
    let ip = client_ip(&headers);

    let event = match req.into_event() {
        Ok(event) => event,
        Err(reason) => {
            tracing::debug!(%reason, "analytics event rejected");
            return Json(SuccessResponse::failed());
        }
    };

    let ok = state.analytics.handle(event, &ip).await;
    Json(SuccessResponse { success: ok })
}

/// Analytics routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/analytics", post(record_event))
}
