//! Inbound email-provider webhook endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{EmailEventKind, InboundEventRequest, SuccessResponse};
use crate::app_state::AppState;
use crate::notify::templates;

/// `POST /api/events` — Receive an email-provider event.
///
/// Logs every event and relays actionable ones to the operational chat
/// webhook. Always answers 200 so the provider does not retry.
#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Events",
    summary = "Inbound email provider webhook",
    request_body = InboundEventRequest,
    responses(
        (status = 200, description = "Event accepted", body = SuccessResponse),
    )
)]
pub async fn receive_event(
    State(state): State<AppState>,
    Json(req): Json<InboundEventRequest>,
) -> impl IntoResponse {
    let kind = EmailEventKind::classify(&req.event_type);
    tracing::info!(event_type = %req.event_type, ?kind, "email provider event");

    if let Err(e) = state
        .store
        .append_log("email_event", &req.event_type, req.data.clone())
        .await
    {
        tracing::warn!(error = %e, "email event log append dropped");
    }

    if kind.relay_to_chat() {
        let detail = req
            .data
            .get("subject")
            .and_then(|v| v.as_str())
            .or_else(|| req.data.get("email").and_then(|v| v.as_str()))
            .unwrap_or("no detail");
        state.notifier.spawn_webhook(
            state.notifier.ops_webhook(),
            templates::inbound_event(&req.event_type, detail),
        );
    }

    Json(SuccessResponse::ok())
}

/// Inbound event routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/events", post(receive_event))
}
