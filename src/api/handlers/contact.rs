//! Contact form endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{ContactRequest, SuccessResponse};
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};
use crate::notify::templates;

/// `POST /api/contact` — Submit the contact form.
///
/// Sends the message to the admin inbox, appends a system log row, and
/// mirrors it to the operational chat webhook best-effort.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] when a required field is missing.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Contact",
    summary = "Submit the contact form",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message dispatched", body = SuccessResponse),
        (status = 400, description = "Missing required field", body = ErrorResponse),
    )
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()
        .map_err(|field| ApiError::Validation(format!("missing required field: {field}")))?;

    let (subject, html) = templates::contact_email(&req.email, &req.subject, &req.message);
    state
        .notifier
        .spawn_email(state.notifier.admin_email(), subject, html);

    state.notifier.spawn_webhook(
        state.notifier.ops_webhook(),
        templates::contact_webhook(&req.email, &req.subject),
    );

    if let Err(e) = state
        .store
        .append_log(
            "contact_form",
            "contact form submitted",
            serde_json::json!({ "email": req.email, "subject": req.subject }),
        )
        .await
    {
        tracing::warn!(error = %e, "contact log append dropped");
    }

    Ok(Json(SuccessResponse::ok()))
}

/// Contact routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/contact", post(submit_contact))
}
