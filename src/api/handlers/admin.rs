//! Admin messaging and impersonation endpoints.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::auth::{require_admin, require_service_secret};
use crate::api::dto::{
    ImpersonateRequest, ImpersonateResponse, SendCustomEmailRequest, SendMessageRequest,
    SuccessResponse,
};
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};
use crate::notify::templates;

/// `POST /api/admin/send-message` — Email a user a templated message.
///
/// # Errors
///
/// Returns [`ApiError`] on auth failure, unknown user, or provider
/// failure.
#[utoipa::path(
    post,
    path = "/api/admin/send-message",
    tag = "Admin",
    summary = "Send a templated message to a user",
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Message sent", body = SuccessResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse),
        (status = 500, description = "Email provider failure", body = ErrorResponse),
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = require_admin(&state, &headers).await?;

    let recipient = state
        .store
        .profile_by_id(req.user_id)
        .await?
        .ok_or(ApiError::ProfileNotFound(req.user_id))?;

    let html = templates::admin_message(&req.message);
    let result = state
        .notifier
        .send_email(&recipient.email, &req.subject, &html)
        .await;

    let metadata = serde_json::json!({
        "admin_id": admin.id,
        "user_id": recipient.id,
        "subject": req.subject,
        "delivered": result.is_ok(),
    });
    if let Err(e) = state
        .store
        .append_log("admin_message", "admin message attempted", metadata)
        .await
    {
        tracing::warn!(error = %e, "admin message log append dropped");
    }

    result?;
    Ok(Json(SuccessResponse::ok()))
}

/// `POST /api/admin/send-custom-email` — Send raw HTML to any address.
///
/// # Errors
///
/// Returns [`ApiError`] on auth failure, missing fields, or provider
/// failure.
#[utoipa::path(
    post,
    path = "/api/admin/send-custom-email",
    tag = "Admin",
    summary = "Send a custom HTML email",
    request_body = SendCustomEmailRequest,
    responses(
        (status = 200, description = "Email sent", body = SuccessResponse),
        (status = 400, description = "Missing required field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Email provider failure", body = ErrorResponse),
    )
)]
pub async fn send_custom_email(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SendCustomEmailRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = require_admin(&state, &headers).await?;

    if req.to.trim().is_empty() || !req.to.contains('@') {
        return Err(ApiError::Validation("missing required field: to".to_string()));
    }
    if req.subject.trim().is_empty() {
        return Err(ApiError::Validation(
            "missing required field: subject".to_string(),
        ));
    }

    let result = state
        .notifier
        .send_email(&req.to, &req.subject, &req.html)
        .await;

    let metadata = serde_json::json!({
        "admin_id": admin.id,
        "to": req.to,
        "subject": req.subject,
        "delivered": result.is_ok(),
    });
    if let Err(e) = state
        .store
        .append_log("admin_custom_email", "custom email attempted", metadata)
        .await
    {
        tracing::warn!(error = %e, "custom email log append dropped");
    }

    result?;
    Ok(Json(SuccessResponse::ok()))
}

/// `POST /api/admin/impersonate` — Issue a one-time magic-link URL.
///
/// Requires the service-level secret in `x-admin-secret`, not a user
/// bearer token.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] on a bad secret and
/// [`ApiError::ProfileNotFound`] for an unknown user.
#[utoipa::path(
    post,
    path = "/api/admin/impersonate",
    tag = "Admin",
    summary = "Issue a magic link for a user",
    request_body = ImpersonateRequest,
    responses(
        (status = 200, description = "Magic link issued", body = ImpersonateResponse),
        (status = 401, description = "Invalid service credential", body = ErrorResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse),
    )
)]
pub async fn impersonate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ImpersonateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_service_secret(&state, &headers)?;

    let token = state
        .store
        .issue_magic_token(req.user_id)
        .await?
        .ok_or(ApiError::ProfileNotFound(req.user_id))?;

    let url = format!("{}/auth/magic?token={token}", state.config.site_url);

    if let Err(e) = state
        .store
        .append_log(
            "impersonation",
            "magic link issued",
            serde_json::json!({ "user_id": req.user_id }),
        )
        .await
    {
        tracing::warn!(error = %e, "impersonation log append dropped");
    }

    Ok(Json(ImpersonateResponse { url }))
}

/// Admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/send-message", post(send_message))
        .route("/admin/send-custom-email", post(send_custom_email))
        .route("/admin/impersonate", post(impersonate))
}
