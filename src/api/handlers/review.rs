//! Submission review endpoint.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::auth::require_reviewer;
use crate::api::dto::{ReviewRequest, ReviewResponse};
use crate::app_state::AppState;
use crate::domain::{Decision, SettlementOutcome};
use crate::error::{ApiError, ErrorResponse};

/// `POST /api/submissions/{id}/review` — Settle a submission.
///
/// Requires a curator or admin bearer token. Settlement is atomic and
/// guarded: a repeat call on an already-settled submission answers 409
/// without moving funds.
///
/// # Errors
///
/// Returns [`ApiError`] on auth failure, unknown decision vocabulary,
/// unknown submission, or repeat settlement.
#[utoipa::path(
    post,
    path = "/api/submissions/{id}/review",
    tag = "Review",
    summary = "Settle a submission review",
    params(
        ("id" = uuid::Uuid, Path, description = "Submission ID"),
    ),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Submission settled", body = ReviewResponse),
        (status = 400, description = "Unknown decision", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Artist tokens cannot review", body = ErrorResponse),
        (status = 404, description = "Unknown submission", body = ErrorResponse),
        (status = 409, description = "Already settled", body = ErrorResponse),
    )
)]
pub async fn review_submission(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    headers: HeaderMap,
    Json(req): Json<ReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reviewer = require_reviewer(&state, &headers).await?;

    let decision = Decision::parse(&req.decision)
        .ok_or_else(|| ApiError::Validation(format!("unknown decision: {}", req.decision)))?;
    let feedback = req.feedback.unwrap_or_default();

    let outcome = state
        .review
        .review(id, decision, &feedback, reviewer.id)
        .await?;

    match outcome {
        SettlementOutcome::Settled {
            submission_id,
            new_status,
            credit,
        } => Ok(Json(ReviewResponse {
            success: true,
            submission_id,
            status: new_status,
            amount_moved: credit.map_or(0, |c| c.amount),
        })),
        SettlementOutcome::NotFound { submission_id } => {
            Err(ApiError::SubmissionNotFound(submission_id))
        }
        SettlementOutcome::AlreadySettled { submission_id, .. } => {
            Err(ApiError::AlreadySettled(submission_id))
        }
    }
}

/// Review routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/submissions/{id}/review", post(review_submission))
}
