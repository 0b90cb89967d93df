//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "missing required field: email",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category            | HTTP Status                |
/// |-----------|---------------------|----------------------------|
/// | 1000–1099 | Validation          | 400 Bad Request            |
/// | 1100–1199 | Auth                | 401 / 403                  |
/// | 2000–2099 | Not Found           | 404 Not Found              |
/// | 2100–2199 | State Conflict      | 409 Conflict               |
/// | 3000–3999 | Server / Upstream   | 500 Internal Server Error  |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request validation failed (missing or malformed field).
    #[error("invalid request: {0}")]
    Validation(String),

    /// Missing or unrecognized bearer credential.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not permitted (e.g. non-admin role).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Submission with the given ID was not found.
    #[error("submission not found: {0}")]
    SubmissionNotFound(uuid::Uuid),

    /// No routing record matches the tracking slug.
    #[error("unknown tracking slug: {0}")]
    SlugNotFound(String),

    /// Profile with the given ID was not found.
    #[error("profile not found: {0}")]
    ProfileNotFound(uuid::Uuid),

    /// Submission already carries a terminal status; settlement is a no-op.
    #[error("submission already settled: {0}")]
    AlreadySettled(uuid::Uuid),

    /// Persistence layer failure.
    #[error("database error: {0}")]
    Database(String),

    /// Outbound dependency failure (email provider, webhook, scrape target).
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::Unauthorized(_) => 1101,
            Self::Forbidden(_) => 1102,
            Self::SubmissionNotFound(_) => 2001,
            Self::SlugNotFound(_) => 2002,
            Self::ProfileNotFound(_) => 2003,
            Self::AlreadySettled(_) => 2101,
            Self::Database(_) => 3001,
            Self::Upstream(_) => 3002,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::SubmissionNotFound(_) | Self::SlugNotFound(_) | Self::ProfileNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::AlreadySettled(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Upstream(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
