//! Submission review DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::SubmissionStatus;

/// Body for `POST /api/submissions/{id}/review`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReviewRequest {
    /// Decision vocabulary: `accepted`/`approved`, `declined`, or
    /// `rejected`.
    pub decision: String,
    /// Feedback text stored on the submission.
    #[serde(default)]
    pub feedback: Option<String>,
}

/// Successful settlement response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewResponse {
    /// Always `true` on a settled response.
    pub success: bool,
    /// Submission that was settled.
    pub submission_id: Uuid,
    /// Terminal status written by this call.
    #[schema(value_type = String, example = "accepted")]
    pub status: SubmissionStatus,
    /// Amount moved to a balance, 0 for free submissions.
    pub amount_moved: i64,
}
