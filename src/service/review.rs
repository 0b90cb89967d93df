//! Review service: settles submissions and records the outcome.
//!
//! Thin orchestration over the store's settlement transaction. No
//! external network calls happen on this path; the system-log append is
//! best-effort and never fails the settlement itself.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Decision, SettlementOutcome};
use crate::error::ApiError;
use crate::store::Store;

/// Orchestrates submission review settlement.
#[derive(Debug, Clone)]
pub struct ReviewService {
    store: Arc<dyn Store>,
}

impl ReviewService {
    /// Creates a new `ReviewService`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Settles a submission with the given decision and feedback.
    ///
    /// Expected misses (`NotFound`, `AlreadySettled`) come back as
    /// structured outcomes; the caller decides how to surface them.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] when the settlement transaction
    /// itself fails.
    pub async fn review(
        &self,
        submission_id: Uuid,
        decision: Decision,
        feedback: &str,
        reviewer_id: Uuid,
    ) -> Result<SettlementOutcome, ApiError> {
        let outcome = self
            .store
            .settle_submission(submission_id, decision, feedback, reviewer_id)
            .await?;

        match &outcome {
            SettlementOutcome::Settled {
                new_status, credit, ..
            } => {
                tracing::info!(
                    %submission_id,
                    status = new_status.as_str(),
                    credited = credit.is_some(),
                    "submission settled"
                );
                let metadata = serde_json::json!({
                    "submission_id": submission_id,
                    "status": new_status.as_str(),
                    "credit": credit,
                    "reviewer_id": reviewer_id,
                });
                if let Err(e) = self
                    .store
                    .append_log("submission_settled", "submission review settled", metadata)
                    .await
                {
                    tracing::warn!(error = %e, "settlement log append dropped");
                }
            }
            SettlementOutcome::NotFound { .. } => {
                tracing::warn!(%submission_id, "settlement requested for unknown submission");
            }
            SettlementOutcome::AlreadySettled { status, .. } => {
                tracing::warn!(
                    %submission_id,
                    status = status.as_str(),
                    "repeat settlement ignored"
                );
            }
        }

        Ok(outcome)
    }
}
