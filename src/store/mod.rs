//! Persistence layer: the marketplace store contract and its PostgreSQL
//! implementation.
//!
//! Every mutation is a single remote call scoped to one database
//! transaction; there is no client-side coordination of concurrent
//! operations. The [`Store`] trait exists so services can be exercised
//! against an in-memory double in tests.

pub mod models;
pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Decision, SettlementOutcome};
use crate::error::ApiError;
use models::{
    LedgerEntry, NewPlaylist, NewProfile, NewSubmission, NewVisit, Playlist, Profile, Submission,
    Visit, VisitRecorded,
};

/// Marketplace store contract.
///
/// Implementations must make each method atomic: partial effects are
/// never observable (settlement in particular mutates a submission, a
/// balance, and the ledger as one unit).
#[async_trait]
pub trait Store: Send + Sync + std::fmt::Debug {
    /// Creates a profile with a zero balance.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on storage failure.
    async fn create_profile(&self, new: NewProfile) -> Result<Profile, ApiError>;

    /// Fetches a profile by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on storage failure.
    async fn profile_by_id(&self, id: Uuid) -> Result<Option<Profile>, ApiError>;

    /// Resolves a bearer API token to its profile.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on storage failure.
    async fn profile_by_token(&self, token: &str) -> Result<Option<Profile>, ApiError>;

    /// Stores a one-time magic-link token on the profile and returns it.
    /// Returns `None` when the profile does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on storage failure.
    async fn issue_magic_token(&self, profile_id: Uuid) -> Result<Option<String>, ApiError>;

    /// Creates a playlist owned by a curator.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on storage failure.
    async fn create_playlist(&self, new: NewPlaylist) -> Result<Playlist, ApiError>;

    /// Creates a pending submission with a fresh tracking slug.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on storage failure.
    async fn create_submission(&self, new: NewSubmission) -> Result<Submission, ApiError>;

    /// Fetches a submission by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on storage failure.
    async fn submission_by_id(&self, id: Uuid) -> Result<Option<Submission>, ApiError>;

    /// Settles a submission: transitions its status, writes feedback,
    /// and moves funds per the settlement plan, all in one transaction.
    ///
    /// Expected failure modes (`NotFound`, `AlreadySettled`) are values
    /// in [`SettlementOutcome`], never errors, and mutate nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on storage failure.
    async fn settle_submission(
        &self,
        submission_id: Uuid,
        decision: Decision,
        feedback: &str,
        reviewer_id: Uuid,
    ) -> Result<SettlementOutcome, ApiError>;

    /// Atomically increments a slug's click counter and returns the
    /// redirect destination (the playlist's URL when set, otherwise the
    /// submission's song URL). `None` when no record matches the slug.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on storage failure.
    async fn track_click(&self, slug: &str) -> Result<Option<String>, ApiError>;

    /// Ledger entries referencing a submission, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on storage failure.
    async fn ledger_for_submission(
        &self,
        submission_id: Uuid,
    ) -> Result<Vec<LedgerEntry>, ApiError>;

    /// Upserts a visit row by session ID: the first call inserts, later
    /// calls bump `page_views` and `last_seen_at`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on storage failure.
    async fn record_visit(&self, new: NewVisit) -> Result<VisitRecorded, ApiError>;

    /// Adds `secs` to a session's accumulated duration. Additive so
    /// concurrent heartbeats never lose updates.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on storage failure.
    async fn add_visit_duration(&self, session_id: &str, secs: i64) -> Result<(), ApiError>;

    /// Adds `n` to a session's accumulated click count. Additive.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on storage failure.
    async fn add_visit_clicks(&self, session_id: &str, n: i64) -> Result<(), ApiError>;

    /// Fetches a visit row by session ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on storage failure.
    async fn visit_by_session(&self, session_id: &str) -> Result<Option<Visit>, ApiError>;

    /// Appends an observability row to the system log.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on storage failure.
    async fn append_log(
        &self,
        event_type: &str,
        message: &str,
        metadata: serde_json::Value,
    ) -> Result<(), ApiError>;
}
