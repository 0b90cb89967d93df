//! In-memory store double for service-level tests.
//!
//! Implements the same contract as the PostgreSQL store, including the
//! guarded settlement transition and upsert-by-session semantics, over
//! a mutex-held state. Test-only.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use super::Store;
use super::models::{
    LedgerEntry, NewPlaylist, NewProfile, NewSubmission, NewVisit, Playlist, Profile, Submission,
    Visit, VisitRecorded,
};
use crate::domain::{
    Beneficiary, Decision, SettlementOutcome, SettlementPlan, SubmissionStatus, new_slug,
};
use crate::error::ApiError;

#[derive(Debug, Default)]
struct State {
    profiles: HashMap<Uuid, Profile>,
    playlists: HashMap<Uuid, Playlist>,
    submissions: HashMap<Uuid, Submission>,
    ledger: Vec<LedgerEntry>,
    visits: HashMap<String, Visit>,
    logs: Vec<(String, String)>,
    magic_tokens: HashMap<Uuid, String>,
    api_tokens: HashMap<String, Uuid>,
}

/// Mutex-backed in-memory [`Store`].
#[derive(Debug, Default)]
pub struct MemStore {
    state: Mutex<State>,
}

impl MemStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, State>, ApiError> {
        self.state
            .lock()
            .map_err(|_| ApiError::Internal("test store poisoned".to_string()))
    }

    /// Registers a bearer token for a profile, mirroring the
    /// `profiles.api_token` column.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Internal`] when the state lock is poisoned.
    pub fn set_api_token(&self, profile_id: Uuid, token: &str) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        state.api_tokens.insert(token.to_string(), profile_id);
        Ok(())
    }

    /// Number of system log rows appended so far.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Internal`] when the state lock is poisoned.
    pub fn log_count(&self) -> Result<usize, ApiError> {
        Ok(self.lock()?.logs.len())
    }
}

#[async_trait]
impl Store for MemStore {
    async fn create_profile(&self, new: NewProfile) -> Result<Profile, ApiError> {
        let now = Utc::now();
        let profile = Profile {
            id: Uuid::new_v4(),
            email: new.email,
            display_name: new.display_name,
            role: new.role,
            balance: 0,
            created_at: now,
            last_seen_at: now,
        };
        self.lock()?.profiles.insert(profile.id, profile.clone());
        Ok(profile)
    }

    async fn profile_by_id(&self, id: Uuid) -> Result<Option<Profile>, ApiError> {
        Ok(self.lock()?.profiles.get(&id).cloned())
    }

    async fn profile_by_token(&self, token: &str) -> Result<Option<Profile>, ApiError> {
        let state = self.lock()?;
        Ok(state
            .api_tokens
            .get(token)
            .and_then(|id| state.profiles.get(id))
            .cloned())
    }

    async fn issue_magic_token(&self, profile_id: Uuid) -> Result<Option<String>, ApiError> {
        let mut state = self.lock()?;
        if !state.profiles.contains_key(&profile_id) {
            return Ok(None);
        }
        let token = Uuid::new_v4().simple().to_string();
        state.magic_tokens.insert(profile_id, token.clone());
        Ok(Some(token))
    }

    async fn create_playlist(&self, new: NewPlaylist) -> Result<Playlist, ApiError> {
        let playlist = Playlist {
            id: Uuid::new_v4(),
            curator_id: new.curator_id,
            name: new.name,
            url: new.url,
            submission_fee: new.submission_fee,
            created_at: Utc::now(),
        };
        self.lock()?.playlists.insert(playlist.id, playlist.clone());
        Ok(playlist)
    }

    async fn create_submission(&self, new: NewSubmission) -> Result<Submission, ApiError> {
        let now = Utc::now();
        let submission = Submission {
            id: Uuid::new_v4(),
            artist_id: new.artist_id,
            playlist_id: new.playlist_id,
            song_url: new.song_url,
            amount_paid: new.amount_paid,
            status: SubmissionStatus::Pending,
            feedback: String::new(),
            slug: new_slug(),
            click_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.lock()?
            .submissions
            .insert(submission.id, submission.clone());
        Ok(submission)
    }

    async fn submission_by_id(&self, id: Uuid) -> Result<Option<Submission>, ApiError> {
        Ok(self.lock()?.submissions.get(&id).cloned())
    }

    async fn settle_submission(
        &self,
        submission_id: Uuid,
        decision: Decision,
        feedback: &str,
        _reviewer_id: Uuid,
    ) -> Result<SettlementOutcome, ApiError> {
        let mut state = self.lock()?;

        let Some(submission) = state.submissions.get(&submission_id).cloned() else {
            return Ok(SettlementOutcome::NotFound { submission_id });
        };
        let Some(playlist) = state.playlists.get(&submission.playlist_id).cloned() else {
            return Err(ApiError::Database("dangling playlist reference".to_string()));
        };

        let Some(plan) =
            SettlementPlan::build(submission.status, decision, submission.amount_paid)
        else {
            return Ok(SettlementOutcome::AlreadySettled {
                submission_id,
                status: submission.status,
            });
        };

        if let Some(entry) = state.submissions.get_mut(&submission_id) {
            entry.status = plan.new_status;
            entry.feedback = feedback.to_string();
            entry.updated_at = Utc::now();
        }

        if let Some(credit) = plan.credit {
            let beneficiary_id = match credit.beneficiary {
                Beneficiary::Artist => submission.artist_id,
                Beneficiary::Curator => playlist.curator_id,
            };
            if let Some(profile) = state.profiles.get_mut(&beneficiary_id) {
                profile.balance += credit.amount;
            }
            state.ledger.push(LedgerEntry {
                id: Uuid::new_v4(),
                profile_id: beneficiary_id,
                submission_id: Some(submission_id),
                kind: credit.kind,
                amount: credit.amount,
                created_at: Utc::now(),
            });
        }

        Ok(SettlementOutcome::Settled {
            submission_id,
            new_status: plan.new_status,
            credit: plan.credit,
        })
    }

    async fn track_click(&self, slug: &str) -> Result<Option<String>, ApiError> {
        let mut state = self.lock()?;
        let id = state
            .submissions
            .values()
            .find(|s| s.slug == slug)
            .map(|s| s.id);
        let Some(id) = id else {
            return Ok(None);
        };

        let playlist_url = state
            .submissions
            .get(&id)
            .and_then(|s| state.playlists.get(&s.playlist_id))
            .map(|p| p.url.clone());

        let Some(submission) = state.submissions.get_mut(&id) else {
            return Ok(None);
        };
        submission.click_count += 1;
        let destination = match playlist_url {
            Some(url) if !url.is_empty() => url,
            _ => submission.song_url.clone(),
        };
        Ok(Some(destination))
    }

    async fn ledger_for_submission(
        &self,
        submission_id: Uuid,
    ) -> Result<Vec<LedgerEntry>, ApiError> {
        Ok(self
            .lock()?
            .ledger
            .iter()
            .filter(|e| e.submission_id == Some(submission_id))
            .cloned()
            .collect())
    }

    async fn record_visit(&self, new: NewVisit) -> Result<VisitRecorded, ApiError> {
        let mut state = self.lock()?;
        let now = Utc::now();

        if let Some(visit) = state.visits.get_mut(&new.session_id) {
            visit.page_views += 1;
            visit.href = new.href;
            visit.last_seen_at = now;
            return Ok(VisitRecorded {
                inserted: false,
                notify_first_visit: false,
            });
        }

        let seen_recently = state.visits.values().any(|v| {
            v.ip == new.ip
                && v.session_id != new.session_id
                && v.last_seen_at > now - Duration::hours(1)
        });

        state.visits.insert(
            new.session_id.clone(),
            Visit {
                id: Uuid::new_v4(),
                session_id: new.session_id,
                ip: new.ip,
                href: new.href,
                referrer: new.referrer,
                user_agent: new.user_agent,
                user_id: new.user_id,
                page_views: 1,
                duration_secs: 0,
                click_count: 0,
                first_seen_at: now,
                last_seen_at: now,
            },
        );

        Ok(VisitRecorded {
            inserted: true,
            notify_first_visit: !seen_recently,
        })
    }

    async fn add_visit_duration(&self, session_id: &str, secs: i64) -> Result<(), ApiError> {
        if let Some(visit) = self.lock()?.visits.get_mut(session_id) {
            visit.duration_secs += secs;
            visit.last_seen_at = Utc::now();
        }
        Ok(())
    }

    async fn add_visit_clicks(&self, session_id: &str, n: i64) -> Result<(), ApiError> {
        if let Some(visit) = self.lock()?.visits.get_mut(session_id) {
            visit.click_count += n;
            visit.last_seen_at = Utc::now();
        }
        Ok(())
    }

    async fn visit_by_session(&self, session_id: &str) -> Result<Option<Visit>, ApiError> {
        Ok(self.lock()?.visits.get(session_id).cloned())
    }

    async fn append_log(
        &self,
        event_type: &str,
        message: &str,
        _metadata: serde_json::Value,
    ) -> Result<(), ApiError> {
        self.lock()?
            .logs
            .push((event_type.to_string(), message.to_string()));
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Role;

    async fn seeded_submission(store: &MemStore, playlist_url: &str) -> Submission {
        let Ok(artist) = store
            .create_profile(NewProfile {
                email: "artist@example.com".to_string(),
                display_name: "Artist".to_string(),
                role: Role::Artist,
            })
            .await
        else {
            panic!("artist creation failed");
        };
        let Ok(curator) = store
            .create_profile(NewProfile {
                email: "curator@example.com".to_string(),
                display_name: "Curator".to_string(),
                role: Role::Curator,
            })
            .await
        else {
            panic!("curator creation failed");
        };
        let Ok(playlist) = store
            .create_playlist(NewPlaylist {
                curator_id: curator.id,
                name: "Fresh Finds".to_string(),
                url: playlist_url.to_string(),
                submission_fee: 3000,
            })
            .await
        else {
            panic!("playlist creation failed");
        };
        let Ok(submission) = store
            .create_submission(NewSubmission {
                artist_id: artist.id,
                playlist_id: playlist.id,
                song_url: "https://example.com/song".to_string(),
                amount_paid: 3000,
            })
            .await
        else {
            panic!("submission creation failed");
        };
        submission
    }

    #[tokio::test]
    async fn repeated_clicks_count_exactly_and_keep_destination() {
        let store = MemStore::new();
        let submission =
            seeded_submission(&store, "https://open.spotify.com/playlist/abc").await;

        for _ in 0..5 {
            let Ok(Some(destination)) = store.track_click(&submission.slug).await else {
                panic!("slug resolution failed");
            };
            assert_eq!(destination, "https://open.spotify.com/playlist/abc");
        }

        let Ok(Some(tracked)) = store.submission_by_id(submission.id).await else {
            panic!("submission lookup failed");
        };
        assert_eq!(tracked.click_count, 5);
    }

    #[tokio::test]
    async fn unknown_slug_resolves_to_none() {
        let store = MemStore::new();
        let submission = seeded_submission(&store, "").await;

        let Ok(destination) = store.track_click("no-such-slug").await else {
            panic!("slug resolution failed");
        };
        assert_eq!(destination, None);

        // The miss leaves existing counters untouched.
        let Ok(Some(tracked)) = store.submission_by_id(submission.id).await else {
            panic!("submission lookup failed");
        };
        assert_eq!(tracked.click_count, 0);
    }

    #[tokio::test]
    async fn playlist_url_wins_over_song_url() {
        let store = MemStore::new();
        let submission =
            seeded_submission(&store, "https://open.spotify.com/playlist/xyz").await;

        let Ok(Some(destination)) = store.track_click(&submission.slug).await else {
            panic!("slug resolution failed");
        };
        assert_eq!(destination, "https://open.spotify.com/playlist/xyz");
    }

    #[tokio::test]
    async fn empty_playlist_url_falls_back_to_song_url() {
        let store = MemStore::new();
        let submission = seeded_submission(&store, "").await;

        let Ok(Some(destination)) = store.track_click(&submission.slug).await else {
            panic!("slug resolution failed");
        };
        assert_eq!(destination, submission.song_url);
    }
}
