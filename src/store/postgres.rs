//! PostgreSQL implementation of the marketplace store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::Store;
use super::models::{
    LedgerEntry, NewPlaylist, NewProfile, NewSubmission, NewVisit, Playlist, Profile, Submission,
    Visit, VisitRecorded,
};
use crate::config::Config;
use crate::domain::{
    Beneficiary, Decision, LedgerKind, Role, SettlementOutcome, SettlementPlan, SubmissionStatus,
    new_slug,
};
use crate::error::ApiError;

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

/// Maps a sqlx failure into the API error taxonomy.
fn db_err(e: sqlx::Error) -> ApiError {
    ApiError::Database(e.to_string())
}

/// Maps a corrupt stored discriminator into an internal error.
fn corrupt(column: &str, value: &str) -> ApiError {
    ApiError::Internal(format!("corrupt {column} value in store: {value}"))
}

impl PgStore {
    /// Creates a store from an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to PostgreSQL per the service configuration and runs
    /// pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] when the pool cannot be built or
    /// a migration fails.
    pub async fn connect(config: &Config) -> Result<Self, ApiError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(std::time::Duration::from_secs(
                config.database_connect_timeout_secs,
            ))
            .connect(&config.database_url)
            .await
            .map_err(db_err)?;

        sqlx::migrate!()
            .run(&pool)
            .await
            .map_err(|e| ApiError::Database(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Returns the underlying pool (health checks, tests).
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

type ProfileRow = (
    Uuid,
    String,
    String,
    String,
    i64,
    DateTime<Utc>,
    DateTime<Utc>,
);

type SubmissionRow = (
    Uuid,
    Uuid,
    Uuid,
    String,
    i64,
    String,
    String,
    String,
    i64,
    DateTime<Utc>,
    DateTime<Utc>,
);

const PROFILE_COLS: &str = "id, email, display_name, role, balance, created_at, last_seen_at";

const SUBMISSION_COLS: &str = "id, artist_id, playlist_id, song_url, amount_paid, status, \
     feedback, slug, click_count, created_at, updated_at";

fn profile_from_row(row: ProfileRow) -> Result<Profile, ApiError> {
    let (id, email, display_name, role, balance, created_at, last_seen_at) = row;
    let role = Role::parse(&role).ok_or_else(|| corrupt("role", &role))?;
    Ok(Profile {
        id,
        email,
        display_name,
        role,
        balance,
        created_at,
        last_seen_at,
    })
}

fn submission_from_row(row: SubmissionRow) -> Result<Submission, ApiError> {
    let (
        id,
        artist_id,
        playlist_id,
        song_url,
        amount_paid,
        status,
        feedback,
        slug,
        click_count,
        created_at,
        updated_at,
    ) = row;
    let status = SubmissionStatus::parse(&status).ok_or_else(|| corrupt("status", &status))?;
    Ok(Submission {
        id,
        artist_id,
        playlist_id,
        song_url,
        amount_paid,
        status,
        feedback,
        slug,
        click_count,
        created_at,
        updated_at,
    })
}

#[async_trait]
impl Store for PgStore {
    async fn create_profile(&self, new: NewProfile) -> Result<Profile, ApiError> {
        let id = Uuid::new_v4();
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "INSERT INTO profiles (id, email, display_name, role) \
             VALUES ($1, $2, $3, $4) RETURNING {PROFILE_COLS}"
        ))
        .bind(id)
        .bind(&new.email)
        .bind(&new.display_name)
        .bind(new.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        profile_from_row(row)
    }

    async fn profile_by_id(&self, id: Uuid) -> Result<Option<Profile>, ApiError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLS} FROM profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(profile_from_row).transpose()
    }

    async fn profile_by_token(&self, token: &str) -> Result<Option<Profile>, ApiError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLS} FROM profiles WHERE api_token = $1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(profile_from_row).transpose()
    }

    async fn issue_magic_token(&self, profile_id: Uuid) -> Result<Option<String>, ApiError> {
        let token = Uuid::new_v4().simple().to_string();
        let updated = sqlx::query_scalar::<_, Uuid>(
            "UPDATE profiles SET magic_token = $2 WHERE id = $1 RETURNING id",
        )
        .bind(profile_id)
        .bind(&token)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(updated.map(|_| token))
    }

    async fn create_playlist(&self, new: NewPlaylist) -> Result<Playlist, ApiError> {
        let id = Uuid::new_v4();
        let row = sqlx::query_as::<_, (Uuid, Uuid, String, String, i64, DateTime<Utc>)>(
            "INSERT INTO playlists (id, curator_id, name, url, submission_fee) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, curator_id, name, url, submission_fee, created_at",
        )
        .bind(id)
        .bind(new.curator_id)
        .bind(&new.name)
        .bind(&new.url)
        .bind(new.submission_fee)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        let (id, curator_id, name, url, submission_fee, created_at) = row;
        Ok(Playlist {
            id,
            curator_id,
            name,
            url,
            submission_fee,
            created_at,
        })
    }

    async fn create_submission(&self, new: NewSubmission) -> Result<Submission, ApiError> {
        let id = Uuid::new_v4();
        let slug = new_slug();
        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            "INSERT INTO submissions (id, artist_id, playlist_id, song_url, amount_paid, slug) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {SUBMISSION_COLS}"
        ))
        .bind(id)
        .bind(new.artist_id)
        .bind(new.playlist_id)
        .bind(&new.song_url)
        .bind(new.amount_paid)
        .bind(&slug)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        submission_from_row(row)
    }

    async fn submission_by_id(&self, id: Uuid) -> Result<Option<Submission>, ApiError> {
        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            "SELECT {SUBMISSION_COLS} FROM submissions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(submission_from_row).transpose()
    }

    async fn settle_submission(
        &self,
        submission_id: Uuid,
        decision: Decision,
        feedback: &str,
        _reviewer_id: Uuid,
    ) -> Result<SettlementOutcome, ApiError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        // Row lock on the submission serializes concurrent settlement
        // attempts for the same ID; the status guard below turns the
        // loser into a structured no-op.
        let row = sqlx::query_as::<_, (Uuid, Uuid, i64, String)>(
            "SELECT s.artist_id, p.curator_id, s.amount_paid, s.status \
             FROM submissions s JOIN playlists p ON p.id = s.playlist_id \
             WHERE s.id = $1 FOR UPDATE OF s",
        )
        .bind(submission_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_err)?;

        let Some((artist_id, curator_id, amount_paid, status)) = row else {
            return Ok(SettlementOutcome::NotFound { submission_id });
        };

        let status = SubmissionStatus::parse(&status).ok_or_else(|| corrupt("status", &status))?;

        let Some(plan) = SettlementPlan::build(status, decision, amount_paid) else {
            return Ok(SettlementOutcome::AlreadySettled {
                submission_id,
                status,
            });
        };

        sqlx::query(
            "UPDATE submissions SET status = $2, feedback = $3, updated_at = now() WHERE id = $1",
        )
        .bind(submission_id)
        .bind(plan.new_status.as_str())
        .bind(feedback)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        if let Some(credit) = plan.credit {
            let beneficiary_id = match credit.beneficiary {
                Beneficiary::Artist => artist_id,
                Beneficiary::Curator => curator_id,
            };

            sqlx::query("UPDATE profiles SET balance = balance + $2 WHERE id = $1")
                .bind(beneficiary_id)
                .bind(credit.amount)
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;

            sqlx::query(
                "INSERT INTO transactions (id, profile_id, submission_id, kind, amount) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(Uuid::new_v4())
            .bind(beneficiary_id)
            .bind(submission_id)
            .bind(credit.kind.as_str())
            .bind(credit.amount)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;

        Ok(SettlementOutcome::Settled {
            submission_id,
            new_status: plan.new_status,
            credit: plan.credit,
        })
    }

    async fn track_click(&self, slug: &str) -> Result<Option<String>, ApiError> {
        // Single statement: increment and resolve in one round trip.
        // The playlist's public link wins over the submission's own
        // song link when both exist.
        let destination = sqlx::query_scalar::<_, String>(
            "UPDATE submissions AS s SET click_count = s.click_count + 1 \
             FROM playlists AS p \
             WHERE p.id = s.playlist_id AND s.slug = $1 \
             RETURNING CASE WHEN p.url <> '' THEN p.url ELSE s.song_url END",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(destination)
    }

    async fn ledger_for_submission(
        &self,
        submission_id: Uuid,
    ) -> Result<Vec<LedgerEntry>, ApiError> {
        let rows = sqlx::query_as::<_, (Uuid, Uuid, Option<Uuid>, String, i64, DateTime<Utc>)>(
            "SELECT id, profile_id, submission_id, kind, amount, created_at \
             FROM transactions WHERE submission_id = $1 ORDER BY created_at ASC",
        )
        .bind(submission_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter()
            .map(|(id, profile_id, submission_id, kind, amount, created_at)| {
                let kind = LedgerKind::parse(&kind).ok_or_else(|| corrupt("kind", &kind))?;
                Ok(LedgerEntry {
                    id,
                    profile_id,
                    submission_id,
                    kind,
                    amount,
                    created_at,
                })
            })
            .collect()
    }

    async fn record_visit(&self, new: NewVisit) -> Result<VisitRecorded, ApiError> {
        // `xmax = 0` distinguishes a fresh insert from a conflict
        // update within the single upsert statement.
        let inserted = sqlx::query_scalar::<_, bool>(
            "INSERT INTO analytics_visits \
               (id, session_id, ip, href, referrer, user_agent, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (session_id) DO UPDATE \
               SET page_views = analytics_visits.page_views + 1, \
                   href = EXCLUDED.href, \
                   last_seen_at = now() \
             RETURNING (xmax = 0)",
        )
        .bind(Uuid::new_v4())
        .bind(&new.session_id)
        .bind(&new.ip)
        .bind(&new.href)
        .bind(&new.referrer)
        .bind(&new.user_agent)
        .bind(new.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        let notify_first_visit = if inserted {
            let seen_recently = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS (SELECT 1 FROM analytics_visits \
                 WHERE ip = $1 AND session_id <> $2 \
                   AND last_seen_at > now() - interval '1 hour')",
            )
            .bind(&new.ip)
            .bind(&new.session_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;
            !seen_recently
        } else {
            false
        };

        Ok(VisitRecorded {
            inserted,
            notify_first_visit,
        })
    }

    async fn add_visit_duration(&self, session_id: &str, secs: i64) -> Result<(), ApiError> {
        sqlx::query(
            "UPDATE analytics_visits \
             SET duration_secs = duration_secs + $2, last_seen_at = now() \
             WHERE session_id = $1",
        )
        .bind(session_id)
        .bind(secs)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn add_visit_clicks(&self, session_id: &str, n: i64) -> Result<(), ApiError> {
        sqlx::query(
            "UPDATE analytics_visits \
             SET click_count = click_count + $2, last_seen_at = now() \
             WHERE session_id = $1",
        )
        .bind(session_id)
        .bind(n)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn visit_by_session(&self, session_id: &str) -> Result<Option<Visit>, ApiError> {
        let row = sqlx::query_as::<
            _,
            (
                Uuid,
                String,
                String,
                String,
                String,
                String,
                Option<Uuid>,
                i64,
                i64,
                i64,
                DateTime<Utc>,
                DateTime<Utc>,
            ),
        >(
            "SELECT id, session_id, ip, href, referrer, user_agent, user_id, \
                    page_views, duration_secs, click_count, first_seen_at, last_seen_at \
             FROM analytics_visits WHERE session_id = $1",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(
            |(
                id,
                session_id,
                ip,
                href,
                referrer,
                user_agent,
                user_id,
                page_views,
                duration_secs,
                click_count,
                first_seen_at,
                last_seen_at,
            )| Visit {
                id,
                session_id,
                ip,
                href,
                referrer,
                user_agent,
                user_id,
                page_views,
                duration_secs,
                click_count,
                first_seen_at,
                last_seen_at,
            },
        ))
    }

    async fn append_log(
        &self,
        event_type: &str,
        message: &str,
        metadata: serde_json::Value,
    ) -> Result<(), ApiError> {
        sqlx::query("INSERT INTO system_logs (event_type, message, metadata) VALUES ($1, $2, $3)")
            .bind(event_type)
            .bind(message)
            .bind(metadata)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
