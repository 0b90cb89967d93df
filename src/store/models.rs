//! Row models for the marketplace schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{LedgerKind, Role, SubmissionStatus};

/// A profile row. Never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Profile ID.
    pub id: Uuid,
    /// Unique email address.
    pub email: String,
    /// Display name shown to other users.
    pub display_name: String,
    /// Role of this profile.
    pub role: Role,
    /// Balance in minor currency units.
    pub balance: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp.
    pub last_seen_at: DateTime<Utc>,
}

/// A playlist row, owned by a curator. Read-mostly after onboarding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    /// Playlist ID.
    pub id: Uuid,
    /// Owning curator profile.
    pub curator_id: Uuid,
    /// Playlist name.
    pub name: String,
    /// Public destination link.
    pub url: String,
    /// Fee charged per submission, in minor units (0 = free).
    pub submission_fee: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A submission row linking an artist to a playlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Submission ID.
    pub id: Uuid,
    /// Submitting artist.
    pub artist_id: Uuid,
    /// Target playlist.
    pub playlist_id: Uuid,
    /// Link to the submitted song.
    pub song_url: String,
    /// Fee the artist paid, in minor units.
    pub amount_paid: i64,
    /// Review status; leaves `pending` exactly once.
    pub status: SubmissionStatus,
    /// Curator feedback, set at settlement.
    pub feedback: String,
    /// Opaque tracking slug for the click-through redirect.
    pub slug: String,
    /// Monotonically non-decreasing click counter.
    pub click_count: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// An immutable ledger row. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Ledger entry ID.
    pub id: Uuid,
    /// Profile whose balance the entry affects.
    pub profile_id: Uuid,
    /// Submission the entry settles, when applicable.
    pub submission_id: Option<Uuid>,
    /// What kind of movement this records.
    pub kind: LedgerKind,
    /// Amount in minor units.
    pub amount: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A visit row, upserted by session ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    /// Visit row ID.
    pub id: Uuid,
    /// Client-generated session identifier (upsert key).
    pub session_id: String,
    /// Client IP address.
    pub ip: String,
    /// Most recent page the session reported.
    pub href: String,
    /// Document referrer from the first page view.
    pub referrer: String,
    /// Client user agent.
    pub user_agent: String,
    /// Authenticated user, if known.
    pub user_id: Option<Uuid>,
    /// Number of `init` events observed for this session.
    pub page_views: i64,
    /// Accumulated session duration in seconds.
    pub duration_secs: i64,
    /// Accumulated click count.
    pub click_count: i64,
    /// First event timestamp.
    pub first_seen_at: DateTime<Utc>,
    /// Most recent event timestamp.
    pub last_seen_at: DateTime<Utc>,
}

/// Fields for creating a profile.
#[derive(Debug, Clone)]
pub struct NewProfile {
    /// Unique email address.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Initial role.
    pub role: Role,
}

/// Fields for creating a playlist.
#[derive(Debug, Clone)]
pub struct NewPlaylist {
    /// Owning curator.
    pub curator_id: Uuid,
    /// Playlist name.
    pub name: String,
    /// Public destination link.
    pub url: String,
    /// Fee per submission in minor units.
    pub submission_fee: i64,
}

/// Fields for creating a submission. The slug is generated by the store.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    /// Submitting artist.
    pub artist_id: Uuid,
    /// Target playlist.
    pub playlist_id: Uuid,
    /// Link to the submitted song.
    pub song_url: String,
    /// Fee paid in minor units.
    pub amount_paid: i64,
}

/// Fields reported by an analytics `init` event.
#[derive(Debug, Clone)]
pub struct NewVisit {
    /// Client-generated session identifier.
    pub session_id: String,
    /// Client IP address.
    pub ip: String,
    /// Page the client is on.
    pub href: String,
    /// Document referrer.
    pub referrer: String,
    /// Client user agent.
    pub user_agent: String,
    /// Authenticated user, if known.
    pub user_id: Option<Uuid>,
}

/// Result of upserting a visit row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitRecorded {
    /// Whether this call inserted a new row (first `init` for the
    /// session) rather than updating an existing one.
    pub inserted: bool,
    /// Whether a visitor notification should fire: the row is new and
    /// no other session from the same IP was seen within the trailing
    /// hour.
    pub notify_first_visit: bool,
}
