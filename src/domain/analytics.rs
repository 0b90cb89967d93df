//! Closed analytics event variants.
//!
//! The wire body is a flat JSON object with a `type` discriminator (see
//! the API DTO layer); it is converted into this enum before any
//! handling so every branch is exhaustive.

use uuid::Uuid;

/// A single client-side analytics event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsEvent {
    /// Session start or page navigation. Upserts a visit row keyed by
    /// the client-generated session ID.
    Init {
        /// Client-generated session identifier.
        session_id: String,
        /// Page the client is on.
        href: String,
        /// Document referrer, if any.
        referrer: String,
        /// Client user agent string.
        user_agent: String,
        /// Authenticated user, if known.
        user_id: Option<Uuid>,
    },
    /// Periodic liveness ping carrying deltas since the last ping.
    Heartbeat {
        /// Session the ping belongs to.
        session_id: String,
        /// Seconds elapsed since the previous ping.
        duration_secs: i64,
        /// Clicks counted since the previous ping.
        click_count: i64,
    },
    /// Auth success notification. No row mutation.
    Login {
        /// Email of the user who logged in, if provided.
        email: String,
        /// Role of the user who logged in, if provided.
        role: String,
    },
}
