//! # trackpitch
//!
//! REST API backend for a playlist submission and review marketplace.
//!
//! Artists submit songs to curator playlists for paid or free review.
//! Settling a review moves the submission fee — refund to the artist on
//! decline/reject, earning to the curator on accept — as one guarded
//! database transaction, recorded in an append-only ledger. Public
//! tracking links redirect through a click counter; analytics and
//! notifications are best-effort side channels.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── ReviewService / AnalyticsService (service/)
//!     ├── Notifier (notify/) ──▶ chat webhook, email provider
//!     │
//!     ├── Domain types + settlement plan (domain/)
//!     │
//!     └── PostgreSQL store (store/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod notify;
pub mod service;
pub mod store;
