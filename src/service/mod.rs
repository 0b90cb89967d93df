//! Orchestration layer between the HTTP handlers and the store.

pub mod analytics;
pub mod playlist_info;
pub mod review;

pub use analytics::AnalyticsService;
pub use playlist_info::PlaylistInfo;
pub use review::ReviewService;
