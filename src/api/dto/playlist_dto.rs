//! Playlist metadata lookup DTO.

use serde::Deserialize;
use utoipa::ToSchema;

/// Body for `POST /api/playlist-info`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PlaylistInfoRequest {
    /// Public playlist page URL to scrape.
    pub url: String,
}
