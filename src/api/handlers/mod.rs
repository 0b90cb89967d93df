//! REST endpoint handlers organized by resource.

pub mod admin;
pub mod analytics;
pub mod contact;
pub mod events;
pub mod playlist_info;
pub mod review;
pub mod system;
pub mod track;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(analytics::routes())
        .merge(contact::routes())
        .merge(track::routes())
        .merge(review::routes())
        .merge(admin::routes())
        .merge(playlist_info::routes())
        .merge(events::routes())
}
