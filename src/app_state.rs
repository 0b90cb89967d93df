//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::notify::Notifier;
use crate::service::{AnalyticsService, ReviewService};
use crate::store::Store;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Marketplace store.
    pub store: Arc<dyn Store>,
    /// Settlement orchestration.
    pub review: ReviewService,
    /// Visit/heartbeat tracking.
    pub analytics: AnalyticsService,
    /// Outbound notification dispatch.
    pub notifier: Notifier,
    /// Outbound HTTP client for metadata scraping.
    pub http: reqwest::Client,
    /// Service configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires up the full state graph from a store and configuration.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: Arc<Config>) -> Self {
        let notifier = Notifier::new(Arc::clone(&config));
        let review = ReviewService::new(Arc::clone(&store));
        let analytics = AnalyticsService::new(Arc::clone(&store), notifier.clone());
        Self {
            store,
            review,
            analytics,
            notifier,
            http: reqwest::Client::new(),
            config,
        }
    }
}
