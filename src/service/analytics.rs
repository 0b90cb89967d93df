//! Analytics service: visit tracking and heartbeat accumulation.
//!
//! Analytics is a best-effort side channel: every path reports success
//! or failure as a boolean and never raises to the caller. Store errors
//! are logged and swallowed.

use std::sync::Arc;

use crate::domain::AnalyticsEvent;
use crate::notify::{Notifier, templates};
use crate::store::Store;
use crate::store::models::NewVisit;

/// Handles the three analytics event types.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    store: Arc<dyn Store>,
    notifier: Notifier,
}

impl AnalyticsService {
    /// Creates a new `AnalyticsService`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    /// Processes one analytics event from the given client IP. Returns
    /// whether the event was recorded; failures are logged, never
    /// propagated.
    pub async fn handle(&self, event: AnalyticsEvent, ip: &str) -> bool {
        match event {
            AnalyticsEvent::Init {
                session_id,
                href,
                referrer,
                user_agent,
                user_id,
            } => {
                let recorded = self
                    .store
                    .record_visit(NewVisit {
                        session_id,
                        ip: ip.to_string(),
                        href: href.clone(),
                        referrer: referrer.clone(),
                        user_agent,
                        user_id,
                    })
                    .await;

                match recorded {
                    Ok(visit) => {
                        if visit.notify_first_visit {
                            self.notifier.spawn_webhook(
                                self.notifier.visitor_webhook(),
                                templates::new_visitor(ip, &href, &referrer),
                            );
                        }
                        true
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "visit upsert dropped");
                        false
                    }
                }
            }
            AnalyticsEvent::Heartbeat {
                session_id,
                duration_secs,
                click_count,
            } => {
                let mut ok = true;
                if duration_secs > 0 {
                    if let Err(e) = self
                        .store
                        .add_visit_duration(&session_id, duration_secs)
                        .await
                    {
                        tracing::warn!(error = %e, "heartbeat duration dropped");
                        ok = false;
                    }
                }
                if click_count > 0 {
                    if let Err(e) = self.store.add_visit_clicks(&session_id, click_count).await {
                        tracing::warn!(error = %e, "heartbeat clicks dropped");
                        ok = false;
                    }
                }
                ok
            }
            AnalyticsEvent::Login { email, role } => {
                // Notification only, no row mutation.
                self.notifier.spawn_webhook(
                    self.notifier.ops_webhook(),
                    templates::login(&email, &role),
                );
                true
            }
        }
    }
}
