//! Outbound notification dispatch: chat webhook and transactional email.
//!
//! Delivery is best-effort by construction. The `spawn_*` methods detach
//! a task per send so the request path never awaits delivery; failures
//! are logged and dropped, and no call is retried.

pub mod templates;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::config::Config;
use crate::error::ApiError;

/// Default timeout applied to every outbound notification call.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Chat webhook payload.
#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    content: &'a str,
}

/// Transactional email payload (Resend-style API).
#[derive(Debug, Serialize)]
struct EmailMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Notification dispatcher owning the outbound HTTP client.
#[derive(Debug, Clone)]
pub struct Notifier {
    http: reqwest::Client,
    config: Arc<Config>,
}

impl Notifier {
    /// Creates a dispatcher from the service configuration.
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { http, config }
    }

    /// Posts a message to a chat webhook.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Upstream`] on network failure or a non-2xx
    /// response. An empty webhook URL is a silent no-op.
    pub async fn send_webhook(&self, webhook_url: &str, content: &str) -> Result<(), ApiError> {
        if webhook_url.is_empty() {
            return Ok(());
        }

        let response = self
            .http
            .post(webhook_url)
            .json(&WebhookMessage { content })
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("webhook send failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "webhook returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// Sends an email through the transactional provider.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Upstream`] on network failure or a non-2xx
    /// response.
    pub async fn send_email(&self, to: &str, subject: &str, html: &str) -> Result<(), ApiError> {
        let url = format!("{}/emails", self.config.resend_base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.resend_api_key)
            .json(&EmailMessage {
                from: &self.config.email_from,
                to,
                subject,
                html,
            })
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("email send failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "email provider returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// Fire-and-forget webhook post. The spawned task logs failures at
    /// `warn` and drops them; the caller never blocks on delivery.
    pub fn spawn_webhook(&self, webhook_url: &str, content: String) {
        let notifier = self.clone();
        let url = webhook_url.to_string();
        tokio::spawn(async move {
            if let Err(e) = notifier.send_webhook(&url, &content).await {
                tracing::warn!(error = %e, "webhook notification dropped");
            }
        });
    }

    /// Fire-and-forget email send.
    pub fn spawn_email(&self, to: &str, subject: String, html: String) {
        let notifier = self.clone();
        let to = to.to_string();
        tokio::spawn(async move {
            if let Err(e) = notifier.send_email(&to, &subject, &html).await {
                tracing::warn!(error = %e, to = %to, "email notification dropped");
            }
        });
    }

    /// Operational chat webhook URL from config.
    #[must_use]
    pub fn ops_webhook(&self) -> &str {
        &self.config.discord_webhook_url
    }

    /// Visitor chat webhook URL from config (falls back to ops).
    #[must_use]
    pub fn visitor_webhook(&self) -> &str {
        self.config.visitor_webhook()
    }

    /// Configured admin email destination.
    #[must_use]
    pub fn admin_email(&self) -> &str {
        &self.config.admin_email
    }
}
