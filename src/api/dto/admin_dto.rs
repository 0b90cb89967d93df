//! Admin messaging and impersonation DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Body for `POST /api/admin/send-message`: plain-text message to a
/// user, wrapped in the standard template.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    /// Recipient profile ID.
    pub user_id: Uuid,
    /// Email subject.
    pub subject: String,
    /// Plain-text message body.
    pub message: String,
}

/// Body for `POST /api/admin/send-custom-email`: raw HTML to an
/// arbitrary address.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SendCustomEmailRequest {
    /// Recipient email address.
    pub to: String,
    /// Email subject.
    pub subject: String,
    /// Raw HTML body.
    pub html: String,
}

/// Body for `POST /api/admin/impersonate`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ImpersonateRequest {
    /// Profile to impersonate.
    pub user_id: Uuid,
}

/// One-time magic-link response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImpersonateResponse {
    /// Magic-link URL for the target user.
    pub url: String,
}
