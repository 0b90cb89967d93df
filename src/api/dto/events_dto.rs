//! Inbound email-provider webhook DTOs.

use serde::Deserialize;
use utoipa::ToSchema;

/// Body for `POST /api/events`, as delivered by the email provider.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct InboundEventRequest {
    /// Provider event discriminator (e.g. `email.delivered`).
    #[serde(rename = "type")]
    pub event_type: String,
    /// Provider-specific event payload.
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Known provider event kinds. Unknown inputs map to
/// [`EmailEventKind::Unknown`] and are relayed loudly rather than
/// silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailEventKind {
    /// Message accepted by the recipient server.
    Delivered,
    /// Message bounced.
    Bounced,
    /// Recipient filed a spam complaint.
    Complained,
    /// Recipient opened the message.
    Opened,
    /// Recipient clicked a link.
    Clicked,
    /// Inbound reply received.
    InboundReceived,
    /// Anything the provider sends that we do not model.
    Unknown,
}

impl EmailEventKind {
    /// Classifies a provider event-type string.
    #[must_use]
    pub fn classify(event_type: &str) -> Self {
        match event_type {
            "email.delivered" => Self::Delivered,
            "email.bounced" => Self::Bounced,
            "email.complained" => Self::Complained,
            "email.opened" => Self::Opened,
            "email.clicked" => Self::Clicked,
            "email.received" | "inbound.received" => Self::InboundReceived,
            _ => Self::Unknown,
        }
    }

    /// Whether this event warrants an operational chat relay.
    #[must_use]
    pub const fn relay_to_chat(self) -> bool {
        match self {
            Self::Bounced | Self::Complained | Self::InboundReceived | Self::Unknown => true,
            Self::Delivered | Self::Opened | Self::Clicked => false,
        }
    }
}
