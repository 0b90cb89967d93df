//! Analytics request body and its conversion into the closed event enum.

use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::AnalyticsEvent;

/// Flat analytics body as sent by the tracking snippet. The `type`
/// field discriminates; remaining fields are per-type optional.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRequest {
    /// Event discriminator: `init`, `heartbeat`, or `login`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Client-generated session identifier.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Page the client is on.
    #[serde(default)]
    pub href: Option<String>,
    /// Document referrer.
    #[serde(default)]
    pub referrer: Option<String>,
    /// Client user agent.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Authenticated user, if known.
    #[serde(default)]
    pub user_id: Option<Uuid>,
    /// Seconds elapsed since the previous heartbeat.
    #[serde(default)]
    pub duration: Option<i64>,
    /// Clicks since the previous heartbeat.
    #[serde(default)]
    pub click_count: Option<i64>,
    /// Login email (login events).
    #[serde(default)]
    pub email: Option<String>,
    /// Login role (login events).
    #[serde(default)]
    pub role: Option<String>,
}

impl AnalyticsRequest {
    /// Converts the flat wire body into a typed event. Returns an error
    /// string for an unknown discriminator or a missing session ID.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason suitable for logging; the
    /// endpoint itself still answers `{"success": false}`.
    pub fn into_event(self) -> Result<AnalyticsEvent, String> {
        match self.event_type.as_str() {
            "init" => {
                let session_id = self
                    .session_id
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| "init event missing sessionId".to_string())?;
                Ok(AnalyticsEvent::Init {
                    session_id,
                    href: self.href.unwrap_or_default(),
                    referrer: self.referrer.unwrap_or_default(),
                    user_agent: self.user_agent.unwrap_or_default(),
                    user_id: self.user_id,
                })
            }
            "heartbeat" => {
                let session_id = self
                    .session_id
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| "heartbeat event missing sessionId".to_string())?;
                Ok(AnalyticsEvent::Heartbeat {
                    session_id,
                    duration_secs: self.duration.unwrap_or(0).max(0),
                    click_count: self.click_count.unwrap_or(0).max(0),
                })
            }
            "login" => Ok(AnalyticsEvent::Login {
                email: self.email.unwrap_or_default(),
                role: self.role.unwrap_or_default(),
            }),
            other => Err(format!("unknown analytics event type: {other}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn parse(json: &str) -> AnalyticsRequest {
        let Ok(req) = serde_json::from_str::<AnalyticsRequest>(json) else {
            panic!("body should deserialize");
        };
        req
    }

    #[test]
    fn init_body_converts() {
        let req = parse(
            r#"{"type":"init","sessionId":"s1","href":"/p","referrer":"","userAgent":"ua"}"#,
        );
        let Ok(AnalyticsEvent::Init {
            session_id, href, ..
        }) = req.into_event()
        else {
            panic!("expected init event");
        };
        assert_eq!(session_id, "s1");
        assert_eq!(href, "/p");
    }

    #[test]
    fn heartbeat_clamps_negative_deltas() {
        let req = parse(r#"{"type":"heartbeat","sessionId":"s1","duration":-5,"clickCount":2}"#);
        let Ok(AnalyticsEvent::Heartbeat {
            duration_secs,
            click_count,
            ..
        }) = req.into_event()
        else {
            panic!("expected heartbeat event");
        };
        assert_eq!(duration_secs, 0);
        assert_eq!(click_count, 2);
    }

    #[test]
    fn login_needs_no_session() {
        let req = parse(r#"{"type":"login","email":"a@b.c","role":"artist"}"#);
        assert!(matches!(req.into_event(), Ok(AnalyticsEvent::Login { .. })));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let req = parse(r#"{"type":"pageview","sessionId":"s1"}"#);
        assert!(req.into_event().is_err());
    }

    #[test]
    fn init_without_session_is_rejected() {
        let req = parse(r#"{"type":"init"}"#);
        assert!(req.into_event().is_err());
    }
}
