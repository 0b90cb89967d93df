//! Contact form DTO.

use serde::Deserialize;
use utoipa::ToSchema;

/// Body for `POST /api/contact`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ContactRequest {
    /// Sender's email address.
    pub email: String,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub message: String,
}

impl ContactRequest {
    /// Validates required fields.
    ///
    /// # Errors
    ///
    /// Returns the name of the first missing field.
    pub fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err("email".to_string());
        }
        if self.subject.trim().is_empty() {
            return Err("subject".to_string());
        }
        if self.message.trim().is_empty() {
            return Err("message".to_string());
        }
        Ok(())
    }
}
