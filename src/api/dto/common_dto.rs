//! Shared DTO types used across multiple endpoints.

use serde::Serialize;
use utoipa::ToSchema;

/// Minimal acknowledgement body for best-effort endpoints.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct SuccessResponse {
    /// Whether the request took effect.
    pub success: bool,
}

impl SuccessResponse {
    /// Success acknowledgement.
    #[must_use]
    pub const fn ok() -> Self {
        Self { success: true }
    }

    /// Failure acknowledgement (used where errors must not raise).
    #[must_use]
    pub const fn failed() -> Self {
        Self { success: false }
    }
}
