//! Request/response DTO types, grouped by endpoint family.

pub mod admin_dto;
pub mod analytics_dto;
pub mod common_dto;
pub mod contact_dto;
pub mod events_dto;
pub mod playlist_dto;
pub mod review_dto;

pub use admin_dto::{
    ImpersonateRequest, ImpersonateResponse, SendCustomEmailRequest, SendMessageRequest,
};
pub use analytics_dto::AnalyticsRequest;
pub use common_dto::SuccessResponse;
pub use contact_dto::ContactRequest;
pub use events_dto::{EmailEventKind, InboundEventRequest};
pub use playlist_dto::PlaylistInfoRequest;
pub use review_dto::{ReviewRequest, ReviewResponse};
