//! HTTP adapter for feedback endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateFeedbackRequest, FeedbackCreatedResponse, FeedbackListResponse};
pub use handlers::FeedbackHandlers;
pub use routes::feedback_routes;
