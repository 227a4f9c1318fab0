//! HTTP routes for feedback endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{create_feedback, delete_feedback, list_feedbacks, FeedbackHandlers};

pub fn feedback_routes(handlers: FeedbackHandlers) -> Router {
    Router::new()
        .route("/", post(create_feedback))
        .route("/conferences/:id", get(list_feedbacks))
        .route("/:id", delete(delete_feedback))
        .with_state(handlers)
}
