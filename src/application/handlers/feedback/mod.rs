//! Feedback command and query handlers.

mod create_feedback;
mod delete_feedback;
mod list_feedbacks;

pub use create_feedback::{CreateFeedbackCommand, CreateFeedbackHandler, CreateFeedbackResult};
pub use delete_feedback::{DeleteFeedbackCommand, DeleteFeedbackHandler};
pub use list_feedbacks::{ListFeedbacksHandler, ListFeedbacksQuery};
