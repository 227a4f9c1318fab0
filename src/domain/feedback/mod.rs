//! Feedback module - post-conference comments from attendees.

mod aggregate;
mod errors;

pub use aggregate::Feedback;
pub use errors::FeedbackError;
