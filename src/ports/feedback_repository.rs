//! Feedback repository port.

use async_trait::async_trait;

use crate::domain::feedback::Feedback;
use crate::domain::foundation::{ConferenceId, DomainError, FeedbackId, Timestamp, UserId};
use crate::domain::pagination::{Page, PageRequest};

/// Repository port for feedback.
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Persist new feedback.
    ///
    /// # Errors
    ///
    /// - `FeedbackAlreadyGiven` if the user already left live feedback
    /// - `DatabaseError` on persistence failure
    async fn save(&self, feedback: &Feedback) -> Result<(), DomainError>;

    /// Whether the user already left live feedback on the conference.
    async fn exists_for(
        &self,
        conference_id: &ConferenceId,
        user_id: &UserId,
    ) -> Result<bool, DomainError>;

    /// Live feedback for a conference in id order.
    async fn list_by_conference(
        &self,
        conference_id: &ConferenceId,
        page: &PageRequest<FeedbackId>,
    ) -> Result<Page<Feedback>, DomainError>;

    /// Soft-delete feedback.
    ///
    /// # Errors
    ///
    /// - `FeedbackNotFound` (with a `feedback_id` detail) if no live row exists
    async fn soft_delete(&self, id: &FeedbackId, at: Timestamp) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn FeedbackRepository) {}
    }
}
