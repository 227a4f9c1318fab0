//! CreateFeedbackHandler - Command handler for post-conference feedback.

use std::sync::Arc;

use crate::domain::conference::visibility::ensure_visible;
use crate::domain::feedback::{Feedback, FeedbackError};
use crate::domain::foundation::{
    CommandMetadata, ConferenceId, FeedbackId, OwnedByUser, Timestamp,
};
use crate::ports::{ConferenceRepository, FeedbackRepository, IdGenerator, RegistrationRepository};

/// Command to leave feedback on a conference.
#[derive(Debug, Clone)]
pub struct CreateFeedbackCommand {
    pub conference_id: ConferenceId,
    pub comment: String,
}

/// Result of successful feedback creation.
#[derive(Debug, Clone)]
pub struct CreateFeedbackResult {
    pub feedback: Feedback,
}

/// Handler for attendee feedback.
pub struct CreateFeedbackHandler {
    conferences: Arc<dyn ConferenceRepository>,
    registrations: Arc<dyn RegistrationRepository>,
    feedback: Arc<dyn FeedbackRepository>,
    id_generator: Arc<dyn IdGenerator>,
}

impl CreateFeedbackHandler {
    pub fn new(
        conferences: Arc<dyn ConferenceRepository>,
        registrations: Arc<dyn RegistrationRepository>,
        feedback: Arc<dyn FeedbackRepository>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            conferences,
            registrations,
            feedback,
            id_generator,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateFeedbackCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateFeedbackResult, FeedbackError> {
        let user_id = *metadata
            .principal
            .user_id()
            .ok_or_else(|| FeedbackError::forbidden("Only users can give feedback"))?;
        let now = Timestamp::now();

        // 1. Attendance
        if !self
            .registrations
            .is_registered(&cmd.conference_id, &user_id)
            .await?
        {
            return Err(FeedbackError::NotRegistered);
        }
        if self.feedback.exists_for(&cmd.conference_id, &user_id).await? {
            return Err(FeedbackError::FeedbackAlreadyGiven);
        }

        // 2. Conference state
        let conference = self
            .conferences
            .find_by_id(&cmd.conference_id)
            .await?
            .ok_or(FeedbackError::ConferenceNotFound(cmd.conference_id))?;
        ensure_visible(&conference, &metadata.principal)?;
        if conference.is_owner(&user_id) {
            return Err(FeedbackError::HostCannotGiveFeedback);
        }
        if !conference.has_ended(now) {
            return Err(FeedbackError::ConferenceNotEnded);
        }

        // 3. Create and persist
        let id = self
            .id_generator
            .new_sortable_id()
            .map(FeedbackId::from_uuid)
            .map_err(|e| FeedbackError::internal("feedback id generation", e))?;
        let feedback = Feedback::new(id, cmd.conference_id, user_id, cmd.comment, now)?;

        self.feedback.save(&feedback).await?;

        tracing::info!(
            feedback_id = %feedback.id(),
            conference_id = %cmd.conference_id,
            user_id = %user_id,
            correlation_id = %metadata.correlation_id(),
            "feedback given"
        );

        Ok(CreateFeedbackResult { feedback })
    }
}
