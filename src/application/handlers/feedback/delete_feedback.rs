//! DeleteFeedbackHandler - Command handler for moderating feedback.

use std::sync::Arc;

use crate::domain::feedback::FeedbackError;
use crate::domain::foundation::{CommandMetadata, FeedbackId, Timestamp};
use crate::ports::FeedbackRepository;

/// Command to remove a feedback entry.
#[derive(Debug, Clone)]
pub struct DeleteFeedbackCommand {
    pub feedback_id: FeedbackId,
}

/// Coordinators remove feedback; the row is soft-deleted.
pub struct DeleteFeedbackHandler {
    feedback: Arc<dyn FeedbackRepository>,
}

impl DeleteFeedbackHandler {
    pub fn new(feedback: Arc<dyn FeedbackRepository>) -> Self {
        Self { feedback }
    }

    pub async fn handle(
        &self,
        cmd: DeleteFeedbackCommand,
        metadata: CommandMetadata,
    ) -> Result<(), FeedbackError> {
        if !metadata.principal.can_moderate() {
            return Err(FeedbackError::forbidden("Only coordinators can delete feedback"));
        }

        self.feedback
            .soft_delete(&cmd.feedback_id, Timestamp::now())
            .await?;

        tracing::info!(
            feedback_id = %cmd.feedback_id,
            deleted_by = %metadata.principal,
            correlation_id = %metadata.correlation_id(),
            "feedback deleted"
        );

        Ok(())
    }
}
