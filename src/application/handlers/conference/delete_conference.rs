//! DeleteConferenceHandler - Command handler for soft deletion.

use std::sync::Arc;

use crate::domain::conference::visibility::ensure_can_delete;
use crate::domain::conference::ConferenceError;
use crate::domain::foundation::{CommandMetadata, ConferenceId, Timestamp};
use crate::ports::ConferenceRepository;

/// Command to delete a conference.
#[derive(Debug, Clone)]
pub struct DeleteConferenceCommand {
    pub conference_id: ConferenceId,
}

/// Handler for deleting conferences.
pub struct DeleteConferenceHandler {
    repository: Arc<dyn ConferenceRepository>,
}

impl DeleteConferenceHandler {
    pub fn new(repository: Arc<dyn ConferenceRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: DeleteConferenceCommand,
        metadata: CommandMetadata,
    ) -> Result<(), ConferenceError> {
        let conference = self
            .repository
            .find_by_id(&cmd.conference_id)
            .await?
            .ok_or_else(|| ConferenceError::not_found(cmd.conference_id))?;

        ensure_can_delete(&conference, &metadata.principal)?;

        self.repository
            .soft_delete(conference.id(), Timestamp::now())
            .await?;

        tracing::info!(
            conference_id = %conference.id(),
            correlation_id = %metadata.correlation_id(),
            "conference deleted"
        );

        Ok(())
    }
}
