//! ChangeConferenceStatusHandler - Command handler for moderation.

use std::sync::Arc;

use crate::domain::conference::{Conference, ConferenceError};
use crate::domain::foundation::{CommandMetadata, ConferenceId, ConferenceStatus, Timestamp};
use crate::ports::ConferenceRepository;

use super::ConflictDetector;

/// Command to approve or reject a pending conference.
#[derive(Debug, Clone)]
pub struct ChangeConferenceStatusCommand {
    pub conference_id: ConferenceId,
    pub status: ConferenceStatus,
}

/// Result of a successful status change.
#[derive(Debug, Clone)]
pub struct ChangeConferenceStatusResult {
    pub conference: Conference,
}

/// Handler for moderating proposals.
pub struct ChangeConferenceStatusHandler {
    repository: Arc<dyn ConferenceRepository>,
    conflicts: ConflictDetector,
}

impl ChangeConferenceStatusHandler {
    pub fn new(repository: Arc<dyn ConferenceRepository>) -> Self {
        Self {
            conflicts: ConflictDetector::new(repository.clone()),
            repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: ChangeConferenceStatusCommand,
        metadata: CommandMetadata,
    ) -> Result<ChangeConferenceStatusResult, ConferenceError> {
        if !metadata.principal.can_moderate() {
            return Err(ConferenceError::forbidden(
                "Only coordinators can change conference status",
            ));
        }

        let mut conference = self
            .repository
            .find_by_id(&cmd.conference_id)
            .await?
            .ok_or_else(|| ConferenceError::not_found(cmd.conference_id))?;

        conference.change_status(cmd.status, Timestamp::now())?;

        if conference.status() == ConferenceStatus::Approved {
            self.conflicts
                .ensure_free(conference.window(), Some(conference.id()))
                .await?;
        }

        self.repository.update(&conference).await?;

        tracing::info!(
            conference_id = %conference.id(),
            status = %conference.status(),
            moderator = %metadata.principal,
            correlation_id = %metadata.correlation_id(),
            "conference status changed"
        );

        Ok(ChangeConferenceStatusResult { conference })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        admin, coordinator, metadata, seed, store, user, FailingConferenceRepository,
    };
    use crate::domain::foundation::{Principal, UserId};

    fn approve(conference: &Conference) -> ChangeConferenceStatusCommand {
        ChangeConferenceStatusCommand {
            conference_id: *conference.id(),
            status: ConferenceStatus::Approved,
        }
    }

    fn reject(conference: &Conference) -> ChangeConferenceStatusCommand {
        ChangeConferenceStatusCommand {
            conference_id: *conference.id(),
            status: ConferenceStatus::Rejected,
        }
    }

    #[tokio::test]
    async fn coordinator_approves_pending_conference() {
        let store = store();
        let conference = seed(&store, UserId::new(), ConferenceStatus::Pending, 1, 2).await;
        let handler = ChangeConferenceStatusHandler::new(store);

        let result = handler.handle(approve(&conference), metadata(coordinator())).await.unwrap();

        assert_eq!(result.conference.status(), ConferenceStatus::Approved);
    }

    #[tokio::test]
    async fn admin_and_system_may_moderate() {
        let store = store();
        let first = seed(&store, UserId::new(), ConferenceStatus::Pending, 1, 2).await;
        let second = seed(&store, UserId::new(), ConferenceStatus::Pending, 3, 4).await;
        let handler = ChangeConferenceStatusHandler::new(store);

        assert!(handler.handle(reject(&first), metadata(admin())).await.is_ok());
        assert!(handler
            .handle(reject(&second), metadata(Principal::system()))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn plain_user_is_forbidden_before_any_lookup() {
        let handler = ChangeConferenceStatusHandler::new(Arc::new(FailingConferenceRepository));
        let cmd = ChangeConferenceStatusCommand {
            conference_id: ConferenceId::new(),
            status: ConferenceStatus::Approved,
        };

        let result = handler.handle(cmd, metadata(user())).await;

        assert!(matches!(result, Err(ConferenceError::Forbidden(_))));
    }

    #[tokio::test]
    async fn overlapping_approval_is_refused() {
        let store = store();
        let first = seed(&store, UserId::new(), ConferenceStatus::Approved, 1, 2).await;
        let second = seed(&store, UserId::new(), ConferenceStatus::Pending, 1, 3).await;
        let handler = ChangeConferenceStatusHandler::new(store);

        let result = handler.handle(approve(&second), metadata(coordinator())).await;

        match result {
            Err(ConferenceError::TimeWindowConflict(conflicts)) => {
                assert_eq!(conflicts.len(), 1);
                assert_eq!(conflicts[0].id, *first.id());
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn overlapping_rejection_is_allowed() {
        let store = store();
        seed(&store, UserId::new(), ConferenceStatus::Approved, 1, 2).await;
        let second = seed(&store, UserId::new(), ConferenceStatus::Pending, 1, 3).await;
        let handler = ChangeConferenceStatusHandler::new(store);

        assert!(handler.handle(reject(&second), metadata(coordinator())).await.is_ok());
    }

    #[tokio::test]
    async fn started_conference_cannot_be_approved_but_can_be_rejected() {
        let store = store();
        let conference = seed(&store, UserId::new(), ConferenceStatus::Pending, -1, 1).await;
        let handler = ChangeConferenceStatusHandler::new(store);

        let result = handler.handle(approve(&conference), metadata(coordinator())).await;
        assert_eq!(result.unwrap_err(), ConferenceError::UpdatePastConferenceStatus);

        let result = handler.handle(reject(&conference), metadata(coordinator())).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn rejected_conference_is_final() {
        let store = store();
        let conference = seed(&store, UserId::new(), ConferenceStatus::Rejected, 1, 2).await;
        let handler = ChangeConferenceStatusHandler::new(store);

        let result = handler.handle(approve(&conference), metadata(coordinator())).await;

        assert_eq!(
            result.unwrap_err(),
            ConferenceError::UpdateNotPendingConference(ConferenceStatus::Rejected)
        );
    }

    #[tokio::test]
    async fn pending_to_pending_is_invalid_transition() {
        let store = store();
        let conference = seed(&store, UserId::new(), ConferenceStatus::Pending, 1, 2).await;
        let handler = ChangeConferenceStatusHandler::new(store);
        let cmd = ChangeConferenceStatusCommand {
            conference_id: *conference.id(),
            status: ConferenceStatus::Pending,
        };

        let result = handler.handle(cmd, metadata(coordinator())).await;

        assert!(matches!(result, Err(ConferenceError::InvalidStatusTransition(_))));
    }
}
