//! CreateConferenceHandler - Command handler for proposing conferences.

use std::sync::Arc;

use crate::domain::conference::{
    Conference, ConferenceDetails, ConferenceError, ProposalSummary,
};
use crate::domain::foundation::{
    CommandMetadata, ConferenceId, TimeWindow, Timestamp,
};
use crate::ports::{ConferenceRepository, IdGenerator};

use super::ConflictDetector;

/// Command to propose a new conference.
#[derive(Debug, Clone)]
pub struct CreateConferenceCommand {
    pub details: ConferenceDetails,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

/// Result of successful conference creation.
#[derive(Debug, Clone)]
pub struct CreateConferenceResult {
    pub conference: Conference,
}

/// Handler for proposing conferences.
pub struct CreateConferenceHandler {
    repository: Arc<dyn ConferenceRepository>,
    conflicts: ConflictDetector,
    id_generator: Arc<dyn IdGenerator>,
}

impl CreateConferenceHandler {
    pub fn new(
        repository: Arc<dyn ConferenceRepository>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            conflicts: ConflictDetector::new(repository.clone()),
            repository,
            id_generator,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateConferenceCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateConferenceResult, ConferenceError> {
        let host_id = *metadata
            .principal
            .user_id()
            .ok_or_else(|| ConferenceError::forbidden("Only users can propose conferences"))?;
        let now = Timestamp::now();

        // 1. Field and window checks
        cmd.details.validate()?;
        let window = TimeWindow::new(cmd.starts_at, cmd.ends_at)?;
        if window.has_started(now) {
            return Err(ConferenceError::TimeAlreadyPassed);
        }

        // 2. One upcoming proposal per host
        if let Some(pending) = self.repository.find_active_proposal(&host_id, now).await? {
            return Err(ConferenceError::UserHasActiveProposal(
                ProposalSummary::from(&pending),
            ));
        }

        // 3. Approved schedule must be free
        self.conflicts.ensure_free(&window, None).await?;

        // 4. Create and persist
        let id = self
            .id_generator
            .new_sortable_id()
            .map(ConferenceId::from_uuid)
            .map_err(|e| ConferenceError::internal("conference id generation", e))?;
        let conference = Conference::propose(id, host_id, cmd.details, window, now)?;

        self.repository.save(&conference).await?;

        tracing::info!(
            conference_id = %conference.id(),
            host_id = %host_id,
            correlation_id = %metadata.correlation_id(),
            "conference proposed"
        );

        Ok(CreateConferenceResult { conference })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        as_user, coordinator, ids, metadata, seed, store, user, FailingConferenceRepository,
    };
    use crate::domain::conference::test_support::details;
    use crate::domain::foundation::{ConferenceStatus, DomainError, ErrorCode, Principal, UserId};
    use uuid::Uuid;

    fn command(start_h: i64, end_h: i64) -> CreateConferenceCommand {
        let now = Timestamp::now();
        CreateConferenceCommand {
            details: details("Rust at Scale"),
            starts_at: now.plus_hours(start_h),
            ends_at: now.plus_hours(end_h),
        }
    }

    struct BrokenIdGenerator;

    impl IdGenerator for BrokenIdGenerator {
        fn new_sortable_id(&self) -> Result<Uuid, DomainError> {
            Err(DomainError::new(ErrorCode::IdGenerationFailed, "clock unavailable"))
        }
    }

    #[tokio::test]
    async fn creates_pending_conference_for_host() {
        let store = store();
        let handler = CreateConferenceHandler::new(store.clone(), ids());
        let principal = user();

        let result = handler.handle(command(1, 2), metadata(principal)).await.unwrap();

        assert_eq!(result.conference.status(), ConferenceStatus::Pending);
        assert_eq!(Some(result.conference.host_id()), principal.user_id());
        assert_eq!(store.conference_count().await, 1);
    }

    #[tokio::test]
    async fn invalid_field_wins_over_bad_window() {
        let handler = CreateConferenceHandler::new(store(), ids());
        let mut cmd = command(2, 1);
        cmd.details.title = "ab".to_string();

        let result = handler.handle(cmd, metadata(user())).await;

        assert!(matches!(
            result,
            Err(ConferenceError::ValidationFailed { ref field, .. }) if field == "title"
        ));
    }

    #[tokio::test]
    async fn end_before_start_wins_over_past_start() {
        let handler = CreateConferenceHandler::new(store(), ids());

        let result = handler.handle(command(-1, -2), metadata(user())).await;

        assert_eq!(result.unwrap_err(), ConferenceError::EndTimeBeforeStart);
    }

    #[tokio::test]
    async fn equal_start_and_end_is_rejected() {
        let handler = CreateConferenceHandler::new(store(), ids());

        let result = handler.handle(command(1, 1), metadata(user())).await;

        assert_eq!(result.unwrap_err(), ConferenceError::EndTimeBeforeStart);
    }

    #[tokio::test]
    async fn past_start_is_rejected() {
        let handler = CreateConferenceHandler::new(store(), ids());

        let result = handler.handle(command(-1, 1), metadata(user())).await;

        assert_eq!(result.unwrap_err(), ConferenceError::TimeAlreadyPassed);
    }

    #[tokio::test]
    async fn second_upcoming_proposal_is_refused() {
        let store = store();
        let host = UserId::new();
        let pending = seed(&store, host, ConferenceStatus::Pending, 5, 6).await;
        let handler = CreateConferenceHandler::new(store, ids());

        let result = handler
            .handle(command(1, 2), metadata(as_user(host)))
            .await;

        match result {
            Err(ConferenceError::UserHasActiveProposal(blocking)) => {
                assert_eq!(blocking.id, *pending.id());
                assert_eq!(blocking.status, ConferenceStatus::Pending);
            }
            other => panic!("expected active proposal refusal, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn ended_pending_proposal_does_not_block() {
        let store = store();
        let host = UserId::new();
        seed(&store, host, ConferenceStatus::Pending, -3, -2).await;
        let handler = CreateConferenceHandler::new(store, ids());

        let result = handler
            .handle(command(1, 2), metadata(as_user(host)))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn overlap_with_approved_conference_is_reported() {
        let store = store();
        let blocker = seed(&store, UserId::new(), ConferenceStatus::Approved, 1, 3).await;
        let handler = CreateConferenceHandler::new(store, ids());

        let result = handler.handle(command(2, 4), metadata(coordinator())).await;

        match result {
            Err(ConferenceError::TimeWindowConflict(conflicts)) => {
                assert_eq!(conflicts[0].id, *blocker.id());
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn system_principal_cannot_propose() {
        let handler = CreateConferenceHandler::new(store(), ids());

        let result = handler.handle(command(1, 2), metadata(Principal::system())).await;

        assert!(matches!(result, Err(ConferenceError::Forbidden(_))));
    }

    #[tokio::test]
    async fn id_generation_failure_is_internal() {
        let store = store();
        let handler = CreateConferenceHandler::new(store.clone(), Arc::new(BrokenIdGenerator));

        let result = handler.handle(command(1, 2), metadata(user())).await;

        assert!(matches!(result, Err(ConferenceError::Internal { .. })));
        assert_eq!(store.conference_count().await, 0);
    }

    #[tokio::test]
    async fn store_failure_is_internal() {
        let handler = CreateConferenceHandler::new(Arc::new(FailingConferenceRepository), ids());

        let result = handler.handle(command(1, 2), metadata(user())).await;

        assert!(result.unwrap_err().trace_id().is_some());
    }
}
