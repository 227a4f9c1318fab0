//! UpdateConferenceHandler - Command handler for host edits.

use std::sync::Arc;

use crate::domain::conference::{Conference, ConferenceError, ConferenceUpdate};
use crate::domain::foundation::{CommandMetadata, ConferenceId, Timestamp};
use crate::ports::ConferenceRepository;

use super::ConflictDetector;

/// Command to partially update a conference.
#[derive(Debug, Clone)]
pub struct UpdateConferenceCommand {
    pub conference_id: ConferenceId,
    pub update: ConferenceUpdate,
}

/// Result of a successful update.
#[derive(Debug, Clone)]
pub struct UpdateConferenceResult {
    pub conference: Conference,
}

/// Handler for host edits.
pub struct UpdateConferenceHandler {
    repository: Arc<dyn ConferenceRepository>,
    conflicts: ConflictDetector,
}

impl UpdateConferenceHandler {
    pub fn new(repository: Arc<dyn ConferenceRepository>) -> Self {
        Self {
            conflicts: ConflictDetector::new(repository.clone()),
            repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateConferenceCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateConferenceResult, ConferenceError> {
        let mut conference = self
            .repository
            .find_by_id(&cmd.conference_id)
            .await?
            .ok_or_else(|| ConferenceError::not_found(cmd.conference_id))?;

        let window_changed =
            conference.apply_update(cmd.update, &metadata.principal, Timestamp::now())?;

        if window_changed {
            self.conflicts
                .ensure_free(conference.window(), Some(conference.id()))
                .await?;
        }

        self.repository.update(&conference).await?;

        tracing::info!(
            conference_id = %conference.id(),
            window_changed,
            correlation_id = %metadata.correlation_id(),
            "conference updated"
        );

        Ok(UpdateConferenceResult { conference })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{as_user, coordinator, metadata, seed, store};
    use crate::domain::foundation::{ConferenceStatus, UserId};

    fn retitle() -> ConferenceUpdate {
        ConferenceUpdate {
            title: Some("Async Rust in Practice".to_string()),
            ..Default::default()
        }
    }

    fn move_to(start_h: i64, end_h: i64) -> ConferenceUpdate {
        let now = Timestamp::now();
        ConferenceUpdate {
            starts_at: Some(now.plus_hours(start_h)),
            ends_at: Some(now.plus_hours(end_h)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn host_can_retitle_pending_conference() {
        let store = store();
        let host = UserId::new();
        let conference = seed(&store, host, ConferenceStatus::Pending, 1, 2).await;
        let handler = UpdateConferenceHandler::new(store.clone());

        let result = handler
            .handle(
                UpdateConferenceCommand { conference_id: *conference.id(), update: retitle() },
                metadata(as_user(host)),
            )
            .await
            .unwrap();

        assert_eq!(result.conference.title(), "Async Rust in Practice");
        let stored = ConferenceRepository::find_by_id(store.as_ref(), conference.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.title(), "Async Rust in Practice");
    }

    #[tokio::test]
    async fn non_host_is_forbidden_even_as_coordinator() {
        let store = store();
        let conference = seed(&store, UserId::new(), ConferenceStatus::Pending, 1, 2).await;
        let handler = UpdateConferenceHandler::new(store);

        let result = handler
            .handle(
                UpdateConferenceCommand { conference_id: *conference.id(), update: retitle() },
                metadata(coordinator()),
            )
            .await;

        assert!(matches!(result, Err(ConferenceError::Forbidden(_))));
    }

    #[tokio::test]
    async fn moved_window_must_be_free() {
        let store = store();
        let host = UserId::new();
        seed(&store, UserId::new(), ConferenceStatus::Approved, 5, 7).await;
        let conference = seed(&store, host, ConferenceStatus::Pending, 1, 2).await;
        let handler = UpdateConferenceHandler::new(store);

        let result = handler
            .handle(
                UpdateConferenceCommand { conference_id: *conference.id(), update: move_to(6, 8) },
                metadata(as_user(host)),
            )
            .await;

        assert!(matches!(result, Err(ConferenceError::TimeWindowConflict(_))));
    }

    #[tokio::test]
    async fn approved_window_cannot_move() {
        let store = store();
        let host = UserId::new();
        let conference = seed(&store, host, ConferenceStatus::Approved, 1, 2).await;
        let handler = UpdateConferenceHandler::new(store);

        let result = handler
            .handle(
                UpdateConferenceCommand { conference_id: *conference.id(), update: move_to(3, 4) },
                metadata(as_user(host)),
            )
            .await;

        assert_eq!(result.unwrap_err(), ConferenceError::UpdateApprovedTimeWindow);
    }

    #[tokio::test]
    async fn ended_conference_cannot_be_edited() {
        let store = store();
        let host = UserId::new();
        let conference = seed(&store, host, ConferenceStatus::Pending, -3, -2).await;
        let handler = UpdateConferenceHandler::new(store);

        let result = handler
            .handle(
                UpdateConferenceCommand { conference_id: *conference.id(), update: retitle() },
                metadata(as_user(host)),
            )
            .await;

        assert_eq!(result.unwrap_err(), ConferenceError::UpdatePastConference);
    }

    #[tokio::test]
    async fn missing_conference_is_not_found() {
        let handler = UpdateConferenceHandler::new(store());
        let id = ConferenceId::new();

        let result = handler
            .handle(
                UpdateConferenceCommand { conference_id: id, update: retitle() },
                metadata(coordinator()),
            )
            .await;

        assert_eq!(result.unwrap_err(), ConferenceError::NotFound(id));
    }
}
