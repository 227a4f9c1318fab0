//! RegisterHandler - Command handler for seat registration.

use std::sync::Arc;

use crate::domain::conference::ConferenceError;
use crate::domain::foundation::{CommandMetadata, ConferenceId, Timestamp};
use crate::domain::registration::Registration;
use crate::ports::{ConferenceRepository, RegistrationRepository};

use super::CapacityGuard;

/// Command to register the caller for a conference.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub conference_id: ConferenceId,
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct RegisterResult {
    pub registration: Registration,
}

/// Handler for registering users.
pub struct RegisterHandler {
    guard: CapacityGuard,
    registrations: Arc<dyn RegistrationRepository>,
}

impl RegisterHandler {
    pub fn new(
        conferences: Arc<dyn ConferenceRepository>,
        registrations: Arc<dyn RegistrationRepository>,
    ) -> Self {
        Self {
            guard: CapacityGuard::new(conferences, registrations.clone()),
            registrations,
        }
    }

    pub async fn handle(
        &self,
        cmd: RegisterCommand,
        metadata: CommandMetadata,
    ) -> Result<RegisterResult, ConferenceError> {
        let user_id = *metadata
            .principal
            .user_id()
            .ok_or_else(|| ConferenceError::forbidden("Only users can register"))?;
        let now = Timestamp::now();

        let conference = self
            .guard
            .admit(&cmd.conference_id, &user_id, &metadata.principal, now)
            .await?;

        let registration = Registration::new(*conference.id(), user_id, now);
        if let Err(e) = self.registrations.create(&registration).await {
            // Lost a race for the last seat or a duplicate submit.
            tracing::warn!(
                conference_id = %conference.id(),
                user_id = %user_id,
                code = %e.code,
                "registration refused at write"
            );
            return Err(e.into());
        }

        tracing::info!(
            conference_id = %conference.id(),
            user_id = %user_id,
            correlation_id = %metadata.correlation_id(),
            "user registered"
        );

        Ok(RegisterResult { registration })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryScheduleStore;
    use crate::application::handlers::test_support::{as_user, metadata, seed, store};
    use crate::domain::conference::{Conference, ConferenceDetails};
    use crate::domain::foundation::{ConferenceStatus, Principal, UserId};

    fn handler(store: &Arc<InMemoryScheduleStore>) -> RegisterHandler {
        RegisterHandler::new(store.clone(), store.clone())
    }

    async fn single_seat(store: &InMemoryScheduleStore) -> Conference {
        let template = seed(store, UserId::new(), ConferenceStatus::Approved, 1, 2).await;
        let conference = Conference::reconstitute(
            *template.id(),
            *template.host_id(),
            ConferenceDetails {
                seats: 1,
                ..template.details().clone()
            },
            *template.window(),
            template.status(),
            *template.created_at(),
            *template.updated_at(),
            None,
        );
        ConferenceRepository::update(store, &conference).await.unwrap();
        conference
    }

    #[tokio::test]
    async fn registers_caller() {
        let store = store();
        let conference = seed(&store, UserId::new(), ConferenceStatus::Approved, 1, 2).await;
        let attendee = UserId::new();

        let result = handler(&store)
            .handle(
                RegisterCommand { conference_id: *conference.id() },
                metadata(as_user(attendee)),
            )
            .await
            .unwrap();

        assert_eq!(result.registration.user_id, attendee);
        assert!(store.is_registered(conference.id(), &attendee).await.unwrap());
    }

    #[tokio::test]
    async fn last_seat_goes_to_exactly_one_of_two_concurrent_users() {
        let store = store();
        let conference = single_seat(&store).await;
        let handler = handler(&store);
        let (a, b) = (UserId::new(), UserId::new());
        let cmd = RegisterCommand { conference_id: *conference.id() };

        let (first, second) = tokio::join!(
            handler.handle(cmd.clone(), metadata(as_user(a))),
            handler.handle(cmd.clone(), metadata(as_user(b))),
        );

        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(outcomes
            .iter()
            .any(|r| matches!(r, Err(ConferenceError::ConferenceFull))));
        assert_eq!(store.registration_total().await, 1);
    }

    #[tokio::test]
    async fn missing_conference_is_not_found() {
        let store = store();
        let id = ConferenceId::new();

        let result = handler(&store)
            .handle(RegisterCommand { conference_id: id }, metadata(as_user(UserId::new())))
            .await;

        assert_eq!(result.unwrap_err(), ConferenceError::NotFound(id));
    }

    #[tokio::test]
    async fn system_principal_cannot_register() {
        let store = store();
        let conference = seed(&store, UserId::new(), ConferenceStatus::Approved, 1, 2).await;

        let result = handler(&store)
            .handle(
                RegisterCommand { conference_id: *conference.id() },
                metadata(Principal::system()),
            )
            .await;

        assert!(matches!(result, Err(ConferenceError::Forbidden(_))));
    }
}
