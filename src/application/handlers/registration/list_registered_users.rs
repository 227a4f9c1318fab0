//! ListRegisteredUsersHandler - Query handler for a conference's attendees.

use std::sync::Arc;

use crate::domain::conference::ConferenceError;
use crate::domain::foundation::{ConferenceId, OwnedByUser, Principal, UserId};
use crate::domain::pagination::{Page, PageRequest, DEFAULT_PAGE_SIZE};
use crate::domain::registration::Registration;
use crate::ports::{ConferenceRepository, RegistrationRepository};

/// Query to list users registered for a conference.
#[derive(Debug, Clone)]
pub struct ListRegisteredUsersQuery {
    pub conference_id: ConferenceId,
    pub after_id: Option<UserId>,
    pub before_id: Option<UserId>,
    pub limit: Option<u32>,
}

/// Handler for listing attendees, for the host and coordinators.
pub struct ListRegisteredUsersHandler {
    conferences: Arc<dyn ConferenceRepository>,
    registrations: Arc<dyn RegistrationRepository>,
}

impl ListRegisteredUsersHandler {
    pub fn new(
        conferences: Arc<dyn ConferenceRepository>,
        registrations: Arc<dyn RegistrationRepository>,
    ) -> Self {
        Self {
            conferences,
            registrations,
        }
    }

    pub async fn handle(
        &self,
        query: ListRegisteredUsersQuery,
        principal: &Principal,
    ) -> Result<Page<Registration>, ConferenceError> {
        let page = PageRequest::new(
            query.after_id,
            query.before_id,
            query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )?;

        let conference = self
            .conferences
            .find_by_id(&query.conference_id)
            .await?
            .ok_or_else(|| ConferenceError::not_found(query.conference_id))?;

        if !principal.can_moderate() && !conference.is_owned_by(principal) {
            return Err(ConferenceError::forbidden(
                "Only the host or a coordinator can list attendees",
            ));
        }

        Ok(self
            .registrations
            .list_registered_users(conference.id(), &page)
            .await?)
    }
}
