//! ListRegisteredConferencesHandler - Query handler for a user's schedule.

use std::sync::Arc;

use crate::domain::conference::ConferenceError;
use crate::domain::foundation::{ConferenceId, Principal, UserId};
use crate::domain::pagination::{Page, PageRequest, DEFAULT_PAGE_SIZE};
use crate::ports::{ConferenceView, RegistrationRepository};

/// Query to list the conferences a user registered for.
#[derive(Debug, Clone)]
pub struct ListRegisteredConferencesQuery {
    pub user_id: UserId,
    pub include_past: bool,
    pub after_id: Option<ConferenceId>,
    pub before_id: Option<ConferenceId>,
    pub limit: Option<u32>,
}

/// Handler for a user's registered conferences, ordered by start time.
pub struct ListRegisteredConferencesHandler {
    registrations: Arc<dyn RegistrationRepository>,
}

impl ListRegisteredConferencesHandler {
    pub fn new(registrations: Arc<dyn RegistrationRepository>) -> Self {
        Self { registrations }
    }

    pub async fn handle(
        &self,
        query: ListRegisteredConferencesQuery,
        principal: &Principal,
    ) -> Result<Page<ConferenceView>, ConferenceError> {
        let page = PageRequest::new(
            query.after_id,
            query.before_id,
            query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )?;

        if !principal.can_moderate() && !principal.is(&query.user_id) {
            return Err(ConferenceError::forbidden(
                "Users may only list their own registrations",
            ));
        }

        Ok(self
            .registrations
            .list_registered_conferences(&query.user_id, query.include_past, &page)
            .await?)
    }
}
