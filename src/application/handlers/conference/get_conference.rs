//! GetConferenceHandler - Query handler for a single conference.

use std::sync::Arc;

use crate::domain::conference::visibility::ensure_visible;
use crate::domain::conference::ConferenceError;
use crate::domain::foundation::{ConferenceId, Principal};
use crate::ports::{ConferenceReader, ConferenceView};

/// Query to get a conference by ID.
#[derive(Debug, Clone)]
pub struct GetConferenceQuery {
    pub conference_id: ConferenceId,
}

/// Handler for retrieving conference details.
pub struct GetConferenceHandler {
    reader: Arc<dyn ConferenceReader>,
}

impl GetConferenceHandler {
    pub fn new(reader: Arc<dyn ConferenceReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: GetConferenceQuery,
        principal: &Principal,
    ) -> Result<ConferenceView, ConferenceError> {
        let view = self
            .reader
            .get(&query.conference_id)
            .await?
            .ok_or_else(|| ConferenceError::not_found(query.conference_id))?;

        ensure_visible(&view.conference, principal)?;

        Ok(view)
    }
}
