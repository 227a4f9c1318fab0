//! ListFeedbacksHandler - Query handler for a conference's feedback.

use std::sync::Arc;

use crate::domain::conference::visibility::ensure_visible;
use crate::domain::feedback::{Feedback, FeedbackError};
use crate::domain::foundation::{ConferenceId, FeedbackId, Principal};
use crate::domain::pagination::{Page, PageRequest, DEFAULT_PAGE_SIZE};
use crate::ports::{ConferenceRepository, FeedbackRepository};

/// Query to page through feedback on one conference.
#[derive(Debug, Clone)]
pub struct ListFeedbacksQuery {
    pub conference_id: ConferenceId,
    pub after_id: Option<FeedbackId>,
    pub before_id: Option<FeedbackId>,
    pub limit: Option<u32>,
}

pub struct ListFeedbacksHandler {
    conferences: Arc<dyn ConferenceRepository>,
    feedback: Arc<dyn FeedbackRepository>,
}

impl ListFeedbacksHandler {
    pub fn new(
        conferences: Arc<dyn ConferenceRepository>,
        feedback: Arc<dyn FeedbackRepository>,
    ) -> Self {
        Self {
            conferences,
            feedback,
        }
    }

    pub async fn handle(
        &self,
        query: ListFeedbacksQuery,
        principal: &Principal,
    ) -> Result<Page<Feedback>, FeedbackError> {
        let page = PageRequest::new(
            query.after_id,
            query.before_id,
            query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )?;

        let conference = self
            .conferences
            .find_by_id(&query.conference_id)
            .await?
            .ok_or(FeedbackError::ConferenceNotFound(query.conference_id))?;
        ensure_visible(&conference, principal)?;

        Ok(self.feedback.list_by_conference(conference.id(), &page).await?)
    }
}
