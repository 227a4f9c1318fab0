//! ListConferencesHandler - Query handler for keyset-paged listings.

use std::sync::Arc;

use crate::domain::conference::visibility::scope_host_filter;
use crate::domain::conference::ConferenceError;
use crate::domain::foundation::{ConferenceId, ConferenceStatus, Principal, Timestamp, UserId};
use crate::domain::pagination::{Page, PageRequest, SortKey, SortOrder, DEFAULT_PAGE_SIZE};
use crate::ports::{ConferenceQuery, ConferenceReader, ConferenceView};

/// Query to list conferences.
#[derive(Debug, Clone)]
pub struct ListConferencesQuery {
    pub after_id: Option<ConferenceId>,
    pub before_id: Option<ConferenceId>,
    pub limit: Option<u32>,
    pub status: ConferenceStatus,
    pub host_id: Option<UserId>,
    pub title: Option<String>,
    pub starts_before: Option<Timestamp>,
    pub starts_after: Option<Timestamp>,
    pub include_past: bool,
    pub sort: SortKey,
    pub order: SortOrder,
}

impl Default for ListConferencesQuery {
    fn default() -> Self {
        Self {
            after_id: None,
            before_id: None,
            limit: None,
            status: ConferenceStatus::Approved,
            host_id: None,
            title: None,
            starts_before: None,
            starts_after: None,
            include_past: false,
            sort: SortKey::default(),
            order: SortOrder::default(),
        }
    }
}

/// Handler for listing conferences.
pub struct ListConferencesHandler {
    reader: Arc<dyn ConferenceReader>,
}

impl ListConferencesHandler {
    pub fn new(reader: Arc<dyn ConferenceReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: ListConferencesQuery,
        principal: &Principal,
    ) -> Result<Page<ConferenceView>, ConferenceError> {
        // Pagination parameters are checked before anything touches the store.
        let page = PageRequest::new(
            query.after_id,
            query.before_id,
            query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )?;

        let host_id = scope_host_filter(principal, query.status, query.host_id)?;

        let store_query = ConferenceQuery {
            page,
            status: query.status,
            host_id,
            title: query.title.filter(|t| !t.trim().is_empty()),
            starts_before: query.starts_before,
            starts_after: query.starts_after,
            include_past: query.include_past,
            sort: query.sort,
            order: query.order,
        };

        Ok(self.reader.list(&store_query).await?)
    }
}
