//! Conference reader port (read side).
//!
//! Listing queries return views enriched with the derived registration
//! count and are paged with keyset cursors.

use async_trait::async_trait;

use crate::domain::conference::Conference;
use crate::domain::foundation::{ConferenceId, ConferenceStatus, DomainError, Timestamp, UserId};
use crate::domain::pagination::{Keyset, Page, PageRequest, SortKey, SortOrder};

/// A conference together with its derived registration count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceView {
    pub conference: Conference,
    pub registration_count: u32,
}

impl Keyset for ConferenceView {
    type Key = ConferenceId;

    fn keyset_id(&self) -> ConferenceId {
        *self.conference.id()
    }
}

/// Filters and paging for a conference listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceQuery {
    pub page: PageRequest<ConferenceId>,
    /// Required; a listing always targets one status.
    pub status: ConferenceStatus,
    pub host_id: Option<UserId>,
    /// Case-insensitive substring match on the title.
    pub title: Option<String>,
    pub starts_before: Option<Timestamp>,
    pub starts_after: Option<Timestamp>,
    /// When false, conferences that have ended are skipped.
    pub include_past: bool,
    pub sort: SortKey,
    pub order: SortOrder,
}

impl ConferenceQuery {
    /// Approved, upcoming conferences in identifier order.
    pub fn approved(page: PageRequest<ConferenceId>) -> Self {
        Self {
            page,
            status: ConferenceStatus::Approved,
            host_id: None,
            title: None,
            starts_before: None,
            starts_after: None,
            include_past: false,
            sort: SortKey::CreatedAt,
            order: SortOrder::Asc,
        }
    }
}

/// Reader port for conference queries.
#[async_trait]
pub trait ConferenceReader: Send + Sync {
    /// Get a live conference view by ID.
    async fn get(&self, id: &ConferenceId) -> Result<Option<ConferenceView>, DomainError>;

    /// List live conferences matching the query.
    async fn list(&self, query: &ConferenceQuery) -> Result<Page<ConferenceView>, DomainError>;
}
