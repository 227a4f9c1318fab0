//! In-Memory Schedule Store Adapter
//!
//! Keeps conferences, registrations and feedback in one map set behind a
//! single lock, so every write applies its invariant checks atomically.
//! Useful for testing and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conference::Conference;
use crate::domain::feedback::Feedback;
use crate::domain::foundation::{
    ConferenceId, ConferenceStatus, DomainError, ErrorCode, FeedbackId, TimeWindow, Timestamp,
    UserId,
};
use crate::domain::pagination::{assemble_page, Keyset, Page, PageRequest, SortKey, SortOrder};
use crate::domain::registration::Registration;
use crate::ports::{
    ConferenceQuery, ConferenceReader, ConferenceRepository, ConferenceView, FeedbackRepository,
    RegistrationRepository, CONFLICT_LIMIT,
};

#[derive(Debug, Default)]
struct State {
    conferences: HashMap<ConferenceId, Conference>,
    registrations: HashMap<(ConferenceId, UserId), Registration>,
    feedback: HashMap<FeedbackId, Feedback>,
}

impl State {
    fn live(&self, id: &ConferenceId) -> Option<&Conference> {
        self.conferences.get(id).filter(|c| !c.is_deleted())
    }

    fn registration_count(&self, id: &ConferenceId) -> u32 {
        self.registrations
            .keys()
            .filter(|(conference_id, _)| conference_id == id)
            .count() as u32
    }

    fn view(&self, conference: &Conference) -> ConferenceView {
        ConferenceView {
            conference: conference.clone(),
            registration_count: self.registration_count(conference.id()),
        }
    }

    /// Refuses an approved window overlapping another approved conference.
    fn check_exclusion(&self, conference: &Conference) -> Result<(), DomainError> {
        if conference.status() != ConferenceStatus::Approved || conference.is_deleted() {
            return Ok(());
        }
        let clash = self.conferences.values().any(|other| {
            other.id() != conference.id()
                && !other.is_deleted()
                && other.status() == ConferenceStatus::Approved
                && other.window().overlaps(conference.window())
        });
        if clash {
            return Err(DomainError::new(
                ErrorCode::TimeWindowConflict,
                "Approved time windows may not overlap",
            ));
        }
        Ok(())
    }

    /// Composite `(starts_at, id)` position of a cursor row, deleted or not.
    fn start_position(&self, id: &ConferenceId) -> Option<(Timestamp, ConferenceId)> {
        self.conferences
            .get(id)
            .map(|c| (c.window().starts_at(), *c.id()))
    }
}

/// In-memory implementation of every persistence port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScheduleStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryScheduleStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored conferences, including deleted ones
    pub async fn conference_count(&self) -> usize {
        self.state.read().await.conferences.len()
    }

    /// Get the number of stored registrations
    pub async fn registration_total(&self) -> usize {
        self.state.read().await.registrations.len()
    }
}

fn conference_not_found(id: &ConferenceId) -> DomainError {
    DomainError::new(ErrorCode::ConferenceNotFound, format!("Conference not found: {}", id))
        .with_detail("conference_id", id.to_string())
}

/// Orders, cursors and bounds `rows` the way the SQL adapter does.
///
/// `cursor_position` is the sort position of the cursor row; `None` with a
/// cursor present means the cursor row could not be resolved, which yields
/// an empty page.
fn keyset_scan<T, S, F>(
    mut rows: Vec<T>,
    request: &PageRequest<T::Key>,
    order: SortOrder,
    cursor_position: Option<S>,
    sort_key: F,
) -> Page<T>
where
    T: Keyset,
    S: Ord,
    F: Fn(&T) -> S,
{
    let scan = request.scan_order(order);
    rows.sort_by_key(&sort_key);
    if scan == SortOrder::Desc {
        rows.reverse();
    }

    if request.cursor().is_some() {
        match cursor_position {
            Some(position) => rows.retain(|row| match scan {
                SortOrder::Asc => sort_key(row) > position,
                SortOrder::Desc => sort_key(row) < position,
            }),
            None => rows.clear(),
        }
    }

    rows.truncate(request.fetch_limit() as usize);
    assemble_page(rows, request)
}

#[async_trait]
impl ConferenceRepository for InMemoryScheduleStore {
    async fn save(&self, conference: &Conference) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.check_exclusion(conference)?;
        state
            .conferences
            .insert(*conference.id(), conference.clone());
        Ok(())
    }

    async fn update(&self, conference: &Conference) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.live(conference.id()).is_none() {
            return Err(conference_not_found(conference.id()));
        }
        state.check_exclusion(conference)?;
        state
            .conferences
            .insert(*conference.id(), conference.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ConferenceId) -> Result<Option<Conference>, DomainError> {
        Ok(self.state.read().await.live(id).cloned())
    }

    async fn soft_delete(&self, id: &ConferenceId, at: Timestamp) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.conferences.get_mut(id).filter(|c| !c.is_deleted()) {
            Some(conference) => {
                conference.mark_deleted(at);
                Ok(())
            }
            None => Err(conference_not_found(id)),
        }
    }

    async fn find_conflicting(
        &self,
        window: &TimeWindow,
        exclude: Option<&ConferenceId>,
    ) -> Result<Vec<Conference>, DomainError> {
        let state = self.state.read().await;
        let mut conflicts: Vec<Conference> = state
            .conferences
            .values()
            .filter(|c| !c.is_deleted())
            .filter(|c| c.status() == ConferenceStatus::Approved)
            .filter(|c| Some(c.id()) != exclude)
            .filter(|c| c.window().overlaps(window))
            .cloned()
            .collect();
        conflicts.sort_by_key(|c| (c.window().starts_at(), *c.id()));
        conflicts.truncate(CONFLICT_LIMIT);
        Ok(conflicts)
    }

    async fn find_active_proposal(
        &self,
        host_id: &UserId,
        now: Timestamp,
    ) -> Result<Option<Conference>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .conferences
            .values()
            .filter(|c| {
                !c.is_deleted()
                    && c.host_id() == host_id
                    && c.status() == ConferenceStatus::Pending
                    && !c.has_ended(now)
            })
            .min_by_key(|c| (*c.created_at(), *c.id()))
            .cloned())
    }
}

#[async_trait]
impl ConferenceReader for InMemoryScheduleStore {
    async fn get(&self, id: &ConferenceId) -> Result<Option<ConferenceView>, DomainError> {
        let state = self.state.read().await;
        Ok(state.live(id).map(|c| state.view(c)))
    }

    async fn list(&self, query: &ConferenceQuery) -> Result<Page<ConferenceView>, DomainError> {
        let state = self.state.read().await;
        let now = Timestamp::now();
        let title = query.title.as_ref().map(|t| t.to_lowercase());

        let rows: Vec<ConferenceView> = state
            .conferences
            .values()
            .filter(|c| !c.is_deleted())
            .filter(|c| c.status() == query.status)
            .filter(|c| query.host_id.map_or(true, |host| c.host_id() == &host))
            .filter(|c| {
                title
                    .as_ref()
                    .map_or(true, |t| c.title().to_lowercase().contains(t.as_str()))
            })
            .filter(|c| {
                query
                    .starts_before
                    .map_or(true, |before| c.window().starts_at() < before)
            })
            .filter(|c| {
                query
                    .starts_after
                    .map_or(true, |after| c.window().starts_at() > after)
            })
            .filter(|c| query.include_past || !c.has_ended(now))
            .map(|c| state.view(c))
            .collect();

        let page = match query.sort {
            SortKey::CreatedAt => keyset_scan(
                rows,
                &query.page,
                query.order,
                query.page.cursor_key(),
                |v: &ConferenceView| *v.conference.id(),
            ),
            SortKey::StartsAt => keyset_scan(
                rows,
                &query.page,
                query.order,
                query
                    .page
                    .cursor_key()
                    .and_then(|id| state.start_position(&id)),
                |v: &ConferenceView| (v.conference.window().starts_at(), *v.conference.id()),
            ),
        };
        Ok(page)
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryScheduleStore {
    async fn create(&self, registration: &Registration) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let seats = match state.live(&registration.conference_id) {
            Some(conference) => conference.seats(),
            None => return Err(conference_not_found(&registration.conference_id)),
        };

        let key = (registration.conference_id, registration.user_id);
        if state.registrations.contains_key(&key) {
            return Err(DomainError::new(
                ErrorCode::AlreadyRegistered,
                "User is already registered for this conference",
            ));
        }
        if state.registration_count(&registration.conference_id) >= seats {
            return Err(DomainError::new(ErrorCode::ConferenceFull, "No seats left"));
        }

        state.registrations.insert(key, registration.clone());
        Ok(())
    }

    async fn is_registered(
        &self,
        conference_id: &ConferenceId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .registrations
            .contains_key(&(*conference_id, *user_id)))
    }

    async fn count_by_conference(&self, conference_id: &ConferenceId) -> Result<u32, DomainError> {
        Ok(self.state.read().await.registration_count(conference_id))
    }

    async fn find_conflicting(
        &self,
        user_id: &UserId,
        window: &TimeWindow,
    ) -> Result<Vec<Conference>, DomainError> {
        let state = self.state.read().await;
        let mut conflicts: Vec<Conference> = state
            .registrations
            .keys()
            .filter(|(_, registered)| registered == user_id)
            .filter_map(|(conference_id, _)| state.live(conference_id))
            .filter(|c| c.window().overlaps(window))
            .cloned()
            .collect();
        conflicts.sort_by_key(|c| (c.window().starts_at(), *c.id()));
        conflicts.truncate(CONFLICT_LIMIT);
        Ok(conflicts)
    }

    async fn list_registered_users(
        &self,
        conference_id: &ConferenceId,
        page: &PageRequest<UserId>,
    ) -> Result<Page<Registration>, DomainError> {
        let state = self.state.read().await;
        let rows: Vec<Registration> = state
            .registrations
            .values()
            .filter(|r| &r.conference_id == conference_id)
            .cloned()
            .collect();
        Ok(keyset_scan(
            rows,
            page,
            SortOrder::Asc,
            page.cursor_key(),
            |r: &Registration| r.user_id,
        ))
    }

    async fn list_registered_conferences(
        &self,
        user_id: &UserId,
        include_past: bool,
        page: &PageRequest<ConferenceId>,
    ) -> Result<Page<ConferenceView>, DomainError> {
        let state = self.state.read().await;
        let now = Timestamp::now();
        let rows: Vec<ConferenceView> = state
            .registrations
            .keys()
            .filter(|(_, registered)| registered == user_id)
            .filter_map(|(conference_id, _)| state.live(conference_id))
            .filter(|c| include_past || !c.has_ended(now))
            .map(|c| state.view(c))
            .collect();
        Ok(keyset_scan(
            rows,
            page,
            SortOrder::Asc,
            page.cursor_key().and_then(|id| state.start_position(&id)),
            |v: &ConferenceView| (v.conference.window().starts_at(), *v.conference.id()),
        ))
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryScheduleStore {
    async fn save(&self, feedback: &Feedback) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let duplicate = state.feedback.values().any(|f| {
            f.deleted_at().is_none()
                && f.conference_id() == feedback.conference_id()
                && f.user_id() == feedback.user_id()
        });
        if duplicate {
            return Err(DomainError::new(
                ErrorCode::FeedbackAlreadyGiven,
                "Feedback already given",
            ));
        }
        state.feedback.insert(*feedback.id(), feedback.clone());
        Ok(())
    }

    async fn exists_for(
        &self,
        conference_id: &ConferenceId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        let state = self.state.read().await;
        Ok(state.feedback.values().any(|f| {
            f.deleted_at().is_none()
                && f.conference_id() == conference_id
                && f.user_id() == user_id
        }))
    }

    async fn list_by_conference(
        &self,
        conference_id: &ConferenceId,
        page: &PageRequest<FeedbackId>,
    ) -> Result<Page<Feedback>, DomainError> {
        let state = self.state.read().await;
        let rows: Vec<Feedback> = state
            .feedback
            .values()
            .filter(|f| f.deleted_at().is_none() && f.conference_id() == conference_id)
            .cloned()
            .collect();
        Ok(keyset_scan(
            rows,
            page,
            SortOrder::Asc,
            page.cursor_key(),
            |f: &Feedback| *f.id(),
        ))
    }

    async fn soft_delete(&self, id: &FeedbackId, at: Timestamp) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.feedback.get_mut(id).filter(|f| f.deleted_at().is_none()) {
            Some(feedback) => {
                feedback.mark_deleted(at);
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::FeedbackNotFound,
                format!("Feedback not found: {}", id),
            )
            .with_detail("feedback_id", id.to_string())),
        }
    }
}
