//! Shared fixtures for handler tests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::memory::InMemoryScheduleStore;
use crate::adapters::UuidV7Generator;
use crate::domain::conference::Conference;
use crate::domain::foundation::{
    CommandMetadata, ConferenceId, ConferenceStatus, DomainError, ErrorCode, Principal,
    TimeWindow, Timestamp, UserId, UserRole,
};
use crate::ports::{ConferenceRepository, IdGenerator};

pub fn user() -> Principal {
    Principal::user(UserId::new(), UserRole::User)
}

pub fn coordinator() -> Principal {
    Principal::user(UserId::new(), UserRole::EventCoordinator)
}

pub fn admin() -> Principal {
    Principal::user(UserId::new(), UserRole::Admin)
}

pub fn as_user(id: UserId) -> Principal {
    Principal::user(id, UserRole::User)
}

pub fn metadata(principal: Principal) -> CommandMetadata {
    CommandMetadata::new(principal).with_correlation_id("test-request")
}

pub fn store() -> Arc<InMemoryScheduleStore> {
    Arc::new(InMemoryScheduleStore::new())
}

pub fn ids() -> Arc<dyn IdGenerator> {
    Arc::new(UuidV7Generator::new())
}

/// Stores a conference hosted by `host` running `start_h..end_h` hours from now.
pub async fn seed(
    store: &InMemoryScheduleStore,
    host: UserId,
    status: ConferenceStatus,
    start_h: i64,
    end_h: i64,
) -> Conference {
    let now = Timestamp::now();
    let conference = crate::domain::conference::test_support::stored(
        host,
        status,
        now.plus_hours(start_h),
        now.plus_hours(end_h),
    );
    ConferenceRepository::save(store, &conference).await.unwrap();
    conference
}

/// Repository whose every call fails, for internal-error paths.
pub struct FailingConferenceRepository;

#[async_trait]
impl ConferenceRepository for FailingConferenceRepository {
    async fn save(&self, _conference: &Conference) -> Result<(), DomainError> {
        Err(DomainError::new(ErrorCode::DatabaseError, "Simulated save failure"))
    }

    async fn update(&self, _conference: &Conference) -> Result<(), DomainError> {
        Err(DomainError::new(ErrorCode::DatabaseError, "Simulated update failure"))
    }

    async fn find_by_id(&self, _id: &ConferenceId) -> Result<Option<Conference>, DomainError> {
        Err(DomainError::new(ErrorCode::DatabaseError, "Simulated fetch failure"))
    }

    async fn soft_delete(&self, _id: &ConferenceId, _at: Timestamp) -> Result<(), DomainError> {
        Err(DomainError::new(ErrorCode::DatabaseError, "Simulated delete failure"))
    }

    async fn find_conflicting(
        &self,
        _window: &TimeWindow,
        _exclude: Option<&ConferenceId>,
    ) -> Result<Vec<Conference>, DomainError> {
        Err(DomainError::new(ErrorCode::DatabaseError, "Simulated query failure"))
    }

    async fn find_active_proposal(
        &self,
        _host_id: &UserId,
        _now: Timestamp,
    ) -> Result<Option<Conference>, DomainError> {
        Err(DomainError::new(ErrorCode::DatabaseError, "Simulated query failure"))
    }
}
