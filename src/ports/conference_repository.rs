//! Conference repository port (write side).
//!
//! Defines the contract for persisting conference aggregates and for the
//! conflict queries the scheduling rules run against persisted state.

use crate::domain::conference::Conference;
use crate::domain::foundation::{ConferenceId, DomainError, TimeWindow, Timestamp, UserId};
use async_trait::async_trait;

/// Most conflicting conferences a conflict query reports.
pub const CONFLICT_LIMIT: usize = 10;

/// Repository port for Conference aggregate persistence.
///
/// Soft-deleted conferences are invisible to every method.
#[async_trait]
pub trait ConferenceRepository: Send + Sync {
    /// Save a new conference.
    ///
    /// # Errors
    ///
    /// - `TimeWindowConflict` if the store refuses an overlapping approved window
    /// - `DatabaseError` on persistence failure
    async fn save(&self, conference: &Conference) -> Result<(), DomainError>;

    /// Update an existing conference.
    ///
    /// # Errors
    ///
    /// - `ConferenceNotFound` (with a `conference_id` detail) if no live row exists
    /// - `TimeWindowConflict` if the store refuses an overlapping approved window
    /// - `DatabaseError` on persistence failure
    async fn update(&self, conference: &Conference) -> Result<(), DomainError>;

    /// Find a live conference by its ID.
    async fn find_by_id(&self, id: &ConferenceId) -> Result<Option<Conference>, DomainError>;

    /// Soft-delete a conference by setting `deleted_at`.
    ///
    /// # Errors
    ///
    /// - `ConferenceNotFound` if no live row exists
    async fn soft_delete(&self, id: &ConferenceId, at: Timestamp) -> Result<(), DomainError>;

    /// Approved conferences whose window overlaps `window`.
    ///
    /// Uses half-open semantics, skips `exclude`, orders by `(starts_at, id)` and
    /// returns at most [`CONFLICT_LIMIT`] rows.
    async fn find_conflicting(
        &self,
        window: &TimeWindow,
        exclude: Option<&ConferenceId>,
    ) -> Result<Vec<Conference>, DomainError>;

    /// The host's pending proposal that has not ended by `now`, if any.
    ///
    /// When several qualify, the oldest by `created_at` is returned.
    async fn find_active_proposal(
        &self,
        host_id: &UserId,
        now: Timestamp,
    ) -> Result<Option<Conference>, DomainError>;
}
