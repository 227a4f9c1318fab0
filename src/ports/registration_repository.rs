//! Registration repository port.
//!
//! Registrations are written once. Reads support the admission checks and
//! the two registration listings.

use async_trait::async_trait;

use crate::domain::conference::Conference;
use crate::domain::foundation::{ConferenceId, DomainError, TimeWindow, UserId};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::registration::Registration;

use super::ConferenceView;

/// Repository port for registrations.
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Persist a registration.
    ///
    /// This is the authoritative admission step: implementations must refuse
    /// the write atomically when it would break an invariant, even if the
    /// caller's pre-checks passed.
    ///
    /// # Errors
    ///
    /// - `AlreadyRegistered` if `(conference_id, user_id)` already exists
    /// - `ConferenceFull` if the conference has no free seat
    /// - `ConferenceNotFound` if the conference is gone
    /// - `DatabaseError` on persistence failure
    async fn create(&self, registration: &Registration) -> Result<(), DomainError>;

    /// Whether the user holds a registration for the conference.
    async fn is_registered(
        &self,
        conference_id: &ConferenceId,
        user_id: &UserId,
    ) -> Result<bool, DomainError>;

    /// Number of registrations for the conference.
    async fn count_by_conference(&self, conference_id: &ConferenceId) -> Result<u32, DomainError>;

    /// Live conferences the user is registered for whose window overlaps
    /// `window` (half-open), ordered by `(starts_at, id)`, at most
    /// [`super::CONFLICT_LIMIT`] rows.
    async fn find_conflicting(
        &self,
        user_id: &UserId,
        window: &TimeWindow,
    ) -> Result<Vec<Conference>, DomainError>;

    /// Users registered for a conference, in user id order.
    async fn list_registered_users(
        &self,
        conference_id: &ConferenceId,
        page: &PageRequest<UserId>,
    ) -> Result<Page<Registration>, DomainError>;

    /// Live conferences a user registered for, in `(starts_at, id)` order.
    async fn list_registered_conferences(
        &self,
        user_id: &UserId,
        include_past: bool,
        page: &PageRequest<ConferenceId>,
    ) -> Result<Page<ConferenceView>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn RegistrationRepository) {}
    }
}
