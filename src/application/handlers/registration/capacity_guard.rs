//! CapacityGuard - registration admission checks.

use std::sync::Arc;

use crate::domain::conference::visibility::ensure_visible;
use crate::domain::conference::{Conference, ConferenceError, ConflictSummary};
use crate::domain::foundation::{ConferenceId, OwnedByUser, Principal, Timestamp, UserId};
use crate::ports::{ConferenceRepository, RegistrationRepository};

/// Evaluates every registration precondition in a fixed order.
///
/// The first failing check wins:
///
/// 1. the conference exists and is visible to the registrant
/// 2. the registrant is not the host (`HostCannotRegister`)
/// 3. the conference has not ended (`ConferenceEnded`)
/// 4. no existing registration (`AlreadyRegistered`)
/// 5. a seat is free (`ConferenceFull`)
/// 6. no overlap with the registrant's other registrations
///    (`ConflictingRegistrations`)
///
/// Checks 4 and 5 are repeated atomically by the store when the
/// registration is written.
#[derive(Clone)]
pub struct CapacityGuard {
    conferences: Arc<dyn ConferenceRepository>,
    registrations: Arc<dyn RegistrationRepository>,
}

impl CapacityGuard {
    pub fn new(
        conferences: Arc<dyn ConferenceRepository>,
        registrations: Arc<dyn RegistrationRepository>,
    ) -> Self {
        Self {
            conferences,
            registrations,
        }
    }

    /// Returns the conference the user may register for.
    pub async fn admit(
        &self,
        conference_id: &ConferenceId,
        user_id: &UserId,
        principal: &Principal,
        now: Timestamp,
    ) -> Result<Conference, ConferenceError> {
        let conference = self
            .conferences
            .find_by_id(conference_id)
            .await?
            .ok_or_else(|| ConferenceError::not_found(*conference_id))?;
        ensure_visible(&conference, principal)?;

        if conference.is_owner(user_id) {
            return Err(ConferenceError::HostCannotRegister);
        }

        if conference.has_ended(now) {
            return Err(ConferenceError::ConferenceEnded);
        }

        if self
            .registrations
            .is_registered(conference.id(), user_id)
            .await?
        {
            return Err(ConferenceError::AlreadyRegistered);
        }

        let taken = self
            .registrations
            .count_by_conference(conference.id())
            .await?;
        if taken >= conference.seats() {
            return Err(ConferenceError::ConferenceFull);
        }

        let overlapping = self
            .registrations
            .find_conflicting(user_id, conference.window())
            .await?;
        if !overlapping.is_empty() {
            return Err(ConferenceError::ConflictingRegistrations(
                overlapping.iter().map(ConflictSummary::from).collect(),
            ));
        }

        Ok(conference)
    }
}
