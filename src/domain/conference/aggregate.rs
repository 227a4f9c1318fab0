//! Conference aggregate.
//!
//! A conference is proposed by its host as `Pending`, edited by the host
//! while it is still upcoming, moderated into `Approved` or `Rejected` by a
//! coordinator, and eventually soft-deleted.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    validate_length, ConferenceId, ConferenceStatus, OwnedByUser, Principal, StateMachine,
    TimeWindow, Timestamp, UserId, ValidationError,
};

use super::{ConferenceError, ConferenceUpdate};

pub(super) const TITLE_LEN: (usize, usize) = (3, 100);
pub(super) const DESCRIPTION_LEN: (usize, usize) = (3, 1000);
pub(super) const SPEAKER_LEN: (usize, usize) = (3, 100);
pub(super) const AUDIENCE_LEN: (usize, usize) = (3, 255);
pub(super) const PREREQUISITES_MAX: usize = 255;

/// Descriptive content of a conference, editable by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceDetails {
    pub title: String,
    pub description: String,
    pub speaker_name: String,
    pub speaker_title: String,
    pub target_audience: String,
    pub prerequisites: Option<String>,
    pub seats: u32,
}

impl ConferenceDetails {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_length("title", &self.title, TITLE_LEN.0, TITLE_LEN.1)?;
        validate_length(
            "description",
            &self.description,
            DESCRIPTION_LEN.0,
            DESCRIPTION_LEN.1,
        )?;
        validate_length("speaker_name", &self.speaker_name, SPEAKER_LEN.0, SPEAKER_LEN.1)?;
        validate_length(
            "speaker_title",
            &self.speaker_title,
            SPEAKER_LEN.0,
            SPEAKER_LEN.1,
        )?;
        validate_length(
            "target_audience",
            &self.target_audience,
            AUDIENCE_LEN.0,
            AUDIENCE_LEN.1,
        )?;
        if let Some(prerequisites) = &self.prerequisites {
            validate_length("prerequisites", prerequisites, 0, PREREQUISITES_MAX)?;
        }
        if self.seats < 1 {
            return Err(ValidationError::too_small("seats", 1, i64::from(self.seats)));
        }
        Ok(())
    }
}

/// Conference aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conference {
    id: ConferenceId,
    host_id: UserId,
    details: ConferenceDetails,
    window: TimeWindow,
    status: ConferenceStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
    deleted_at: Option<Timestamp>,
}

impl Conference {
    /// Creates a new pending proposal.
    ///
    /// Fails if a field is invalid or the window starts at or before `now`.
    pub fn propose(
        id: ConferenceId,
        host_id: UserId,
        details: ConferenceDetails,
        window: TimeWindow,
        now: Timestamp,
    ) -> Result<Self, ConferenceError> {
        details.validate()?;
        if window.has_started(now) {
            return Err(ConferenceError::TimeAlreadyPassed);
        }

        Ok(Self {
            id,
            host_id,
            details,
            window,
            status: ConferenceStatus::Pending,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    /// Rebuilds a conference from persisted state without validation.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ConferenceId,
        host_id: UserId,
        details: ConferenceDetails,
        window: TimeWindow,
        status: ConferenceStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
        deleted_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            host_id,
            details,
            window,
            status,
            created_at,
            updated_at,
            deleted_at,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn id(&self) -> &ConferenceId {
        &self.id
    }

    pub fn host_id(&self) -> &UserId {
        &self.host_id
    }

    pub fn details(&self) -> &ConferenceDetails {
        &self.details
    }

    pub fn title(&self) -> &str {
        &self.details.title
    }

    pub fn seats(&self) -> u32 {
        self.details.seats
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    pub fn status(&self) -> ConferenceStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn deleted_at(&self) -> Option<&Timestamp> {
        self.deleted_at.as_ref()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn has_ended(&self, now: Timestamp) -> bool {
        self.window.has_ended(now)
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Applies a host edit.
    ///
    /// Checks run in a fixed order and the first violation wins. Nothing is
    /// modified unless every check passes. Returns whether the time window
    /// changed, in which case the caller must re-run conflict detection
    /// before persisting.
    pub fn apply_update(
        &mut self,
        update: ConferenceUpdate,
        principal: &Principal,
        now: Timestamp,
    ) -> Result<bool, ConferenceError> {
        update.validate()?;

        if !self.is_owned_by(principal) {
            return Err(ConferenceError::forbidden(
                "Only the host can update this conference",
            ));
        }
        if self.window.has_ended(now) {
            return Err(ConferenceError::UpdatePastConference);
        }
        if self.status == ConferenceStatus::Rejected {
            return Err(ConferenceError::UpdateRejectedConference);
        }

        let starts_at = update.starts_at.unwrap_or(self.window.starts_at());
        let ends_at = update.ends_at.unwrap_or(self.window.ends_at());
        let window_changed =
            starts_at != self.window.starts_at() || ends_at != self.window.ends_at();

        let mut window = self.window;
        if window_changed {
            if self.status == ConferenceStatus::Approved {
                return Err(ConferenceError::UpdateApprovedTimeWindow);
            }
            if starts_at <= now {
                return Err(ConferenceError::TimeAlreadyPassed);
            }
            window = TimeWindow::new(starts_at, ends_at)?;
        }

        update.apply_to(&mut self.details);
        self.window = window;
        self.updated_at = now;

        Ok(window_changed)
    }

    /// Moves a pending conference to its moderated status.
    ///
    /// Approval of a conference that has already started is refused; such
    /// conferences may only be rejected. Overlap with other approved
    /// conferences is the caller's responsibility.
    pub fn change_status(
        &mut self,
        target: ConferenceStatus,
        now: Timestamp,
    ) -> Result<(), ConferenceError> {
        if self.status.is_terminal() {
            return Err(ConferenceError::UpdateNotPendingConference(self.status));
        }
        let target = self.status.transition_to(target)?;
        if target == ConferenceStatus::Approved && self.window.has_started(now) {
            return Err(ConferenceError::UpdatePastConferenceStatus);
        }

        self.status = target;
        self.updated_at = now;
        Ok(())
    }

    /// Marks the conference as deleted.
    pub fn mark_deleted(&mut self, now: Timestamp) {
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}

impl OwnedByUser for Conference {
    fn owner_id(&self) -> &UserId {
        &self.host_id
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::domain::foundation::UserRole;

    fn host_principal(host: UserId) -> Principal {
        Principal::user(host, UserRole::User)
    }

    #[test]
    fn propose_creates_pending_conference() {
        let now = Timestamp::now();
        let host = UserId::new();
        let conference = pending(host, now, 1, 2);

        assert_eq!(conference.status(), ConferenceStatus::Pending);
        assert_eq!(conference.host_id(), &host);
        assert!(conference.deleted_at().is_none());
    }

    #[test]
    fn propose_rejects_past_start() {
        let now = Timestamp::now();
        let window = TimeWindow::new(now.plus_hours(-1), now.plus_hours(1)).unwrap();
        let result = Conference::propose(
            ConferenceId::new(),
            UserId::new(),
            details("Late Talk"),
            window,
            now,
        );
        assert_eq!(result.unwrap_err(), ConferenceError::TimeAlreadyPassed);
    }

    #[test]
    fn propose_rejects_short_title() {
        let now = Timestamp::now();
        let window = TimeWindow::new(now.plus_hours(1), now.plus_hours(2)).unwrap();
        let result =
            Conference::propose(ConferenceId::new(), UserId::new(), details("Hi"), window, now);
        assert!(matches!(
            result,
            Err(ConferenceError::ValidationFailed { ref field, .. }) if field == "title"
        ));
    }

    #[test]
    fn propose_rejects_zero_seats() {
        let now = Timestamp::now();
        let window = TimeWindow::new(now.plus_hours(1), now.plus_hours(2)).unwrap();
        let mut content = details("Zero Seats");
        content.seats = 0;
        let result = Conference::propose(ConferenceId::new(), UserId::new(), content, window, now);
        assert!(matches!(
            result,
            Err(ConferenceError::ValidationFailed { ref field, .. }) if field == "seats"
        ));
    }

    #[test]
    fn host_can_edit_content_without_window_change() {
        let now = Timestamp::now();
        let host = UserId::new();
        let mut conference = pending(host, now, 1, 2);

        let update = ConferenceUpdate {
            title: Some("Rust in Production".to_string()),
            ..Default::default()
        };
        let changed = conference
            .apply_update(update, &host_principal(host), now)
            .unwrap();

        assert!(!changed);
        assert_eq!(conference.title(), "Rust in Production");
    }

    #[test]
    fn non_host_cannot_edit() {
        let now = Timestamp::now();
        let mut conference = pending(UserId::new(), now, 1, 2);
        let other = Principal::user(UserId::new(), UserRole::EventCoordinator);

        let result = conference.apply_update(ConferenceUpdate::default(), &other, now);
        assert!(matches!(result, Err(ConferenceError::Forbidden(_))));
    }

    #[test]
    fn ended_conference_cannot_be_edited() {
        let now = Timestamp::now();
        let host = UserId::new();
        let mut conference = stored(
            host,
            ConferenceStatus::Pending,
            now.plus_hours(-3),
            now.plus_hours(-1),
        );
        let result = conference.apply_update(ConferenceUpdate::default(), &host_principal(host), now);
        assert_eq!(result.unwrap_err(), ConferenceError::UpdatePastConference);
    }

    #[test]
    fn rejected_conference_cannot_be_edited() {
        let now = Timestamp::now();
        let host = UserId::new();
        let mut conference = stored(
            host,
            ConferenceStatus::Rejected,
            now.plus_hours(1),
            now.plus_hours(2),
        );
        let update = ConferenceUpdate {
            title: Some("New Title".to_string()),
            ..Default::default()
        };
        let result = conference.apply_update(update, &host_principal(host), now);
        assert_eq!(result.unwrap_err(), ConferenceError::UpdateRejectedConference);
    }

    #[test]
    fn approved_conference_keeps_its_window() {
        let now = Timestamp::now();
        let host = UserId::new();
        let mut conference = stored(
            host,
            ConferenceStatus::Approved,
            now.plus_hours(1),
            now.plus_hours(2),
        );
        let update = ConferenceUpdate {
            ends_at: Some(now.plus_hours(3)),
            ..Default::default()
        };
        let result = conference.apply_update(update, &host_principal(host), now);
        assert_eq!(result.unwrap_err(), ConferenceError::UpdateApprovedTimeWindow);
        assert_eq!(conference.window().ends_at(), now.plus_hours(2));
    }

    #[test]
    fn approved_conference_content_can_change() {
        let now = Timestamp::now();
        let host = UserId::new();
        let mut conference = stored(
            host,
            ConferenceStatus::Approved,
            now.plus_hours(1),
            now.plus_hours(2),
        );
        let update = ConferenceUpdate {
            description: Some("Updated abstract".to_string()),
            ..Default::default()
        };
        assert!(!conference
            .apply_update(update, &host_principal(host), now)
            .unwrap());
    }

    #[test]
    fn window_change_into_past_is_refused() {
        let now = Timestamp::now();
        let host = UserId::new();
        let mut conference = pending(host, now, 1, 2);
        let update = ConferenceUpdate {
            starts_at: Some(now.plus_hours(-1)),
            ..Default::default()
        };
        let result = conference.apply_update(update, &host_principal(host), now);
        assert_eq!(result.unwrap_err(), ConferenceError::TimeAlreadyPassed);
    }

    #[test]
    fn partial_window_change_is_merged_with_current_values() {
        let now = Timestamp::now();
        let host = UserId::new();
        let mut conference = pending(host, now, 1, 2);

        let update = ConferenceUpdate {
            starts_at: Some(now.plus_hours(3)),
            ..Default::default()
        };
        let result = conference.apply_update(update, &host_principal(host), now);
        assert_eq!(result.unwrap_err(), ConferenceError::EndTimeBeforeStart);

        let update = ConferenceUpdate {
            ends_at: Some(now.plus_hours(4)),
            ..Default::default()
        };
        assert!(conference
            .apply_update(update, &host_principal(host), now)
            .unwrap());
        assert_eq!(conference.window().starts_at(), now.plus_hours(1));
        assert_eq!(conference.window().ends_at(), now.plus_hours(4));
    }

    #[test]
    fn pending_conference_can_be_approved() {
        let now = Timestamp::now();
        let mut conference = pending(UserId::new(), now, 1, 2);
        conference
            .change_status(ConferenceStatus::Approved, now)
            .unwrap();
        assert_eq!(conference.status(), ConferenceStatus::Approved);
    }

    #[test]
    fn started_conference_cannot_be_approved_but_can_be_rejected() {
        let now = Timestamp::now();
        let host = UserId::new();
        let mut conference = stored(
            host,
            ConferenceStatus::Pending,
            now.plus_hours(-1),
            now.plus_hours(1),
        );
        assert_eq!(
            conference
                .change_status(ConferenceStatus::Approved, now)
                .unwrap_err(),
            ConferenceError::UpdatePastConferenceStatus
        );
        conference
            .change_status(ConferenceStatus::Rejected, now)
            .unwrap();
        assert_eq!(conference.status(), ConferenceStatus::Rejected);
    }

    #[test]
    fn rejected_conference_never_returns() {
        let now = Timestamp::now();
        let mut conference = stored(
            UserId::new(),
            ConferenceStatus::Rejected,
            now.plus_hours(1),
            now.plus_hours(2),
        );
        for target in [ConferenceStatus::Approved, ConferenceStatus::Pending] {
            assert_eq!(
                conference.change_status(target, now).unwrap_err(),
                ConferenceError::UpdateNotPendingConference(ConferenceStatus::Rejected)
            );
        }
    }

    #[test]
    fn pending_to_pending_is_invalid() {
        let now = Timestamp::now();
        let mut conference = pending(UserId::new(), now, 1, 2);
        let result = conference.change_status(ConferenceStatus::Pending, now);
        assert!(matches!(result, Err(ConferenceError::InvalidStatusTransition(_))));
    }

    #[test]
    fn mark_deleted_sets_timestamp() {
        let now = Timestamp::now();
        let mut conference = pending(UserId::new(), now, 1, 2);
        conference.mark_deleted(now);
        assert!(conference.is_deleted());
    }
}
