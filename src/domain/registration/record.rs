//! A user's seat in a conference.

use serde::Serialize;

use crate::domain::foundation::{ConferenceId, Timestamp, UserId};
use crate::domain::pagination::Keyset;

/// Registration record, identified by `(conference_id, user_id)`.
///
/// Registrations are created once and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub conference_id: ConferenceId,
    pub user_id: UserId,
    pub registered_at: Timestamp,
}

impl Registration {
    pub fn new(conference_id: ConferenceId, user_id: UserId, registered_at: Timestamp) -> Self {
        Self {
            conference_id,
            user_id,
            registered_at,
        }
    }
}

/// Registered users of a conference are paged in user id order.
impl Keyset for Registration {
    type Key = UserId;

    fn keyset_id(&self) -> UserId {
        self.user_id
    }
}
