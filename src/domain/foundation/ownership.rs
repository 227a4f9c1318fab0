//! Ownership trait for user-owned records.
//!
//! Conferences are owned by their host and feedback by its author. The
//! trait keeps host checks uniform across handlers.

use super::{Principal, UserId};

/// Records that have a single owning user.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this record.
    fn owner_id(&self) -> &UserId;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Checks if the principal is the owning user. System never owns anything.
    fn is_owned_by(&self, principal: &Principal) -> bool {
        principal.is(self.owner_id())
    }
}
