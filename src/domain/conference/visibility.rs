//! Role-based visibility rules.
//!
//! Only approved conferences are public. Anything else is visible to its
//! host and to coordinator-level roles. The system principal carries no
//! role and is not restricted.

use crate::domain::foundation::{ConferenceStatus, OwnedByUser, Principal, UserId};

use super::{Conference, ConferenceError};

/// Refuses plain users reading a non-approved conference they do not host.
pub fn ensure_visible(conference: &Conference, principal: &Principal) -> Result<(), ConferenceError> {
    if conference.status() != ConferenceStatus::Approved
        && principal.is_plain_user()
        && !conference.is_owned_by(principal)
    {
        return Err(ConferenceError::forbidden(
            "Conference is not visible to this user",
        ));
    }
    Ok(())
}

/// Resolves the host filter for a listing.
///
/// A plain user listing non-approved conferences is narrowed to their own;
/// naming a different host is refused.
pub fn scope_host_filter(
    principal: &Principal,
    status: ConferenceStatus,
    host_id: Option<UserId>,
) -> Result<Option<UserId>, ConferenceError> {
    if status == ConferenceStatus::Approved || !principal.is_plain_user() {
        return Ok(host_id);
    }

    match (host_id, principal.user_id()) {
        (None, Some(me)) => Ok(Some(*me)),
        (Some(host), Some(me)) if host == *me => Ok(Some(host)),
        _ => Err(ConferenceError::forbidden(
            "Users may only list their own non-approved conferences",
        )),
    }
}

/// Plain users may delete only conferences they host.
pub fn ensure_can_delete(conference: &Conference, principal: &Principal) -> Result<(), ConferenceError> {
    if principal.is_plain_user() && !conference.is_owned_by(principal) {
        return Err(ConferenceError::forbidden(
            "Only the host or a coordinator can delete this conference",
        ));
    }
    Ok(())
}
