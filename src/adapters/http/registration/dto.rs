//! HTTP DTOs for registration endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::conference::ConferenceResponse;
use crate::domain::foundation::{ConferenceId, Timestamp, UserId};
use crate::domain::pagination::PageInfo;
use crate::domain::registration::Registration;

/// Request to register the caller for a conference.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub conference_id: ConferenceId,
}

/// `include_past` for a user's registered conferences.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncludePastParams {
    #[serde(default)]
    pub include_past: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistrationResponse {
    pub conference_id: ConferenceId,
    pub user_id: UserId,
    pub registered_at: Timestamp,
}

impl From<&Registration> for RegistrationResponse {
    fn from(registration: &Registration) -> Self {
        Self {
            conference_id: registration.conference_id,
            user_id: registration.user_id,
            registered_at: registration.registered_at,
        }
    }
}

/// `201 {"registration": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationEnvelope {
    pub registration: RegistrationResponse,
}

/// Attendee of a conference.
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredUserResponse {
    pub id: UserId,
    pub registered_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisteredUsersResponse {
    pub users: Vec<RegisteredUserResponse>,
    pub pagination: PageInfo<UserId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisteredConferencesResponse {
    pub conferences: Vec<ConferenceResponse>,
    pub pagination: PageInfo<ConferenceId>,
}
