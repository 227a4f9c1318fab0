//! HTTP DTOs for conference endpoints.

use serde::{Deserialize, Deserializer, Serialize};

use crate::application::handlers::conference::{
    CreateConferenceCommand, ListConferencesQuery, UpdateConferenceCommand,
};
use crate::domain::conference::{Conference, ConferenceDetails, ConferenceUpdate};
use crate::domain::foundation::{ConferenceId, ConferenceStatus, Timestamp, UserId};
use crate::domain::pagination::{PageInfo, SortKey, SortOrder};
use crate::ports::ConferenceView;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to propose a conference.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateConferenceRequest {
    pub title: String,
    pub description: String,
    pub speaker_name: String,
    pub speaker_title: String,
    pub target_audience: String,
    #[serde(default)]
    pub prerequisites: Option<String>,
    pub seats: u32,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

impl From<CreateConferenceRequest> for CreateConferenceCommand {
    fn from(req: CreateConferenceRequest) -> Self {
        Self {
            details: ConferenceDetails {
                title: req.title,
                description: req.description,
                speaker_name: req.speaker_name,
                speaker_title: req.speaker_title,
                target_audience: req.target_audience,
                prerequisites: req.prerequisites,
                seats: req.seats,
            },
            starts_at: req.starts_at,
            ends_at: req.ends_at,
        }
    }
}

/// Partial update. Absent fields are left untouched; `"prerequisites": null`
/// clears the field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateConferenceRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub speaker_name: Option<String>,
    #[serde(default)]
    pub speaker_title: Option<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub prerequisites: Option<Option<String>>,
    #[serde(default)]
    pub starts_at: Option<Timestamp>,
    #[serde(default)]
    pub ends_at: Option<Timestamp>,
}

impl UpdateConferenceRequest {
    pub fn into_command(self, conference_id: ConferenceId) -> UpdateConferenceCommand {
        UpdateConferenceCommand {
            conference_id,
            update: ConferenceUpdate {
                title: self.title,
                description: self.description,
                speaker_name: self.speaker_name,
                speaker_title: self.speaker_title,
                target_audience: self.target_audience,
                prerequisites: self.prerequisites,
                starts_at: self.starts_at,
                ends_at: self.ends_at,
            },
        }
    }
}

/// A present key, `null` included, becomes `Some(..)`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Request to moderate a conference.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: ConferenceStatus,
}

/// Query parameters for listing conferences.
///
/// `order_by` and `order` are closed enums; unknown values fail to
/// deserialize and the request is refused with 400.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListConferencesParams {
    #[serde(default)]
    pub after_id: Option<ConferenceId>,
    #[serde(default)]
    pub before_id: Option<ConferenceId>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub host_id: Option<UserId>,
    #[serde(default)]
    pub status: Option<ConferenceStatus>,
    #[serde(default)]
    pub starts_before: Option<Timestamp>,
    #[serde(default)]
    pub starts_after: Option<Timestamp>,
    #[serde(default)]
    pub include_past: bool,
    #[serde(default)]
    pub order_by: Option<SortKey>,
    #[serde(default)]
    pub order: Option<SortOrder>,
    #[serde(default)]
    pub title: Option<String>,
}

impl From<ListConferencesParams> for ListConferencesQuery {
    fn from(params: ListConferencesParams) -> Self {
        Self {
            after_id: params.after_id,
            before_id: params.before_id,
            limit: params.limit,
            status: params.status.unwrap_or(ConferenceStatus::Approved),
            host_id: params.host_id,
            title: params.title,
            starts_before: params.starts_before,
            starts_after: params.starts_after,
            include_past: params.include_past,
            sort: params.order_by.unwrap_or_default(),
            order: params.order.unwrap_or_default(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ConferenceIdResponse {
    pub id: ConferenceId,
}

/// `201 {"conference": {"id"}}`
#[derive(Debug, Clone, Serialize)]
pub struct ConferenceCreatedResponse {
    pub conference: ConferenceIdResponse,
}

/// Full conference representation.
#[derive(Debug, Clone, Serialize)]
pub struct ConferenceResponse {
    pub id: ConferenceId,
    pub host_id: UserId,
    pub title: String,
    pub description: String,
    pub speaker_name: String,
    pub speaker_title: String,
    pub target_audience: String,
    pub prerequisites: Option<String>,
    pub seats: u32,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub status: ConferenceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_count: Option<u32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Conference> for ConferenceResponse {
    fn from(conference: &Conference) -> Self {
        let details = conference.details();
        Self {
            id: *conference.id(),
            host_id: *conference.host_id(),
            title: details.title.clone(),
            description: details.description.clone(),
            speaker_name: details.speaker_name.clone(),
            speaker_title: details.speaker_title.clone(),
            target_audience: details.target_audience.clone(),
            prerequisites: details.prerequisites.clone(),
            seats: details.seats,
            starts_at: conference.window().starts_at(),
            ends_at: conference.window().ends_at(),
            status: conference.status(),
            registration_count: None,
            created_at: *conference.created_at(),
            updated_at: *conference.updated_at(),
        }
    }
}

impl From<&ConferenceView> for ConferenceResponse {
    fn from(view: &ConferenceView) -> Self {
        Self {
            registration_count: Some(view.registration_count),
            ..Self::from(&view.conference)
        }
    }
}

/// `{"conference": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct ConferenceEnvelope {
    pub conference: ConferenceResponse,
}

/// Paged conferences with the cursor envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ConferenceListResponse {
    pub conferences: Vec<ConferenceResponse>,
    pub pagination: PageInfo<ConferenceId>,
}
