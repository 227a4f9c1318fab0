//! Feedback left by an attendee after a conference ended.

use serde::Serialize;

use crate::domain::foundation::{
    validate_length, ConferenceId, FeedbackId, OwnedByUser, Timestamp, UserId,
};
use crate::domain::pagination::Keyset;

use super::FeedbackError;

const COMMENT_LEN: (usize, usize) = (3, 1000);

/// A single attendee comment on a conference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    id: FeedbackId,
    conference_id: ConferenceId,
    user_id: UserId,
    comment: String,
    created_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted_at: Option<Timestamp>,
}

impl Feedback {
    pub fn new(
        id: FeedbackId,
        conference_id: ConferenceId,
        user_id: UserId,
        comment: impl Into<String>,
        now: Timestamp,
    ) -> Result<Self, FeedbackError> {
        let comment = comment.into();
        validate_length("comment", &comment, COMMENT_LEN.0, COMMENT_LEN.1)?;

        Ok(Self {
            id,
            conference_id,
            user_id,
            comment,
            created_at: now,
            deleted_at: None,
        })
    }

    pub fn reconstitute(
        id: FeedbackId,
        conference_id: ConferenceId,
        user_id: UserId,
        comment: String,
        created_at: Timestamp,
        deleted_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            conference_id,
            user_id,
            comment,
            created_at,
            deleted_at,
        }
    }

    pub fn id(&self) -> &FeedbackId {
        &self.id
    }

    pub fn conference_id(&self) -> &ConferenceId {
        &self.conference_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn deleted_at(&self) -> Option<&Timestamp> {
        self.deleted_at.as_ref()
    }

    pub fn mark_deleted(&mut self, now: Timestamp) {
        self.deleted_at = Some(now);
    }
}

impl OwnedByUser for Feedback {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}

impl Keyset for Feedback {
    type Key = FeedbackId;

    fn keyset_id(&self) -> FeedbackId {
        self.id
    }
}
