//! HTTP DTOs for feedback endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::feedback::CreateFeedbackCommand;
use crate::domain::feedback::Feedback;
use crate::domain::foundation::{ConferenceId, FeedbackId, Timestamp, UserId};
use crate::domain::pagination::PageInfo;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeedbackRequest {
    pub conference_id: ConferenceId,
    pub comment: String,
}

impl From<CreateFeedbackRequest> for CreateFeedbackCommand {
    fn from(req: CreateFeedbackRequest) -> Self {
        Self {
            conference_id: req.conference_id,
            comment: req.comment,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackIdResponse {
    pub id: FeedbackId,
}

/// `201 {"feedback": {"id"}}`
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackCreatedResponse {
    pub feedback: FeedbackIdResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackResponse {
    pub id: FeedbackId,
    pub conference_id: ConferenceId,
    pub user_id: UserId,
    pub comment: String,
    pub created_at: Timestamp,
}

impl From<&Feedback> for FeedbackResponse {
    fn from(feedback: &Feedback) -> Self {
        Self {
            id: *feedback.id(),
            conference_id: *feedback.conference_id(),
            user_id: *feedback.user_id(),
            comment: feedback.comment().to_string(),
            created_at: *feedback.created_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackListResponse {
    pub feedbacks: Vec<FeedbackResponse>,
    pub pagination: PageInfo<FeedbackId>,
}
