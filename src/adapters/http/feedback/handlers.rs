//! HTTP handlers for feedback endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{feedback_error_response, invalid_id};
use crate::adapters::http::middleware::{RequestId, RequireAuth, RequireCoordinator};
use crate::adapters::http::pagination::CursorParams;
use crate::application::handlers::feedback::{
    CreateFeedbackHandler, DeleteFeedbackCommand, DeleteFeedbackHandler, ListFeedbacksHandler,
    ListFeedbacksQuery,
};
use crate::domain::foundation::{ConferenceId, FeedbackId};

use super::dto::{
    CreateFeedbackRequest, FeedbackCreatedResponse, FeedbackIdResponse, FeedbackListResponse,
    FeedbackResponse,
};

#[derive(Clone)]
pub struct FeedbackHandlers {
    create_handler: Arc<CreateFeedbackHandler>,
    list_handler: Arc<ListFeedbacksHandler>,
    delete_handler: Arc<DeleteFeedbackHandler>,
}

impl FeedbackHandlers {
    pub fn new(
        create_handler: Arc<CreateFeedbackHandler>,
        list_handler: Arc<ListFeedbacksHandler>,
        delete_handler: Arc<DeleteFeedbackHandler>,
    ) -> Self {
        Self {
            create_handler,
            list_handler,
            delete_handler,
        }
    }
}

/// POST /feedbacks - Comment on an ended conference
pub async fn create_feedback(
    State(handlers): State<FeedbackHandlers>,
    auth: RequireAuth,
    request_id: RequestId,
    Json(req): Json<CreateFeedbackRequest>,
) -> Response {
    match handlers
        .create_handler
        .handle(req.into(), request_id.metadata(auth.principal()))
        .await
    {
        Ok(result) => {
            let response = FeedbackCreatedResponse {
                feedback: FeedbackIdResponse {
                    id: *result.feedback.id(),
                },
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => feedback_error_response(e),
    }
}

/// GET /feedbacks/conferences/:id
pub async fn list_feedbacks(
    State(handlers): State<FeedbackHandlers>,
    auth: RequireAuth,
    Path(conference_id): Path<String>,
    Query(cursor): Query<CursorParams<FeedbackId>>,
) -> Response {
    let Ok(conference_id) = conference_id.parse::<ConferenceId>() else {
        return invalid_id("conference");
    };
    let query = ListFeedbacksQuery {
        conference_id,
        after_id: cursor.after_id,
        before_id: cursor.before_id,
        limit: cursor.limit,
    };

    match handlers.list_handler.handle(query, &auth.principal()).await {
        Ok(page) => {
            let response = FeedbackListResponse {
                feedbacks: page.items.iter().map(FeedbackResponse::from).collect(),
                pagination: page.info,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => feedback_error_response(e),
    }
}

/// DELETE /feedbacks/:id - Coordinator moderation
pub async fn delete_feedback(
    State(handlers): State<FeedbackHandlers>,
    auth: RequireCoordinator,
    request_id: RequestId,
    Path(feedback_id): Path<String>,
) -> Response {
    let Ok(feedback_id) = feedback_id.parse::<FeedbackId>() else {
        return invalid_id("feedback");
    };

    match handlers
        .delete_handler
        .handle(
            DeleteFeedbackCommand { feedback_id },
            request_id.metadata(auth.principal()),
        )
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => feedback_error_response(e),
    }
}
