//! HTTP handlers for conference endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{conference_error_response, invalid_id};
use crate::adapters::http::middleware::{RequestId, RequireAuth, RequireCoordinator};
use crate::application::handlers::conference::{
    ChangeConferenceStatusCommand, ChangeConferenceStatusHandler, CreateConferenceHandler,
    DeleteConferenceCommand, DeleteConferenceHandler, GetConferenceHandler, GetConferenceQuery,
    ListConferencesHandler, UpdateConferenceHandler,
};
use crate::domain::foundation::ConferenceId;

use super::dto::{
    ChangeStatusRequest, ConferenceCreatedResponse, ConferenceEnvelope, ConferenceIdResponse,
    ConferenceListResponse, ConferenceResponse, CreateConferenceRequest, ListConferencesParams,
    UpdateConferenceRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ConferenceHandlers {
    create_handler: Arc<CreateConferenceHandler>,
    get_handler: Arc<GetConferenceHandler>,
    list_handler: Arc<ListConferencesHandler>,
    update_handler: Arc<UpdateConferenceHandler>,
    status_handler: Arc<ChangeConferenceStatusHandler>,
    delete_handler: Arc<DeleteConferenceHandler>,
}

impl ConferenceHandlers {
    pub fn new(
        create_handler: Arc<CreateConferenceHandler>,
        get_handler: Arc<GetConferenceHandler>,
        list_handler: Arc<ListConferencesHandler>,
        update_handler: Arc<UpdateConferenceHandler>,
        status_handler: Arc<ChangeConferenceStatusHandler>,
        delete_handler: Arc<DeleteConferenceHandler>,
    ) -> Self {
        Self {
            create_handler,
            get_handler,
            list_handler,
            update_handler,
            status_handler,
            delete_handler,
        }
    }
}

fn parse_id(raw: &str) -> Result<ConferenceId, Response> {
    raw.parse::<ConferenceId>()
        .map_err(|_| invalid_id("conference"))
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /conferences - Propose a conference
pub async fn create_conference(
    State(handlers): State<ConferenceHandlers>,
    auth: RequireAuth,
    request_id: RequestId,
    Json(req): Json<CreateConferenceRequest>,
) -> Response {
    let metadata = request_id.metadata(auth.principal());

    match handlers.create_handler.handle(req.into(), metadata).await {
        Ok(result) => {
            let response = ConferenceCreatedResponse {
                conference: ConferenceIdResponse {
                    id: *result.conference.id(),
                },
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => conference_error_response(e),
    }
}

/// GET /conferences/:id - Conference details with registration count
pub async fn get_conference(
    State(handlers): State<ConferenceHandlers>,
    auth: RequireAuth,
    Path(conference_id): Path<String>,
) -> Response {
    let conference_id = match parse_id(&conference_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .get_handler
        .handle(GetConferenceQuery { conference_id }, &auth.principal())
        .await
    {
        Ok(view) => {
            let response = ConferenceEnvelope {
                conference: ConferenceResponse::from(&view),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => conference_error_response(e),
    }
}

/// GET /conferences - Keyset-paged listing
pub async fn list_conferences(
    State(handlers): State<ConferenceHandlers>,
    auth: RequireAuth,
    Query(params): Query<ListConferencesParams>,
) -> Response {
    match handlers
        .list_handler
        .handle(params.into(), &auth.principal())
        .await
    {
        Ok(page) => {
            let response = ConferenceListResponse {
                conferences: page.items.iter().map(ConferenceResponse::from).collect(),
                pagination: page.info,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => conference_error_response(e),
    }
}

/// PATCH /conferences/:id - Host edit
pub async fn update_conference(
    State(handlers): State<ConferenceHandlers>,
    auth: RequireAuth,
    request_id: RequestId,
    Path(conference_id): Path<String>,
    Json(req): Json<UpdateConferenceRequest>,
) -> Response {
    let conference_id = match parse_id(&conference_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let metadata = request_id.metadata(auth.principal());

    match handlers
        .update_handler
        .handle(req.into_command(conference_id), metadata)
        .await
    {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => conference_error_response(e),
    }
}

/// PATCH /conferences/:id/status - Coordinator moderation
pub async fn change_status(
    State(handlers): State<ConferenceHandlers>,
    auth: RequireCoordinator,
    request_id: RequestId,
    Path(conference_id): Path<String>,
    Json(req): Json<ChangeStatusRequest>,
) -> Response {
    let conference_id = match parse_id(&conference_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let cmd = ChangeConferenceStatusCommand {
        conference_id,
        status: req.status,
    };

    match handlers
        .status_handler
        .handle(cmd, request_id.metadata(auth.principal()))
        .await
    {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => conference_error_response(e),
    }
}

/// DELETE /conferences/:id - Soft delete
pub async fn delete_conference(
    State(handlers): State<ConferenceHandlers>,
    auth: RequireAuth,
    request_id: RequestId,
    Path(conference_id): Path<String>,
) -> Response {
    let conference_id = match parse_id(&conference_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .delete_handler
        .handle(
            DeleteConferenceCommand { conference_id },
            request_id.metadata(auth.principal()),
        )
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => conference_error_response(e),
    }
}
