//! HTTP handlers for registration endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::conference::ConferenceResponse;
use crate::adapters::http::error::{conference_error_response, invalid_id};
use crate::adapters::http::middleware::{RequestId, RequireAuth};
use crate::adapters::http::pagination::CursorParams;
use crate::application::handlers::registration::{
    ListRegisteredConferencesHandler, ListRegisteredConferencesQuery, ListRegisteredUsersHandler,
    ListRegisteredUsersQuery, RegisterCommand, RegisterHandler,
};
use crate::domain::foundation::{ConferenceId, UserId};

use super::dto::{
    IncludePastParams, RegisterRequest, RegisteredConferencesResponse, RegisteredUserResponse,
    RegisteredUsersResponse, RegistrationEnvelope, RegistrationResponse,
};

#[derive(Clone)]
pub struct RegistrationHandlers {
    register_handler: Arc<RegisterHandler>,
    users_handler: Arc<ListRegisteredUsersHandler>,
    conferences_handler: Arc<ListRegisteredConferencesHandler>,
}

impl RegistrationHandlers {
    pub fn new(
        register_handler: Arc<RegisterHandler>,
        users_handler: Arc<ListRegisteredUsersHandler>,
        conferences_handler: Arc<ListRegisteredConferencesHandler>,
    ) -> Self {
        Self {
            register_handler,
            users_handler,
            conferences_handler,
        }
    }
}

/// POST /registrations - Take a seat
pub async fn register(
    State(handlers): State<RegistrationHandlers>,
    auth: RequireAuth,
    request_id: RequestId,
    Json(req): Json<RegisterRequest>,
) -> Response {
    let cmd = RegisterCommand {
        conference_id: req.conference_id,
    };

    match handlers
        .register_handler
        .handle(cmd, request_id.metadata(auth.principal()))
        .await
    {
        Ok(result) => {
            let response = RegistrationEnvelope {
                registration: RegistrationResponse::from(&result.registration),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => conference_error_response(e),
    }
}

/// GET /registrations/conferences/:id - Attendees of a conference
pub async fn list_registered_users(
    State(handlers): State<RegistrationHandlers>,
    auth: RequireAuth,
    Path(conference_id): Path<String>,
    Query(cursor): Query<CursorParams<UserId>>,
) -> Response {
    let Ok(conference_id) = conference_id.parse::<ConferenceId>() else {
        return invalid_id("conference");
    };
    let query = ListRegisteredUsersQuery {
        conference_id,
        after_id: cursor.after_id,
        before_id: cursor.before_id,
        limit: cursor.limit,
    };

    match handlers.users_handler.handle(query, &auth.principal()).await {
        Ok(page) => {
            let response = RegisteredUsersResponse {
                users: page
                    .items
                    .iter()
                    .map(|r| RegisteredUserResponse {
                        id: r.user_id,
                        registered_at: r.registered_at,
                    })
                    .collect(),
                pagination: page.info,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => conference_error_response(e),
    }
}

/// GET /registrations/users/:id - Conferences a user registered for
pub async fn list_registered_conferences(
    State(handlers): State<RegistrationHandlers>,
    auth: RequireAuth,
    Path(user_id): Path<String>,
    Query(cursor): Query<CursorParams<ConferenceId>>,
    Query(past): Query<IncludePastParams>,
) -> Response {
    let Ok(user_id) = user_id.parse::<UserId>() else {
        return invalid_id("user");
    };
    let query = ListRegisteredConferencesQuery {
        user_id,
        include_past: past.include_past,
        after_id: cursor.after_id,
        before_id: cursor.before_id,
        limit: cursor.limit,
    };

    match handlers
        .conferences_handler
        .handle(query, &auth.principal())
        .await
    {
        Ok(page) => {
            let response = RegisteredConferencesResponse {
                conferences: page.items.iter().map(ConferenceResponse::from).collect(),
                pagination: page.info,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => conference_error_response(e),
    }
}
