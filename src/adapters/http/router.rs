//! Application router.
//!
//! Wires every handler onto its port implementations and stacks the
//! cross-cutting layers:
//!
//! ```text
//! SetRequestId → Trace → PropagateRequestId → Timeout → Cors → Compression
//!     → auth_middleware → /conferences, /registrations, /feedbacks
//! ```
//!
//! `/health` sits outside the auth layer.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sqlx::PgPool;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::adapters::memory::InMemoryScheduleStore;
use crate::adapters::postgres::{
    PostgresConferenceReader, PostgresConferenceRepository, PostgresFeedbackRepository,
    PostgresRegistrationRepository,
};
use crate::application::handlers::conference::{
    ChangeConferenceStatusHandler, CreateConferenceHandler, DeleteConferenceHandler,
    GetConferenceHandler, ListConferencesHandler, UpdateConferenceHandler,
};
use crate::application::handlers::feedback::{
    CreateFeedbackHandler, DeleteFeedbackHandler, ListFeedbacksHandler,
};
use crate::application::handlers::registration::{
    ListRegisteredConferencesHandler, ListRegisteredUsersHandler, RegisterHandler,
};
use crate::ports::{
    ConferenceReader, ConferenceRepository, FeedbackRepository, IdGenerator,
    RegistrationRepository, SessionValidator,
};

use super::conference::{conference_routes, ConferenceHandlers};
use super::feedback::{feedback_routes, FeedbackHandlers};
use super::middleware::{auth_middleware, REQUEST_ID_HEADER};
use super::registration::{registration_routes, RegistrationHandlers};

/// Port implementations the API runs against.
#[derive(Clone)]
pub struct AppPorts {
    pub conferences: Arc<dyn ConferenceRepository>,
    pub reader: Arc<dyn ConferenceReader>,
    pub registrations: Arc<dyn RegistrationRepository>,
    pub feedback: Arc<dyn FeedbackRepository>,
    pub ids: Arc<dyn IdGenerator>,
    pub sessions: Arc<dyn SessionValidator>,
}

impl AppPorts {
    /// Every store port served by one in-memory store.
    pub fn in_memory(
        store: Arc<InMemoryScheduleStore>,
        ids: Arc<dyn IdGenerator>,
        sessions: Arc<dyn SessionValidator>,
    ) -> Self {
        Self {
            conferences: store.clone(),
            reader: store.clone(),
            registrations: store.clone(),
            feedback: store,
            ids,
            sessions,
        }
    }

    /// PostgreSQL stores sharing one pool.
    pub fn postgres(
        pool: PgPool,
        ids: Arc<dyn IdGenerator>,
        sessions: Arc<dyn SessionValidator>,
    ) -> Self {
        Self {
            conferences: Arc::new(PostgresConferenceRepository::new(pool.clone())),
            reader: Arc::new(PostgresConferenceReader::new(pool.clone())),
            registrations: Arc::new(PostgresRegistrationRepository::new(pool.clone())),
            feedback: Arc::new(PostgresFeedbackRepository::new(pool)),
            ids,
            sessions,
        }
    }
}

/// Layer settings taken from `ServerConfig`.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub request_timeout: Duration,
    pub cors_origins: Vec<String>,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

pub fn api_router(ports: AppPorts, settings: &RouterSettings) -> Router {
    let conferences = ConferenceHandlers::new(
        Arc::new(CreateConferenceHandler::new(
            ports.conferences.clone(),
            ports.ids.clone(),
        )),
        Arc::new(GetConferenceHandler::new(ports.reader.clone())),
        Arc::new(ListConferencesHandler::new(ports.reader.clone())),
        Arc::new(UpdateConferenceHandler::new(ports.conferences.clone())),
        Arc::new(ChangeConferenceStatusHandler::new(ports.conferences.clone())),
        Arc::new(DeleteConferenceHandler::new(ports.conferences.clone())),
    );

    let registrations = RegistrationHandlers::new(
        Arc::new(RegisterHandler::new(
            ports.conferences.clone(),
            ports.registrations.clone(),
        )),
        Arc::new(ListRegisteredUsersHandler::new(
            ports.conferences.clone(),
            ports.registrations.clone(),
        )),
        Arc::new(ListRegisteredConferencesHandler::new(
            ports.registrations.clone(),
        )),
    );

    let feedback = FeedbackHandlers::new(
        Arc::new(CreateFeedbackHandler::new(
            ports.conferences.clone(),
            ports.registrations.clone(),
            ports.feedback.clone(),
            ports.ids.clone(),
        )),
        Arc::new(ListFeedbacksHandler::new(
            ports.conferences.clone(),
            ports.feedback.clone(),
        )),
        Arc::new(DeleteFeedbackHandler::new(ports.feedback.clone())),
    );

    Router::new()
        .nest("/conferences", conference_routes(conferences))
        .nest("/registrations", registration_routes(registrations))
        .nest("/feedbacks", feedback_routes(feedback))
        .layer(middleware::from_fn_with_state(
            ports.sessions.clone(),
            auth_middleware,
        ))
        .route("/health", get(health))
        .layer(CompressionLayer::new())
        .layer(cors_layer(&settings.cors_origins))
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
