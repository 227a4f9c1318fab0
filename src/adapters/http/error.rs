//! Error bodies and status mapping shared by every route.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::conference::ConferenceError;
use crate::domain::feedback::FeedbackError;
use crate::domain::foundation::ErrorKind;

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            trace_id: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new("UNAUTHENTICATED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new("FORBIDDEN", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<&ConferenceError> for ErrorResponse {
    fn from(error: &ConferenceError) -> Self {
        let mut body = ErrorResponse::new(error.code().to_string(), error.message());
        if let Some(conflicts) = error.conflicts().filter(|c| !c.is_empty()) {
            body = body.with_details(serde_json::json!({ "conflicts": conflicts }));
        }
        if let Some(pending) = error.blocking_proposal() {
            body = body.with_details(serde_json::json!({ "conference": pending }));
        }
        if let ConferenceError::ValidationFailed { field, .. } = error {
            body = body.with_details(serde_json::json!({ "field": field }));
        }
        body.trace_id = error.trace_id().map(|id| id.to_string());
        body
    }
}

impl From<&FeedbackError> for ErrorResponse {
    fn from(error: &FeedbackError) -> Self {
        let mut body = ErrorResponse::new(error.code().to_string(), error.message());
        if let FeedbackError::ValidationFailed { field, .. } = error {
            body = body.with_details(serde_json::json!({ "field": field }));
        }
        body.trace_id = error.trace_id().map(|id| id.to_string());
        body
    }
}

pub fn conference_error_response(error: ConferenceError) -> Response {
    (status_for(error.kind()), Json(ErrorResponse::from(&error))).into_response()
}

pub fn feedback_error_response(error: FeedbackError) -> Response {
    (status_for(error.kind()), Json(ErrorResponse::from(&error))).into_response()
}

/// 400 for a path segment that is not a valid identifier.
pub fn invalid_id(resource: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(format!("Invalid {} ID", resource))),
    )
        .into_response()
}
