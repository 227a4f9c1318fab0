//! Feedback-specific error types.

use uuid::Uuid;

use crate::domain::conference::ConferenceError;
use crate::domain::foundation::{
    ConferenceId, DomainError, ErrorCode, ErrorKind, FeedbackId, ValidationError,
};

/// Feedback-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    /// Feedback was not found or is already deleted.
    NotFound(FeedbackId),
    /// The referenced conference was not found.
    ConferenceNotFound(ConferenceId),
    Forbidden(String),
    ValidationFailed { field: String, message: String },
    InvalidPagination(String),
    NotRegistered,
    FeedbackAlreadyGiven,
    HostCannotGiveFeedback,
    ConferenceNotEnded,
    Internal { trace_id: Uuid },
}

impl FeedbackError {
    pub fn forbidden(reason: impl Into<String>) -> Self {
        FeedbackError::Forbidden(reason.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        FeedbackError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Logs the underlying failure under a fresh trace id.
    pub fn internal(context: &str, error: impl std::fmt::Display) -> Self {
        let trace_id = Uuid::new_v4();
        tracing::error!(%trace_id, context, error = %error, "internal error");
        FeedbackError::Internal { trace_id }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            FeedbackError::NotFound(_) => ErrorCode::FeedbackNotFound,
            FeedbackError::ConferenceNotFound(_) => ErrorCode::ConferenceNotFound,
            FeedbackError::Forbidden(_) => ErrorCode::Forbidden,
            FeedbackError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            FeedbackError::InvalidPagination(_) => ErrorCode::InvalidPagination,
            FeedbackError::NotRegistered => ErrorCode::NotRegistered,
            FeedbackError::FeedbackAlreadyGiven => ErrorCode::FeedbackAlreadyGiven,
            FeedbackError::HostCannotGiveFeedback => ErrorCode::HostCannotGiveFeedback,
            FeedbackError::ConferenceNotEnded => ErrorCode::ConferenceNotEnded,
            FeedbackError::Internal { .. } => ErrorCode::InternalError,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }

    pub fn message(&self) -> String {
        match self {
            FeedbackError::NotFound(id) => format!("Feedback not found: {}", id),
            FeedbackError::ConferenceNotFound(id) => format!("Conference not found: {}", id),
            FeedbackError::Forbidden(reason) => reason.clone(),
            FeedbackError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            FeedbackError::InvalidPagination(msg) => msg.clone(),
            FeedbackError::NotRegistered => {
                "Only registered attendees can give feedback".to_string()
            }
            FeedbackError::FeedbackAlreadyGiven => {
                "Feedback already given for this conference".to_string()
            }
            FeedbackError::HostCannotGiveFeedback => {
                "Hosts cannot give feedback on their own conference".to_string()
            }
            FeedbackError::ConferenceNotEnded => "Conference has not ended yet".to_string(),
            FeedbackError::Internal { .. } => "Internal server error".to_string(),
        }
    }

    pub fn trace_id(&self) -> Option<Uuid> {
        match self {
            FeedbackError::Internal { trace_id } => Some(*trace_id),
            _ => None,
        }
    }
}

impl std::fmt::Display for FeedbackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for FeedbackError {}

impl From<ValidationError> for FeedbackError {
    fn from(err: ValidationError) -> Self {
        FeedbackError::validation(err.field().to_string(), err.to_string())
    }
}

/// Conference lookups reused by feedback keep their meaning.
impl From<ConferenceError> for FeedbackError {
    fn from(err: ConferenceError) -> Self {
        match err {
            ConferenceError::NotFound(id) => FeedbackError::ConferenceNotFound(id),
            ConferenceError::Forbidden(reason) => FeedbackError::Forbidden(reason),
            ConferenceError::InvalidPagination(msg) => FeedbackError::InvalidPagination(msg),
            ConferenceError::ValidationFailed { field, message } => {
                FeedbackError::ValidationFailed { field, message }
            }
            ConferenceError::Internal { trace_id } => FeedbackError::Internal { trace_id },
            other => FeedbackError::internal("conference rule in feedback flow", other),
        }
    }
}

impl From<DomainError> for FeedbackError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::FeedbackNotFound => match err
                .detail("feedback_id")
                .and_then(|id| id.parse::<FeedbackId>().ok())
            {
                Some(id) => FeedbackError::NotFound(id),
                None => FeedbackError::internal("feedback lookup", err),
            },
            ErrorCode::FeedbackAlreadyGiven => FeedbackError::FeedbackAlreadyGiven,
            ErrorCode::InvalidPagination => FeedbackError::InvalidPagination(err.message),
            ErrorCode::ValidationFailed => FeedbackError::ValidationFailed {
                field: err.detail("field").unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => FeedbackError::internal("feedback store", err),
        }
    }
}
