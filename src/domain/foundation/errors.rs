//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max} characters, got {actual}")]
    LengthOutOfRange {
        field: String,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' must be at least {min}, got {actual}")]
    TooSmall { field: String, min: i64, actual: i64 },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a length validation error.
    pub fn length_out_of_range(
        field: impl Into<String>,
        min: usize,
        max: usize,
        actual: usize,
    ) -> Self {
        ValidationError::LengthOutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates a lower-bound validation error.
    pub fn too_small(field: impl Into<String>, min: i64, actual: i64) -> Self {
        ValidationError::TooSmall {
            field: field.into(),
            min,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::LengthOutOfRange { field, .. }
            | ValidationError::TooSmall { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Checks that a text field's character count lies within `[min, max]`.
pub fn validate_length(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual == 0 && min > 0 {
        return Err(ValidationError::empty_field(field));
    }
    if actual < min || actual > max {
        return Err(ValidationError::length_out_of_range(field, min, max, actual));
    }
    Ok(())
}

/// Broad category an error belongs to.
///
/// The HTTP layer maps each kind to exactly one status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Forbidden,
    Conflict,
    Internal,
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidPagination,
    EndTimeBeforeStart,
    TimeAlreadyPassed,
    InvalidStatusTransition,

    // Not found errors
    ConferenceNotFound,
    FeedbackNotFound,

    // Authorization errors
    Forbidden,
    HostCannotRegister,
    NotRegistered,
    HostCannotGiveFeedback,

    // Scheduling conflicts
    TimeWindowConflict,
    UserHasActiveProposal,
    UpdatePastConference,
    UpdateRejectedConference,
    UpdateApprovedTimeWindow,
    UpdateNotPendingConference,
    UpdatePastConferenceStatus,

    // Registration conflicts
    ConferenceEnded,
    AlreadyRegistered,
    ConferenceFull,
    ConflictingRegistrations,

    // Feedback conflicts
    FeedbackAlreadyGiven,
    ConferenceNotEnded,

    // Infrastructure errors
    DatabaseError,
    IdGenerationFailed,
    InternalError,
}

impl ErrorCode {
    /// Returns the category this code belongs to.
    pub fn kind(&self) -> ErrorKind {
        use ErrorCode::*;
        match self {
            ValidationFailed
            | InvalidPagination
            | EndTimeBeforeStart
            | TimeAlreadyPassed
            | InvalidStatusTransition => ErrorKind::Validation,

            ConferenceNotFound | FeedbackNotFound => ErrorKind::NotFound,

            Forbidden | HostCannotRegister | NotRegistered | HostCannotGiveFeedback => {
                ErrorKind::Forbidden
            }

            TimeWindowConflict
            | UserHasActiveProposal
            | UpdatePastConference
            | UpdateRejectedConference
            | UpdateApprovedTimeWindow
            | UpdateNotPendingConference
            | UpdatePastConferenceStatus
            | ConferenceEnded
            | AlreadyRegistered
            | ConferenceFull
            | ConflictingRegistrations
            | FeedbackAlreadyGiven
            | ConferenceNotEnded => ErrorKind::Conflict,

            DatabaseError | IdGenerationFailed | InternalError => ErrorKind::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidPagination => "INVALID_PAGINATION",
            ErrorCode::EndTimeBeforeStart => "END_TIME_BEFORE_START",
            ErrorCode::TimeAlreadyPassed => "TIME_ALREADY_PASSED",
            ErrorCode::InvalidStatusTransition => "INVALID_STATUS_TRANSITION",
            ErrorCode::ConferenceNotFound => "CONFERENCE_NOT_FOUND",
            ErrorCode::FeedbackNotFound => "FEEDBACK_NOT_FOUND",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::HostCannotRegister => "HOST_CANNOT_REGISTER",
            ErrorCode::NotRegistered => "NOT_REGISTERED",
            ErrorCode::HostCannotGiveFeedback => "HOST_CANNOT_GIVE_FEEDBACK",
            ErrorCode::TimeWindowConflict => "TIME_WINDOW_CONFLICT",
            ErrorCode::UserHasActiveProposal => "USER_HAS_ACTIVE_PROPOSAL",
            ErrorCode::UpdatePastConference => "UPDATE_PAST_CONFERENCE",
            ErrorCode::UpdateRejectedConference => "UPDATE_REJECTED_CONFERENCE",
            ErrorCode::UpdateApprovedTimeWindow => "UPDATE_APPROVED_TIME_WINDOW",
            ErrorCode::UpdateNotPendingConference => "UPDATE_NOT_PENDING_CONFERENCE",
            ErrorCode::UpdatePastConferenceStatus => "UPDATE_PAST_CONFERENCE_STATUS",
            ErrorCode::ConferenceEnded => "CONFERENCE_ENDED",
            ErrorCode::AlreadyRegistered => "ALREADY_REGISTERED",
            ErrorCode::ConferenceFull => "CONFERENCE_FULL",
            ErrorCode::ConflictingRegistrations => "CONFLICTING_REGISTRATIONS",
            ErrorCode::FeedbackAlreadyGiven => "FEEDBACK_ALREADY_GIVEN",
            ErrorCode::ConferenceNotEnded => "CONFERENCE_NOT_ENDED",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::IdGenerationFailed => "ID_GENERATION_FAILED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns a detail value by key.
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::validation(err.field().to_string(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_length_displays_correctly() {
        let err = ValidationError::length_out_of_range("title", 3, 100, 2);
        assert_eq!(
            format!("{}", err),
            "Field 'title' must be between 3 and 100 characters, got 2"
        );
    }

    #[test]
    fn validate_length_counts_characters_not_bytes() {
        assert!(validate_length("title", "äöü", 3, 100).is_ok());
        assert!(validate_length("title", "ab", 3, 100).is_err());
    }

    #[test]
    fn validate_length_reports_empty_field() {
        let err = validate_length("title", "", 3, 100).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("title"));
    }

    #[test]
    fn validate_length_allows_empty_when_min_is_zero() {
        assert!(validate_length("prerequisites", "", 0, 255).is_ok());
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::ConferenceNotFound, "Conference not found");
        assert_eq!(format!("{}", err), "[CONFERENCE_NOT_FOUND] Conference not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "title");
        assert_eq!(err.detail("field"), Some("title"));
    }

    #[test]
    fn validation_error_converts_to_domain_error_with_field() {
        let err: DomainError = ValidationError::too_small("seats", 1, 0).into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.detail("field"), Some("seats"));
    }

    #[test]
    fn every_code_has_a_kind() {
        assert_eq!(ErrorCode::InvalidPagination.kind(), ErrorKind::Validation);
        assert_eq!(ErrorCode::ConferenceNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(ErrorCode::HostCannotRegister.kind(), ErrorKind::Forbidden);
        assert_eq!(ErrorCode::ConferenceFull.kind(), ErrorKind::Conflict);
        assert_eq!(ErrorCode::DatabaseError.kind(), ErrorKind::Internal);
    }
}
