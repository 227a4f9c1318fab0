//! Conference and registration error types.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::foundation::{
    ConferenceId, ConferenceStatus, DomainError, ErrorCode, ErrorKind, Timestamp, ValidationError,
};

use super::Conference;

/// Diagnostic entry describing a conference that blocks an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictSummary {
    pub id: ConferenceId,
    pub title: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

impl From<&Conference> for ConflictSummary {
    fn from(conference: &Conference) -> Self {
        Self {
            id: *conference.id(),
            title: conference.title().to_string(),
            starts_at: conference.window().starts_at(),
            ends_at: conference.window().ends_at(),
        }
    }
}

/// The pending proposal that keeps a host from proposing again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProposalSummary {
    pub id: ConferenceId,
    pub title: String,
    pub status: ConferenceStatus,
    pub created_at: Timestamp,
}

impl From<&Conference> for ProposalSummary {
    fn from(conference: &Conference) -> Self {
        Self {
            id: *conference.id(),
            title: conference.title().to_string(),
            status: conference.status(),
            created_at: *conference.created_at(),
        }
    }
}

/// Errors raised by conference scheduling and registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConferenceError {
    /// Conference absent or soft-deleted.
    NotFound(ConferenceId),
    /// Role or ownership rule violated.
    Forbidden(String),
    /// A field failed validation.
    ValidationFailed { field: String, message: String },
    /// Cursor parameters are inconsistent or the limit is out of range.
    InvalidPagination(String),
    EndTimeBeforeStart,
    TimeAlreadyPassed,
    InvalidStatusTransition(String),
    /// Overlaps one or more approved conferences.
    TimeWindowConflict(Vec<ConflictSummary>),
    /// The host already has an upcoming pending proposal.
    UserHasActiveProposal(ProposalSummary),
    UpdatePastConference,
    UpdateRejectedConference,
    UpdateApprovedTimeWindow,
    UpdateNotPendingConference(ConferenceStatus),
    UpdatePastConferenceStatus,
    HostCannotRegister,
    ConferenceEnded,
    AlreadyRegistered,
    ConferenceFull,
    /// Overlaps conferences the user is already registered for.
    ConflictingRegistrations(Vec<ConflictSummary>),
    /// Opaque failure; details are only in the server log.
    Internal { trace_id: Uuid },
}

impl ConferenceError {
    pub fn not_found(id: ConferenceId) -> Self {
        ConferenceError::NotFound(id)
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        ConferenceError::Forbidden(reason.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConferenceError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Logs the underlying failure under a fresh trace id and returns the
    /// opaque error the caller is allowed to see.
    pub fn internal(context: &str, error: impl std::fmt::Display) -> Self {
        let trace_id = Uuid::new_v4();
        tracing::error!(%trace_id, context, error = %error, "internal error");
        ConferenceError::Internal { trace_id }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ConferenceError::NotFound(_) => ErrorCode::ConferenceNotFound,
            ConferenceError::Forbidden(_) => ErrorCode::Forbidden,
            ConferenceError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ConferenceError::InvalidPagination(_) => ErrorCode::InvalidPagination,
            ConferenceError::EndTimeBeforeStart => ErrorCode::EndTimeBeforeStart,
            ConferenceError::TimeAlreadyPassed => ErrorCode::TimeAlreadyPassed,
            ConferenceError::InvalidStatusTransition(_) => ErrorCode::InvalidStatusTransition,
            ConferenceError::TimeWindowConflict(_) => ErrorCode::TimeWindowConflict,
            ConferenceError::UserHasActiveProposal(_) => ErrorCode::UserHasActiveProposal,
            ConferenceError::UpdatePastConference => ErrorCode::UpdatePastConference,
            ConferenceError::UpdateRejectedConference => ErrorCode::UpdateRejectedConference,
            ConferenceError::UpdateApprovedTimeWindow => ErrorCode::UpdateApprovedTimeWindow,
            ConferenceError::UpdateNotPendingConference(_) => {
                ErrorCode::UpdateNotPendingConference
            }
            ConferenceError::UpdatePastConferenceStatus => ErrorCode::UpdatePastConferenceStatus,
            ConferenceError::HostCannotRegister => ErrorCode::HostCannotRegister,
            ConferenceError::ConferenceEnded => ErrorCode::ConferenceEnded,
            ConferenceError::AlreadyRegistered => ErrorCode::AlreadyRegistered,
            ConferenceError::ConferenceFull => ErrorCode::ConferenceFull,
            ConferenceError::ConflictingRegistrations(_) => ErrorCode::ConflictingRegistrations,
            ConferenceError::Internal { .. } => ErrorCode::InternalError,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }

    pub fn message(&self) -> String {
        match self {
            ConferenceError::NotFound(id) => format!("Conference not found: {}", id),
            ConferenceError::Forbidden(reason) => reason.clone(),
            ConferenceError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ConferenceError::InvalidPagination(msg) => msg.clone(),
            ConferenceError::EndTimeBeforeStart => "End time must be after start time".to_string(),
            ConferenceError::TimeAlreadyPassed => "Start time has already passed".to_string(),
            ConferenceError::InvalidStatusTransition(msg) => msg.clone(),
            ConferenceError::TimeWindowConflict(_) => {
                "Time window overlaps an approved conference".to_string()
            }
            ConferenceError::UserHasActiveProposal(_) => {
                "You already have a pending conference proposal".to_string()
            }
            ConferenceError::UpdatePastConference => {
                "Cannot update a conference that has already ended".to_string()
            }
            ConferenceError::UpdateRejectedConference => {
                "Cannot update a rejected conference".to_string()
            }
            ConferenceError::UpdateApprovedTimeWindow => {
                "Cannot change the time window of an approved conference".to_string()
            }
            ConferenceError::UpdateNotPendingConference(status) => {
                format!("Only pending conferences can change status (current: {})", status)
            }
            ConferenceError::UpdatePastConferenceStatus => {
                "A conference that has already started can only be rejected".to_string()
            }
            ConferenceError::HostCannotRegister => {
                "Hosts cannot register for their own conference".to_string()
            }
            ConferenceError::ConferenceEnded => "Conference has already ended".to_string(),
            ConferenceError::AlreadyRegistered => {
                "Already registered for this conference".to_string()
            }
            ConferenceError::ConferenceFull => "Conference is full".to_string(),
            ConferenceError::ConflictingRegistrations(_) => {
                "Conference overlaps conferences you are registered for".to_string()
            }
            ConferenceError::Internal { .. } => "Internal server error".to_string(),
        }
    }

    /// Conflict diagnostics, if this error carries any.
    pub fn conflicts(&self) -> Option<&[ConflictSummary]> {
        match self {
            ConferenceError::TimeWindowConflict(list)
            | ConferenceError::ConflictingRegistrations(list) => Some(list),
            _ => None,
        }
    }

    /// The proposal blocking a new one, for `UserHasActiveProposal`.
    pub fn blocking_proposal(&self) -> Option<&ProposalSummary> {
        match self {
            ConferenceError::UserHasActiveProposal(proposal) => Some(proposal),
            _ => None,
        }
    }

    pub fn trace_id(&self) -> Option<Uuid> {
        match self {
            ConferenceError::Internal { trace_id } => Some(*trace_id),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ConferenceError {}

impl From<ValidationError> for ConferenceError {
    fn from(err: ValidationError) -> Self {
        ConferenceError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for ConferenceError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ConferenceNotFound => match err
                .detail("conference_id")
                .and_then(|id| id.parse::<ConferenceId>().ok())
            {
                Some(id) => ConferenceError::NotFound(id),
                None => ConferenceError::internal("conference lookup", err),
            },
            ErrorCode::ValidationFailed => ConferenceError::ValidationFailed {
                field: err.detail("field").unwrap_or("unknown").to_string(),
                message: err.message,
            },
            ErrorCode::InvalidPagination => ConferenceError::InvalidPagination(err.message),
            ErrorCode::EndTimeBeforeStart => ConferenceError::EndTimeBeforeStart,
            ErrorCode::TimeAlreadyPassed => ConferenceError::TimeAlreadyPassed,
            ErrorCode::InvalidStatusTransition => {
                ConferenceError::InvalidStatusTransition(err.message)
            }
            ErrorCode::Forbidden => ConferenceError::Forbidden(err.message),
            ErrorCode::TimeWindowConflict => ConferenceError::TimeWindowConflict(Vec::new()),
            ErrorCode::AlreadyRegistered => ConferenceError::AlreadyRegistered,
            ErrorCode::ConferenceFull => ConferenceError::ConferenceFull,
            _ => ConferenceError::internal("conference store", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_expected_kinds() {
        assert_eq!(
            ConferenceError::not_found(ConferenceId::new()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(ConferenceError::forbidden("no").kind(), ErrorKind::Forbidden);
        assert_eq!(ConferenceError::ConferenceFull.kind(), ErrorKind::Conflict);
        assert_eq!(ConferenceError::EndTimeBeforeStart.kind(), ErrorKind::Validation);
        assert_eq!(
            ConferenceError::Internal {
                trace_id: Uuid::new_v4()
            }
            .kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn internal_error_hides_cause() {
        let err = ConferenceError::internal("test", "connection refused on 10.0.0.1");
        assert_eq!(err.message(), "Internal server error");
        assert!(err.trace_id().is_some());
    }

    #[test]
    fn store_not_found_keeps_conference_id() {
        let id = ConferenceId::new();
        let domain = DomainError::new(ErrorCode::ConferenceNotFound, "gone")
            .with_detail("conference_id", id.to_string());
        assert_eq!(ConferenceError::from(domain), ConferenceError::NotFound(id));
    }

    #[test]
    fn constraint_codes_map_to_typed_conflicts() {
        let err = ConferenceError::from(DomainError::new(ErrorCode::ConferenceFull, "full"));
        assert_eq!(err, ConferenceError::ConferenceFull);

        let err =
            ConferenceError::from(DomainError::new(ErrorCode::TimeWindowConflict, "overlap"));
        assert_eq!(err, ConferenceError::TimeWindowConflict(Vec::new()));
    }

    #[test]
    fn database_errors_become_internal() {
        let err = ConferenceError::from(DomainError::new(ErrorCode::DatabaseError, "boom"));
        assert!(matches!(err, ConferenceError::Internal { .. }));
    }

    #[test]
    fn conflicts_are_exposed_for_diagnostics() {
        let err = ConferenceError::ConflictingRegistrations(Vec::new());
        assert_eq!(err.conflicts().map(|c| c.len()), Some(0));
        assert!(ConferenceError::ConferenceFull.conflicts().is_none());
    }
}
