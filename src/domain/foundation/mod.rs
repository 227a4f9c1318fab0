//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the scheduling domain.

mod auth;
mod command;
mod conference_status;
mod errors;
mod ids;
mod ownership;
mod principal;
mod state_machine;
mod time_window;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use command::CommandMetadata;
pub use conference_status::ConferenceStatus;
pub use errors::{validate_length, DomainError, ErrorCode, ErrorKind, ValidationError};
pub use ids::{ConferenceId, FeedbackId, UserId};
pub use ownership::OwnedByUser;
pub use principal::{Principal, UserRole};
pub use state_machine::StateMachine;
pub use time_window::TimeWindow;
pub use timestamp::Timestamp;
