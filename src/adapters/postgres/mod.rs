//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresConferenceRepository` - Conference writes and conflict queries
//! - `PostgresConferenceReader` - Conference views and keyset listings
//! - `PostgresRegistrationRepository` - Seat admission and registration listings
//! - `PostgresFeedbackRepository` - Attendee feedback
//!
//! Overlap of approved windows and duplicate registrations are also refused
//! by constraints in the schema, so concurrent writers that both pass the
//! application checks cannot both commit.

mod conference_reader;
mod conference_repository;
mod feedback_repository;
mod keyset;
mod registration_repository;
mod rows;

pub use conference_reader::PostgresConferenceReader;
pub use conference_repository::PostgresConferenceRepository;
pub use feedback_repository::PostgresFeedbackRepository;
pub use registration_repository::PostgresRegistrationRepository;

use crate::domain::foundation::{DomainError, ErrorCode};

/// SQLSTATE for `exclusion_violation`.
const EXCLUSION_VIOLATION: &str = "23P01";

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

fn db_error(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn sqlstate(e: &sqlx::Error) -> Option<String> {
    e.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned())
}

/// Maps a failed write, translating constraint violations into domain codes.
///
/// `on_unique` names the code a unique violation stands for in this write.
fn write_error(context: &str, e: sqlx::Error, on_unique: Option<ErrorCode>) -> DomainError {
    match (sqlstate(&e).as_deref(), on_unique) {
        (Some(EXCLUSION_VIOLATION), _) => {
            tracing::warn!(context, "approved window overlap refused by constraint");
            DomainError::new(
                ErrorCode::TimeWindowConflict,
                "Approved time windows may not overlap",
            )
        }
        (Some(UNIQUE_VIOLATION), Some(code)) => {
            DomainError::new(code, format!("{}: duplicate row", context))
        }
        _ => db_error(context, e),
    }
}
