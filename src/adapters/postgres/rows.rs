//! Row mapping shared by the conference-returning adapters.

use sqlx::postgres::PgRow;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::conference::{Conference, ConferenceDetails};
use crate::domain::foundation::{
    ConferenceId, ConferenceStatus, DomainError, ErrorCode, TimeWindow, Timestamp, UserId,
};
use crate::ports::ConferenceView;

use super::db_error;

/// Conference columns, qualified with the `c` alias.
pub(super) const CONFERENCE_COLUMNS: &str = r#"
    c.id, c.host_id, c.title, c.description, c.speaker_name, c.speaker_title,
    c.target_audience, c.prerequisites, c.seats, c.starts_at, c.ends_at,
    c.status, c.created_at, c.updated_at, c.deleted_at
"#;

/// Derived registration count column for view queries.
pub(super) const REGISTRATION_COUNT_COLUMN: &str = r#"
    (SELECT COUNT(*) FROM registrations r WHERE r.conference_id = c.id) AS registration_count
"#;

type Utc = chrono::DateTime<chrono::Utc>;

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| db_error(&format!("Failed to read column '{}'", name), e))
}

pub(super) fn row_to_conference(row: &PgRow) -> Result<Conference, DomainError> {
    let id: Uuid = column(row, "id")?;
    let host_id: Uuid = column(row, "host_id")?;
    let seats: i64 = column(row, "seats")?;
    let starts_at: Utc = column(row, "starts_at")?;
    let ends_at: Utc = column(row, "ends_at")?;
    let status: String = column(row, "status")?;
    let created_at: Utc = column(row, "created_at")?;
    let updated_at: Utc = column(row, "updated_at")?;
    let deleted_at: Option<Utc> = column(row, "deleted_at")?;

    let details = ConferenceDetails {
        title: column(row, "title")?,
        description: column(row, "description")?,
        speaker_name: column(row, "speaker_name")?,
        speaker_title: column(row, "speaker_title")?,
        target_audience: column(row, "target_audience")?,
        prerequisites: column(row, "prerequisites")?,
        seats: u32::try_from(seats).map_err(|_| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid seats value: {}", seats))
        })?,
    };

    let status = status.parse::<ConferenceStatus>().map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid conference status: {}", e))
    })?;

    let window = TimeWindow::new(Timestamp::from_datetime(starts_at), Timestamp::from_datetime(ends_at))?;

    Ok(Conference::reconstitute(
        ConferenceId::from_uuid(id),
        UserId::from_uuid(host_id),
        details,
        window,
        status,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
        deleted_at.map(Timestamp::from_datetime),
    ))
}

pub(super) fn row_to_view(row: &PgRow) -> Result<ConferenceView, DomainError> {
    let count: i64 = column(row, "registration_count")?;
    Ok(ConferenceView {
        conference: row_to_conference(row)?,
        registration_count: u32::try_from(count).unwrap_or(u32::MAX),
    })
}
