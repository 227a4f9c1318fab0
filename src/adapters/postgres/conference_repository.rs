//! PostgreSQL implementation of ConferenceRepository.
//!
//! Approved windows are additionally guarded by the `conferences_no_approved_overlap`
//! exclusion constraint; a violation surfaces as `TimeWindowConflict`.

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder, Postgres};

use crate::domain::conference::Conference;
use crate::domain::foundation::{
    ConferenceId, ConferenceStatus, DomainError, ErrorCode, TimeWindow, Timestamp, UserId,
};
use crate::ports::ConferenceRepository;

use super::keyset::push_conflict_order;
use super::rows::{row_to_conference, CONFERENCE_COLUMNS};
use super::{db_error, write_error};

/// PostgreSQL implementation of ConferenceRepository.
#[derive(Clone)]
pub struct PostgresConferenceRepository {
    pool: PgPool,
}

impl PostgresConferenceRepository {
    /// Creates a new PostgresConferenceRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn not_found(id: &ConferenceId) -> DomainError {
    DomainError::new(ErrorCode::ConferenceNotFound, format!("Conference not found: {}", id))
        .with_detail("conference_id", id.to_string())
}

#[async_trait]
impl ConferenceRepository for PostgresConferenceRepository {
    async fn save(&self, conference: &Conference) -> Result<(), DomainError> {
        let details = conference.details();
        sqlx::query(
            r#"
            INSERT INTO conferences (
                id, host_id, title, description, speaker_name, speaker_title,
                target_audience, prerequisites, seats, starts_at, ends_at,
                status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(conference.id().as_uuid())
        .bind(conference.host_id().as_uuid())
        .bind(&details.title)
        .bind(&details.description)
        .bind(&details.speaker_name)
        .bind(&details.speaker_title)
        .bind(&details.target_audience)
        .bind(&details.prerequisites)
        .bind(i64::from(details.seats))
        .bind(*conference.window().starts_at().as_datetime())
        .bind(*conference.window().ends_at().as_datetime())
        .bind(conference.status().as_str())
        .bind(conference.created_at().as_datetime())
        .bind(conference.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("Failed to insert conference", e, None))?;

        Ok(())
    }

    async fn update(&self, conference: &Conference) -> Result<(), DomainError> {
        let details = conference.details();
        let result = sqlx::query(
            r#"
            UPDATE conferences SET
                title = $2,
                description = $3,
                speaker_name = $4,
                speaker_title = $5,
                target_audience = $6,
                prerequisites = $7,
                seats = $8,
                starts_at = $9,
                ends_at = $10,
                status = $11,
                updated_at = $12
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(conference.id().as_uuid())
        .bind(&details.title)
        .bind(&details.description)
        .bind(&details.speaker_name)
        .bind(&details.speaker_title)
        .bind(&details.target_audience)
        .bind(&details.prerequisites)
        .bind(i64::from(details.seats))
        .bind(*conference.window().starts_at().as_datetime())
        .bind(*conference.window().ends_at().as_datetime())
        .bind(conference.status().as_str())
        .bind(conference.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("Failed to update conference", e, None))?;

        if result.rows_affected() == 0 {
            return Err(not_found(conference.id()));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &ConferenceId) -> Result<Option<Conference>, DomainError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
        builder
            .push(CONFERENCE_COLUMNS)
            .push(" FROM conferences c WHERE c.deleted_at IS NULL AND c.id = ")
            .push_bind(*id.as_uuid());

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch conference", e))?;

        row.as_ref().map(row_to_conference).transpose()
    }

    async fn soft_delete(&self, id: &ConferenceId, at: Timestamp) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE conferences SET deleted_at = $2, updated_at = $2
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.as_uuid())
        .bind(at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to delete conference", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn find_conflicting(
        &self,
        window: &TimeWindow,
        exclude: Option<&ConferenceId>,
    ) -> Result<Vec<Conference>, DomainError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
        builder
            .push(CONFERENCE_COLUMNS)
            .push(" FROM conferences c WHERE c.deleted_at IS NULL AND c.status = ")
            .push_bind(ConferenceStatus::Approved.as_str())
            .push(" AND c.starts_at < ")
            .push_bind(*window.ends_at().as_datetime())
            .push(" AND c.ends_at > ")
            .push_bind(*window.starts_at().as_datetime());
        if let Some(exclude) = exclude {
            builder.push(" AND c.id <> ").push_bind(*exclude.as_uuid());
        }
        push_conflict_order(&mut builder);

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch conflicting conferences", e))?;

        rows.iter().map(row_to_conference).collect()
    }

    async fn find_active_proposal(
        &self,
        host_id: &UserId,
        now: Timestamp,
    ) -> Result<Option<Conference>, DomainError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
        builder
            .push(CONFERENCE_COLUMNS)
            .push(" FROM conferences c WHERE c.deleted_at IS NULL AND c.host_id = ")
            .push_bind(*host_id.as_uuid())
            .push(" AND c.status = ")
            .push_bind(ConferenceStatus::Pending.as_str())
            .push(" AND c.ends_at > ")
            .push_bind(*now.as_datetime())
            .push(" ORDER BY c.created_at ASC, c.id ASC LIMIT 1");

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch active proposal", e))?;

        row.as_ref().map(row_to_conference).transpose()
    }
}
