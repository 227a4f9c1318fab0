//! PostgreSQL implementation of FeedbackRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::domain::feedback::Feedback;
use crate::domain::foundation::{
    ConferenceId, DomainError, ErrorCode, FeedbackId, Timestamp, UserId,
};
use crate::domain::pagination::{assemble_page, Page, PageRequest, SortOrder};
use crate::ports::FeedbackRepository;

use super::keyset::push_id_keyset;
use super::{db_error, write_error};

/// PostgreSQL implementation of FeedbackRepository.
#[derive(Clone)]
pub struct PostgresFeedbackRepository {
    pool: PgPool,
}

impl PostgresFeedbackRepository {
    /// Creates a new PostgresFeedbackRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_feedback(row: &PgRow) -> Result<Feedback, DomainError> {
    let read = |e: sqlx::Error| db_error("Failed to read feedback row", e);

    let id: Uuid = row.try_get("id").map_err(read)?;
    let conference_id: Uuid = row.try_get("conference_id").map_err(read)?;
    let user_id: Uuid = row.try_get("user_id").map_err(read)?;
    let comment: String = row.try_get("comment").map_err(read)?;
    let created_at: chrono::DateTime<chrono::Utc> = row.try_get("created_at").map_err(read)?;
    let deleted_at: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("deleted_at").map_err(read)?;

    Ok(Feedback::reconstitute(
        FeedbackId::from_uuid(id),
        ConferenceId::from_uuid(conference_id),
        UserId::from_uuid(user_id),
        comment,
        Timestamp::from_datetime(created_at),
        deleted_at.map(Timestamp::from_datetime),
    ))
}

#[async_trait]
impl FeedbackRepository for PostgresFeedbackRepository {
    async fn save(&self, feedback: &Feedback) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO feedbacks (id, conference_id, user_id, comment, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(feedback.id().as_uuid())
        .bind(feedback.conference_id().as_uuid())
        .bind(feedback.user_id().as_uuid())
        .bind(feedback.comment())
        .bind(feedback.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            write_error(
                "Failed to insert feedback",
                e,
                Some(ErrorCode::FeedbackAlreadyGiven),
            )
        })?;

        Ok(())
    }

    async fn exists_for(
        &self,
        conference_id: &ConferenceId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM feedbacks
                WHERE conference_id = $1 AND user_id = $2 AND deleted_at IS NULL
            )
            "#,
        )
        .bind(conference_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check feedback", e))?;

        Ok(exists)
    }

    async fn list_by_conference(
        &self,
        conference_id: &ConferenceId,
        page: &PageRequest<FeedbackId>,
    ) -> Result<Page<Feedback>, DomainError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT id, conference_id, user_id, comment, created_at, deleted_at \
             FROM feedbacks WHERE deleted_at IS NULL AND conference_id = ",
        );
        builder.push_bind(*conference_id.as_uuid());
        push_id_keyset(&mut builder, "id", page, SortOrder::Asc, |id| *id.as_uuid());

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list feedback", e))?;

        let feedback = rows
            .iter()
            .map(row_to_feedback)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(assemble_page(feedback, page))
    }

    async fn soft_delete(&self, id: &FeedbackId, at: Timestamp) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE feedbacks SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id.as_uuid())
        .bind(at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to delete feedback", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::FeedbackNotFound,
                format!("Feedback not found: {}", id),
            )
            .with_detail("feedback_id", id.to_string()));
        }

        Ok(())
    }
}
