//! PostgreSQL implementation of RegistrationRepository.
//!
//! Admission runs in one transaction that locks the conference row, so two
//! concurrent registrations for the last seat are serialized and the second
//! sees the first's row when it counts.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::domain::conference::Conference;
use crate::domain::foundation::{
    ConferenceId, DomainError, ErrorCode, TimeWindow, Timestamp, UserId,
};
use crate::domain::pagination::{assemble_page, Page, PageRequest, SortKey, SortOrder};
use crate::domain::registration::Registration;
use crate::ports::{ConferenceView, RegistrationRepository};

use super::keyset::{push_conference_keyset, push_conflict_order, push_id_keyset};
use super::rows::{row_to_conference, row_to_view, CONFERENCE_COLUMNS, REGISTRATION_COUNT_COLUMN};
use super::{db_error, write_error};

/// PostgreSQL implementation of RegistrationRepository.
#[derive(Clone)]
pub struct PostgresRegistrationRepository {
    pool: PgPool,
}

impl PostgresRegistrationRepository {
    /// Creates a new PostgresRegistrationRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepository {
    async fn create(&self, registration: &Registration) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let seats: Option<(i64,)> = sqlx::query_as(
            "SELECT seats FROM conferences WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(registration.conference_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to lock conference", e))?;

        let Some((seats,)) = seats else {
            return Err(DomainError::new(
                ErrorCode::ConferenceNotFound,
                format!("Conference not found: {}", registration.conference_id),
            )
            .with_detail("conference_id", registration.conference_id.to_string()));
        };

        let (taken, already): (i64, bool) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COALESCE(BOOL_OR(user_id = $2), FALSE)
            FROM registrations
            WHERE conference_id = $1
            "#,
        )
        .bind(registration.conference_id.as_uuid())
        .bind(registration.user_id.as_uuid())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to count registrations", e))?;

        if already {
            return Err(DomainError::new(
                ErrorCode::AlreadyRegistered,
                "User is already registered for this conference",
            ));
        }
        if taken >= seats {
            return Err(DomainError::new(ErrorCode::ConferenceFull, "No seats left"));
        }

        sqlx::query(
            r#"
            INSERT INTO registrations (conference_id, user_id, registered_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(registration.conference_id.as_uuid())
        .bind(registration.user_id.as_uuid())
        .bind(registration.registered_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            write_error(
                "Failed to insert registration",
                e,
                Some(ErrorCode::AlreadyRegistered),
            )
        })?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;

        Ok(())
    }

    async fn is_registered(
        &self,
        conference_id: &ConferenceId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM registrations WHERE conference_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(conference_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check registration", e))?;

        Ok(exists)
    }

    async fn count_by_conference(&self, conference_id: &ConferenceId) -> Result<u32, DomainError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM registrations WHERE conference_id = $1")
                .bind(conference_id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("Failed to count registrations", e))?;

        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn find_conflicting(
        &self,
        user_id: &UserId,
        window: &TimeWindow,
    ) -> Result<Vec<Conference>, DomainError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
        builder
            .push(CONFERENCE_COLUMNS)
            .push(
                " FROM conferences c JOIN registrations r ON r.conference_id = c.id \
                 WHERE c.deleted_at IS NULL AND r.user_id = ",
            )
            .push_bind(*user_id.as_uuid())
            .push(" AND c.starts_at < ")
            .push_bind(*window.ends_at().as_datetime())
            .push(" AND c.ends_at > ")
            .push_bind(*window.starts_at().as_datetime());
        push_conflict_order(&mut builder);

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch conflicting registrations", e))?;

        rows.iter().map(row_to_conference).collect()
    }

    async fn list_registered_users(
        &self,
        conference_id: &ConferenceId,
        page: &PageRequest<UserId>,
    ) -> Result<Page<Registration>, DomainError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT conference_id, user_id, registered_at FROM registrations WHERE conference_id = ",
        );
        builder.push_bind(*conference_id.as_uuid());
        push_id_keyset(&mut builder, "user_id", page, SortOrder::Asc, |id| {
            *id.as_uuid()
        });

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list registered users", e))?;

        let registrations = rows
            .iter()
            .map(|row| {
                let conference_id: Uuid = row
                    .try_get("conference_id")
                    .map_err(|e| db_error("Failed to read conference_id", e))?;
                let user_id: Uuid = row
                    .try_get("user_id")
                    .map_err(|e| db_error("Failed to read user_id", e))?;
                let registered_at: chrono::DateTime<chrono::Utc> = row
                    .try_get("registered_at")
                    .map_err(|e| db_error("Failed to read registered_at", e))?;
                Ok(Registration::new(
                    ConferenceId::from_uuid(conference_id),
                    UserId::from_uuid(user_id),
                    Timestamp::from_datetime(registered_at),
                ))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(assemble_page(registrations, page))
    }

    async fn list_registered_conferences(
        &self,
        user_id: &UserId,
        include_past: bool,
        page: &PageRequest<ConferenceId>,
    ) -> Result<Page<ConferenceView>, DomainError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
        builder
            .push(CONFERENCE_COLUMNS)
            .push(",")
            .push(REGISTRATION_COUNT_COLUMN)
            .push(
                " FROM conferences c JOIN registrations reg ON reg.conference_id = c.id \
                 WHERE c.deleted_at IS NULL AND reg.user_id = ",
            )
            .push_bind(*user_id.as_uuid());
        if !include_past {
            builder
                .push(" AND c.ends_at > ")
                .push_bind(*Timestamp::now().as_datetime());
        }
        push_conference_keyset(&mut builder, page, SortKey::StartsAt, SortOrder::Asc, |id| {
            *id.as_uuid()
        });

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list registered conferences", e))?;

        let views = rows
            .iter()
            .map(row_to_view)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(assemble_page(views, page))
    }
}
