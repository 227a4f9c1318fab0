//! PostgreSQL implementation of ConferenceReader.
//!
//! Listing filters are appended with `QueryBuilder` binds; ordering and the
//! cursor predicate come from the `keyset` helpers.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::foundation::{ConferenceId, DomainError, Timestamp};
use crate::domain::pagination::{assemble_page, Page};
use crate::ports::{ConferenceQuery, ConferenceReader, ConferenceView};

use super::db_error;
use super::keyset::push_conference_keyset;
use super::rows::{row_to_view, CONFERENCE_COLUMNS, REGISTRATION_COUNT_COLUMN};

/// PostgreSQL implementation of ConferenceReader.
#[derive(Clone)]
pub struct PostgresConferenceReader {
    pool: PgPool,
}

impl PostgresConferenceReader {
    /// Creates a new PostgresConferenceReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn view_select() -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT ");
    builder
        .push(CONFERENCE_COLUMNS)
        .push(",")
        .push(REGISTRATION_COUNT_COLUMN)
        .push(" FROM conferences c WHERE c.deleted_at IS NULL");
    builder
}

/// Escapes `LIKE` wildcards so the title filter is a plain substring match.
fn like_pattern(title: &str) -> String {
    let escaped = title
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl ConferenceReader for PostgresConferenceReader {
    async fn get(&self, id: &ConferenceId) -> Result<Option<ConferenceView>, DomainError> {
        let mut builder = view_select();
        builder.push(" AND c.id = ").push_bind(*id.as_uuid());

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch conference", e))?;

        row.as_ref().map(row_to_view).transpose()
    }

    async fn list(&self, query: &ConferenceQuery) -> Result<Page<ConferenceView>, DomainError> {
        let mut builder = view_select();
        builder
            .push(" AND c.status = ")
            .push_bind(query.status.as_str());

        if let Some(host_id) = query.host_id {
            builder.push(" AND c.host_id = ").push_bind(*host_id.as_uuid());
        }
        if let Some(title) = &query.title {
            builder.push(" AND c.title ILIKE ").push_bind(like_pattern(title));
        }
        if let Some(before) = query.starts_before {
            builder.push(" AND c.starts_at < ").push_bind(*before.as_datetime());
        }
        if let Some(after) = query.starts_after {
            builder.push(" AND c.starts_at > ").push_bind(*after.as_datetime());
        }
        if !query.include_past {
            builder
                .push(" AND c.ends_at > ")
                .push_bind(*Timestamp::now().as_datetime());
        }

        push_conference_keyset(&mut builder, &query.page, query.sort, query.order, |id| {
            *id.as_uuid()
        });

        tracing::debug!(sql = builder.sql(), "listing conferences");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list conferences", e))?;

        let views = rows
            .iter()
            .map(row_to_view)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(assemble_page(views, &query.page))
    }
}
