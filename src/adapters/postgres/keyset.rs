//! Keyset clauses for `QueryBuilder` listings.
//!
//! Every listing scans in `PageRequest::scan_order` and keeps rows strictly
//! after the cursor in that order, then fetches one row past the limit.
//! Column names come from a closed set of `match` arms, never from callers.

use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::pagination::{PageRequest, SortKey, SortOrder};
use crate::ports::CONFLICT_LIMIT;

fn comparator(scan: SortOrder) -> &'static str {
    match scan {
        SortOrder::Asc => " > ",
        SortOrder::Desc => " < ",
    }
}

fn direction(scan: SortOrder) -> &'static str {
    match scan {
        SortOrder::Asc => " ASC",
        SortOrder::Desc => " DESC",
    }
}

/// Appends the order and cap of a conflict query over conferences aliased `c`.
///
/// Ties on `starts_at` fall back to `id`, matching the in-memory store.
pub(super) fn push_conflict_order(builder: &mut QueryBuilder<'_, Postgres>) {
    builder
        .push(" ORDER BY c.starts_at ASC, c.id ASC LIMIT ")
        .push_bind(CONFLICT_LIMIT as i64);
}

/// Appends `AND <column> >|< $cursor ORDER BY <column> LIMIT $n` for a
/// listing ordered by a single UUID column.
pub(super) fn push_id_keyset<K>(
    builder: &mut QueryBuilder<'_, Postgres>,
    column: &'static str,
    page: &PageRequest<K>,
    order: SortOrder,
    key_uuid: impl Fn(K) -> Uuid,
) where
    K: Copy,
{
    let scan = page.scan_order(order);
    if let Some(key) = page.cursor_key() {
        builder
            .push(" AND ")
            .push(column)
            .push(comparator(scan))
            .push_bind(key_uuid(key));
    }
    builder
        .push(" ORDER BY ")
        .push(column)
        .push(direction(scan))
        .push(" LIMIT ")
        .push_bind(i64::from(page.fetch_limit()));
}

/// Appends the cursor, order and limit for a conference listing aliased `c`.
///
/// `StartsAt` compares the composite `(starts_at, id)` against the cursor
/// row's values; a cursor id with no row matches nothing.
pub(super) fn push_conference_keyset<K>(
    builder: &mut QueryBuilder<'_, Postgres>,
    page: &PageRequest<K>,
    sort: SortKey,
    order: SortOrder,
    key_uuid: impl Fn(K) -> Uuid,
) where
    K: Copy,
{
    match sort {
        SortKey::CreatedAt => push_id_keyset(builder, "c.id", page, order, key_uuid),
        SortKey::StartsAt => {
            let scan = page.scan_order(order);
            if let Some(key) = page.cursor_key() {
                builder
                    .push(" AND (c.starts_at, c.id)")
                    .push(comparator(scan))
                    .push("(SELECT starts_at, id FROM conferences WHERE id = ")
                    .push_bind(key_uuid(key))
                    .push(")");
            }
            let dir = direction(scan);
            builder
                .push(" ORDER BY c.starts_at")
                .push(dir)
                .push(", c.id")
                .push(dir)
                .push(" LIMIT ")
                .push_bind(i64::from(page.fetch_limit()));
        }
    }
}
