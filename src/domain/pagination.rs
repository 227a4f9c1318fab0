//! Keyset (cursor) pagination.
//!
//! Stores translate a [`PageRequest`] into a bounded scan and hand the raw
//! rows to [`assemble_page`], which finishes the algorithm identically for
//! every listing:
//!
//! 1. filters and the cursor predicate are applied by the store;
//! 2. the store scans in [`PageRequest::scan_order`], which is the requested
//!    order for `after` cursors and its reverse for `before` cursors, and
//!    always compares "strictly after the cursor" in that scan order;
//! 3. the store fetches [`PageRequest::fetch_limit`] rows (`limit + 1`);
//! 4. `assemble_page` drops the surplus row, restores presentation order and
//!    reports `has_more` together with the first and last keys.

use serde::{Deserialize, Serialize};

use super::foundation::{DomainError, ErrorCode};

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: u32 = 20;

/// Page size used when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Sort modes for conference listings.
///
/// This is the closed set of columns a listing may be ordered by; stores
/// dispatch on it with a `match`, never by interpolating caller text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Identifier order. UUIDv7 identifiers follow creation time.
    #[default]
    CreatedAt,
    /// Composite `(starts_at, id)` order.
    StartsAt,
}

/// Direction of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Position a page is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor<K> {
    /// Rows strictly after the key in the requested order.
    After(K),
    /// Rows strictly before the key in the requested order.
    Before(K),
}

/// Validated pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<K> {
    cursor: Option<Cursor<K>>,
    limit: u32,
}

impl<K: Copy> PageRequest<K> {
    /// Builds a request from raw cursor parameters.
    ///
    /// `after` and `before` are mutually exclusive; supplying both is an
    /// error rather than picking one.
    pub fn new(after: Option<K>, before: Option<K>, limit: u32) -> Result<Self, DomainError> {
        let cursor = match (after, before) {
            (Some(_), Some(_)) => {
                return Err(DomainError::new(
                    ErrorCode::InvalidPagination,
                    "after_id and before_id cannot be used together",
                ))
            }
            (Some(key), None) => Some(Cursor::After(key)),
            (None, Some(key)) => Some(Cursor::Before(key)),
            (None, None) => None,
        };

        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(DomainError::new(
                ErrorCode::InvalidPagination,
                format!("limit must be between 1 and {}", MAX_PAGE_SIZE),
            )
            .with_detail("limit", limit.to_string()));
        }

        Ok(Self { cursor, limit })
    }

    /// First page with the given limit.
    #[cfg(test)]
    pub(crate) fn first(limit: u32) -> Result<Self, DomainError> {
        Self::new(None, None, limit)
    }

    pub fn cursor(&self) -> Option<Cursor<K>> {
        self.cursor
    }

    /// The cursor key regardless of direction.
    pub fn cursor_key(&self) -> Option<K> {
        match self.cursor {
            Some(Cursor::After(key)) | Some(Cursor::Before(key)) => Some(key),
            None => None,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows a store should fetch: one extra to detect a further page.
    pub fn fetch_limit(&self) -> u32 {
        self.limit + 1
    }

    pub fn is_backward(&self) -> bool {
        matches!(self.cursor, Some(Cursor::Before(_)))
    }

    /// Order the store must scan in for the requested presentation order.
    pub fn scan_order(&self, requested: SortOrder) -> SortOrder {
        if self.is_backward() {
            requested.reversed()
        } else {
            requested
        }
    }
}

impl<K: Copy> Default for PageRequest<K> {
    fn default() -> Self {
        Self {
            cursor: None,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Items that can serve as keyset cursors.
pub trait Keyset {
    type Key: Copy + PartialEq + std::fmt::Debug;

    fn keyset_id(&self) -> Self::Key;
}

/// Pagination envelope returned alongside results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo<K> {
    pub has_more: bool,
    pub first_id: Option<K>,
    pub last_id: Option<K>,
}

/// One page of results in presentation order.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T: Keyset> {
    pub items: Vec<T>,
    pub info: PageInfo<T::Key>,
}

impl<T: Keyset> Page<T> {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self {
            items: Vec::new(),
            info: PageInfo {
                has_more: false,
                first_id: None,
                last_id: None,
            },
        }
    }
}

/// Finishes a keyset scan.
///
/// `rows` must be in scan order and hold at most `request.fetch_limit()`
/// entries.
pub fn assemble_page<T: Keyset>(mut rows: Vec<T>, request: &PageRequest<T::Key>) -> Page<T> {
    let limit = request.limit() as usize;
    let has_more = rows.len() > limit;
    rows.truncate(limit);

    if request.is_backward() {
        rows.reverse();
    }

    let info = PageInfo {
        has_more,
        first_id: rows.first().map(Keyset::keyset_id),
        last_id: rows.last().map(Keyset::keyset_id),
    };

    Page { items: rows, info }
}
