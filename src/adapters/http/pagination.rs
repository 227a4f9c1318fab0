//! Cursor query parameters shared by listing endpoints.
//!
//! Pages are returned with the domain `PageInfo`, which already serializes
//! as `{has_more, first_id, last_id}`.

use serde::Deserialize;

/// `after_id` / `before_id` / `limit` query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct CursorParams<K> {
    #[serde(default)]
    pub after_id: Option<K>,
    #[serde(default)]
    pub before_id: Option<K>,
    #[serde(default)]
    pub limit: Option<u32>,
}
