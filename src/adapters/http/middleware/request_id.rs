//! Request correlation.
//!
//! `SetRequestIdLayer` stamps every request with `x-request-id` (keeping a
//! caller-supplied value); handlers read it back through [`RequestId`] and
//! hand it to commands as their correlation id.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::domain::foundation::{CommandMetadata, Principal};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The request's `x-request-id`, when present and valid UTF-8.
#[derive(Debug, Clone, Default)]
pub struct RequestId(pub Option<String>);

impl RequestId {
    /// Command metadata for `principal`, correlated with this request.
    pub fn metadata(self, principal: Principal) -> CommandMetadata {
        let metadata = CommandMetadata::new(principal);
        match self.0 {
            Some(id) => metadata.with_correlation_id(id),
            None => metadata,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestId(
            parts
                .headers
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        ))
    }
}
