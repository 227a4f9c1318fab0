//! HTTP middleware for axum.
//!
//! - `auth` - Authentication middleware and extractors
//! - `request_id` - Correlation id taken from `x-request-id`

pub mod auth;
pub mod request_id;

pub use auth::{
    auth_middleware, AuthRejection, AuthState, RequireAuth, RequireCoordinator,
};
pub use request_id::{RequestId, REQUEST_ID_HEADER};
