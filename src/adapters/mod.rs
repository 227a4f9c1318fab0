//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - Bearer token validation (HS256 JWT, test mock)
//! - `http` - axum routes, DTOs and middleware
//! - `ids` - UUIDv7 identifier generation
//! - `memory` - In-memory schedule store for tests and local runs
//! - `postgres` - PostgreSQL persistence

pub mod auth;
pub mod http;
pub mod ids;
pub mod memory;
pub mod postgres;

pub use ids::UuidV7Generator;
