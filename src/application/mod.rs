//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers take `CommandMetadata`; query handlers take the caller's
//! `Principal` directly.

pub mod handlers;

pub use handlers::*;
