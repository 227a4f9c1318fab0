//! HTTP adapters - REST API implementations.
//!
//! Each module owns its DTOs, handlers and routes; `router` assembles them
//! behind the shared middleware stack.

pub mod conference;
pub mod error;
pub mod feedback;
pub mod middleware;
pub mod pagination;
pub mod registration;
pub mod router;

pub use error::ErrorResponse;
pub use router::{api_router, AppPorts, RouterSettings};
