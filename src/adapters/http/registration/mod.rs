//! HTTP adapter for registration endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    RegisterRequest, RegisteredConferencesResponse, RegisteredUsersResponse, RegistrationEnvelope,
};
pub use handlers::RegistrationHandlers;
pub use routes::registration_routes;
