//! HTTP routes for registration endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    list_registered_conferences, list_registered_users, register, RegistrationHandlers,
};

pub fn registration_routes(handlers: RegistrationHandlers) -> Router {
    Router::new()
        .route("/", post(register))
        .route("/conferences/:id", get(list_registered_users))
        .route("/users/:id", get(list_registered_conferences))
        .with_state(handlers)
}
