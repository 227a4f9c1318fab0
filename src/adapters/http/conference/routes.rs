//! HTTP routes for conference endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{
    change_status, create_conference, delete_conference, get_conference, list_conferences,
    update_conference, ConferenceHandlers,
};

/// Creates the conference router with all endpoints.
pub fn conference_routes(handlers: ConferenceHandlers) -> Router {
    Router::new()
        .route("/", get(list_conferences).post(create_conference))
        .route(
            "/:id",
            get(get_conference)
                .patch(update_conference)
                .delete(delete_conference),
        )
        .route("/:id/status", patch(change_status))
        .with_state(handlers)
}
