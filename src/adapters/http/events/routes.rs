//! Route definitions for event endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers;

/// Event routes, nested under `/api/events`.
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_events).post(handlers::create_event))
        .route("/:id/register", post(handlers::register_for_event))
}
