//! Route definitions for donation endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers;

/// Donation routes, nested under `/api/donations`.
pub fn donation_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_donation))
        .route("/stats", get(handlers::get_donation_stats))
}
