//! Route definitions for account endpoints.

use axum::routing::post;
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers;

/// Account routes, nested under `/api/users`.
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/register", post(handlers::register_user))
}
