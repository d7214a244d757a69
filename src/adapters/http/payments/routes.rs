//! Route definitions for payment callbacks.
//!
//! Kept separate from the authenticated API surface; the gateway posts
//! here without credentials.

use axum::routing::post;
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers;

/// Payment routes, nested under `/api/payments`.
pub fn payment_routes() -> Router<AppState> {
    Router::new().route("/callback", post(handlers::gateway_callback))
}
