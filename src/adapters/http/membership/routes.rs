//! Route definitions for membership endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers;

/// Membership routes, nested under `/api/memberships`.
///
/// Admin endpoints rely on the `RequireAdmin` extractor; the routes
/// themselves are registered on the same authenticated router.
pub fn membership_routes() -> Router<AppState> {
    Router::new()
        .route("/fees", get(handlers::get_fee_schedule))
        .route("/apply", post(handlers::apply_for_membership))
        .route("/me", get(handlers::get_my_membership))
        .route("/me/cancel", post(handlers::cancel_my_membership))
        .route("/me/renew", post(handlers::renew_my_membership))
        .route("/me/pay", post(handlers::initiate_dues_payment))
        .route("/stats", get(handlers::get_membership_stats))
        .route("/expire-sweep", post(handlers::run_expiry_sweep))
        .route("/:id/approve", post(handlers::approve_membership))
        .route("/:id/suspend", post(handlers::suspend_membership))
        .route("/:id/reinstate", post(handlers::reinstate_membership))
        .route("/:id/payments", post(handlers::record_manual_payment))
}
