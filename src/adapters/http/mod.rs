//! HTTP adapter - axum routers, handlers and DTOs.
//!
//! Layout follows one directory per domain module, each with its own
//! `dto.rs`, `handlers.rs` and `routes.rs`. Everything hangs off a
//! single `AppState` holding the ports and organization settings.

pub mod donations;
pub mod error;
pub mod events;
pub mod membership;
pub mod middleware;
pub mod payments;
pub mod users;


pub use error::ErrorResponse;

use std::sync::Arc;

use axum::{routing::get, Json, Router};

use crate::application::handlers::{
    ApplyForMembershipHandler, ApproveMembershipHandler, CancelMembershipHandler,
    CreateDonationHandler, CreateEventHandler, ExpireMembershipsHandler,
    GetDonationStatsHandler, GetMembershipHandler, GetMembershipStatsHandler,
    InitiateDuesPaymentHandler, ListEventsHandler, ProcessGatewayCallbackHandler,
    RecordManualPaymentHandler, RegisterForEventHandler, RegisterUserHandler,
    ReinstateMembershipHandler, RenewMembershipHandler, SuspendMembershipHandler,
};
use crate::domain::membership::FeeSchedule;
use crate::ports::{
    DonationRepository, EventRepository, MembershipRepository, MobileMoneyGateway,
    UserRepository,
};

use middleware::{auth_middleware, AuthVerifier};

/// Shared state for all HTTP handlers.
///
/// Handlers are constructed per request from the ports held here; they
/// are cheap wrappers around `Arc` clones.
#[derive(Clone)]
pub struct AppState {
    pub memberships: Arc<dyn MembershipRepository>,
    pub donations: Arc<dyn DonationRepository>,
    pub events: Arc<dyn EventRepository>,
    pub users: Arc<dyn UserRepository>,
    pub gateway: Arc<dyn MobileMoneyGateway>,
    /// Short code stamped into membership numbers at approval.
    pub org_code: String,
    /// Fee schedule in force for new applications.
    pub fee_schedule: FeeSchedule,
}

impl AppState {
    // ════════════════════════════════════════════════════════════════
    // Membership handlers
    // ════════════════════════════════════════════════════════════════

    pub fn apply_for_membership_handler(&self) -> ApplyForMembershipHandler {
        ApplyForMembershipHandler::new(
            self.memberships.clone(),
            self.users.clone(),
            self.fee_schedule.clone(),
        )
    }

    pub fn approve_membership_handler(&self) -> ApproveMembershipHandler {
        ApproveMembershipHandler::new(self.memberships.clone(), self.org_code.clone())
    }

    pub fn get_membership_handler(&self) -> GetMembershipHandler {
        GetMembershipHandler::new(self.memberships.clone())
    }

    pub fn cancel_membership_handler(&self) -> CancelMembershipHandler {
        CancelMembershipHandler::new(self.memberships.clone())
    }

    pub fn renew_membership_handler(&self) -> RenewMembershipHandler {
        RenewMembershipHandler::new(self.memberships.clone())
    }

    pub fn suspend_membership_handler(&self) -> SuspendMembershipHandler {
        SuspendMembershipHandler::new(self.memberships.clone())
    }

    pub fn reinstate_membership_handler(&self) -> ReinstateMembershipHandler {
        ReinstateMembershipHandler::new(self.memberships.clone())
    }

    pub fn record_manual_payment_handler(&self) -> RecordManualPaymentHandler {
        RecordManualPaymentHandler::new(self.memberships.clone())
    }

    pub fn initiate_dues_payment_handler(&self) -> InitiateDuesPaymentHandler {
        InitiateDuesPaymentHandler::new(self.memberships.clone(), self.gateway.clone())
    }

    pub fn get_membership_stats_handler(&self) -> GetMembershipStatsHandler {
        GetMembershipStatsHandler::new(self.memberships.clone())
    }

    pub fn expire_memberships_handler(&self) -> ExpireMembershipsHandler {
        ExpireMembershipsHandler::new(self.memberships.clone())
    }

    // ════════════════════════════════════════════════════════════════
    // Event handlers
    // ════════════════════════════════════════════════════════════════

    pub fn create_event_handler(&self) -> CreateEventHandler {
        CreateEventHandler::new(self.events.clone())
    }

    pub fn list_events_handler(&self) -> ListEventsHandler {
        ListEventsHandler::new(self.events.clone())
    }

    pub fn register_for_event_handler(&self) -> RegisterForEventHandler {
        RegisterForEventHandler::new(self.events.clone())
    }

    // ════════════════════════════════════════════════════════════════
    // Donation and payment handlers
    // ════════════════════════════════════════════════════════════════

    pub fn create_donation_handler(&self) -> CreateDonationHandler {
        CreateDonationHandler::new(self.donations.clone(), self.gateway.clone())
    }

    pub fn get_donation_stats_handler(&self) -> GetDonationStatsHandler {
        GetDonationStatsHandler::new(self.donations.clone())
    }

    pub fn process_gateway_callback_handler(&self) -> ProcessGatewayCallbackHandler {
        ProcessGatewayCallbackHandler::new(self.memberships.clone(), self.donations.clone())
    }

    // ════════════════════════════════════════════════════════════════
    // Account handlers
    // ════════════════════════════════════════════════════════════════

    pub fn register_user_handler(&self) -> RegisterUserHandler {
        RegisterUserHandler::new(self.users.clone())
    }
}

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Builds the full API router.
///
/// The auth middleware runs on every `/api` route; it only rejects
/// requests carrying an invalid token. Endpoints that need an identity
/// enforce it with extractors, which leaves the gateway callback open.
pub fn api_router(state: AppState, verifier: AuthVerifier) -> Router {
    let api = Router::new()
        .nest("/users", users::user_routes())
        .nest("/memberships", membership::membership_routes())
        .nest("/events", events::event_routes())
        .nest("/donations", donations::donation_routes())
        .nest("/payments", payments::payment_routes())
        .layer(axum::middleware::from_fn_with_state(
            verifier,
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{
        MockDonationRepository, MockEventRepository, MockGateway, MockMembershipRepository,
        MockUserRepository,
    };
    use crate::domain::foundation::Money;

    fn test_state() -> AppState {
        AppState {
            memberships: Arc::new(MockMembershipRepository::new()),
            donations: Arc::new(MockDonationRepository::new()),
            events: Arc::new(MockEventRepository::new()),
            users: Arc::new(MockUserRepository::new()),
            gateway: Arc::new(MockGateway::new()),
            org_code: "UMJ".to_string(),
            fee_schedule: FeeSchedule {
                gold_annual: Money::new(5000),
                silver_annual: Money::new(3000),
                bronze_annual: Money::new(1500),
                currency: "KES".to_string(),
            },
        }
    }

    #[test]
    fn router_builds_with_all_routes() {
        let verifier = AuthVerifier::new("0123456789abcdef0123456789abcdef", None);
        let _router = api_router(test_state(), verifier);
    }
}
