//! Axum handlers for membership endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::adapters::http::AppState;
use crate::application::handlers::{
    ApplyForMembershipCommand, CancelMembershipCommand, InitiateDuesPaymentCommand,
    RecordManualPaymentCommand, ReinstateMembershipCommand, RenewMembershipCommand,
    SuspendMembershipCommand,
};
use crate::domain::foundation::{MembershipId, Money};
use crate::domain::membership::MembershipError;

use super::dto::{
    ApplyRequest, CancelRequest, ExpireSweepResponse, FeeScheduleResponse,
    InitiatePaymentRequest, ManualPaymentRequest, ManualPaymentResponse, MembershipResponse,
    MembershipStatsResponse, PaymentInitiatedResponse, SuspendRequest,
};

// ════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════

/// Wraps `MembershipError` for conversion into HTTP responses.
pub struct MembershipApiError(pub MembershipError);

impl From<MembershipError> for MembershipApiError {
    fn from(err: MembershipError) -> Self {
        Self(err)
    }
}

impl IntoResponse for MembershipApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            MembershipError::NotFound(_) | MembershipError::NotFoundForUser(_) => {
                StatusCode::NOT_FOUND
            }
            MembershipError::AlreadyExists(_)
            | MembershipError::NumberAssigned(_)
            | MembershipError::DuplicateTransaction(_)
            | MembershipError::InvalidState { .. } => StatusCode::CONFLICT,
            MembershipError::PaymentFailed { .. } => StatusCode::PAYMENT_REQUIRED,
            MembershipError::Gateway(_) => StatusCode::BAD_GATEWAY,
            MembershipError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            MembershipError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        (status, Json(body)).into_response()
    }
}

// ════════════════════════════════════════════════════════════════════
// Member endpoints
// ════════════════════════════════════════════════════════════════════

/// POST /api/memberships/apply
pub async fn apply_for_membership(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<ApplyRequest>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let tier = request
        .tier
        .parse()
        .map_err(|_| MembershipError::validation("tier", "must be gold, silver or bronze"))?;
    let plan = request
        .plan
        .parse()
        .map_err(|_| MembershipError::validation("plan", "must be monthly or annual"))?;

    let result = state
        .apply_for_membership_handler()
        .handle(ApplyForMembershipCommand {
            user_id: user.user_id,
            tier,
            plan,
            phone: request.phone,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MembershipResponse::from(result.membership)),
    ))
}

/// GET /api/memberships/me
pub async fn get_my_membership(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<MembershipResponse>, MembershipApiError> {
    let result = state
        .get_membership_handler()
        .handle(crate::application::handlers::GetMembershipQuery {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(MembershipResponse::from(result.membership)))
}

/// POST /api/memberships/me/cancel
pub async fn cancel_my_membership(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CancelRequest>,
) -> Result<Json<MembershipResponse>, MembershipApiError> {
    let result = state
        .cancel_membership_handler()
        .handle(CancelMembershipCommand {
            user_id: user.user_id,
            reason: request.reason,
        })
        .await?;

    Ok(Json(MembershipResponse::from(result.membership)))
}

/// POST /api/memberships/me/renew
pub async fn renew_my_membership(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<MembershipResponse>, MembershipApiError> {
    let result = state
        .renew_membership_handler()
        .handle(RenewMembershipCommand {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(MembershipResponse::from(result.membership)))
}

/// POST /api/memberships/me/pay
pub async fn initiate_dues_payment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<InitiatePaymentRequest>,
) -> Result<(StatusCode, Json<PaymentInitiatedResponse>), MembershipApiError> {
    let result = state
        .initiate_dues_payment_handler()
        .handle(InitiateDuesPaymentCommand {
            user_id: user.user_id,
            amount: request.amount.map(Money::new),
        })
        .await?;

    Ok((StatusCode::ACCEPTED, Json(result.into())))
}

/// GET /api/memberships/fees
pub async fn get_fee_schedule(
    State(state): State<AppState>,
) -> Json<FeeScheduleResponse> {
    Json(FeeScheduleResponse::from(&state.fee_schedule))
}

// ════════════════════════════════════════════════════════════════════
// Admin endpoints
// ════════════════════════════════════════════════════════════════════

/// POST /api/memberships/:id/approve
pub async fn approve_membership(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(membership_id): Path<MembershipId>,
) -> Result<Json<MembershipResponse>, MembershipApiError> {
    let result = state
        .approve_membership_handler()
        .handle(crate::application::handlers::ApproveMembershipCommand { membership_id })
        .await?;

    Ok(Json(MembershipResponse::from(result.membership)))
}

/// POST /api/memberships/:id/suspend
pub async fn suspend_membership(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(membership_id): Path<MembershipId>,
    Json(request): Json<SuspendRequest>,
) -> Result<Json<MembershipResponse>, MembershipApiError> {
    let result = state
        .suspend_membership_handler()
        .handle(SuspendMembershipCommand {
            membership_id,
            reason: request.reason,
        })
        .await?;

    Ok(Json(MembershipResponse::from(result.membership)))
}

/// POST /api/memberships/:id/reinstate
pub async fn reinstate_membership(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(membership_id): Path<MembershipId>,
) -> Result<Json<MembershipResponse>, MembershipApiError> {
    let result = state
        .reinstate_membership_handler()
        .handle(ReinstateMembershipCommand { membership_id })
        .await?;

    Ok(Json(MembershipResponse::from(result.membership)))
}

/// POST /api/memberships/:id/payments
pub async fn record_manual_payment(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(membership_id): Path<MembershipId>,
    Json(request): Json<ManualPaymentRequest>,
) -> Result<Json<ManualPaymentResponse>, MembershipApiError> {
    let method = request
        .method
        .parse()
        .map_err(|_| {
            MembershipError::validation("method", "must be mobile_money, bank_transfer or cash")
        })?;

    let result = state
        .record_manual_payment_handler()
        .handle(RecordManualPaymentCommand {
            membership_id,
            amount: Money::new(request.amount),
            method,
            reference: request.reference,
        })
        .await?;

    Ok(Json(result.into()))
}

/// GET /api/memberships/stats
pub async fn get_membership_stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<MembershipStatsResponse>, MembershipApiError> {
    let stats = state.get_membership_stats_handler().handle().await?;
    Ok(Json(stats.into()))
}

/// POST /api/memberships/expire-sweep
pub async fn run_expiry_sweep(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<ExpireSweepResponse>, MembershipApiError> {
    let result = state.expire_memberships_handler().handle().await?;
    Ok(Json(ExpireSweepResponse {
        expired: result.expired,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    fn status_for(err: MembershipError) -> StatusCode {
        MembershipApiError(err).into_response().status()
    }

    #[test]
    fn maps_not_found_to_404() {
        assert_eq!(
            status_for(MembershipError::not_found(MembershipId::new())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(MembershipError::not_found_for_user(UserId::new())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn maps_conflicts_to_409() {
        assert_eq!(
            status_for(MembershipError::already_exists(UserId::new())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(MembershipError::duplicate_transaction("TX-1")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(MembershipError::invalid_state("cancelled", "renew")),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn maps_payment_failure_to_402() {
        assert_eq!(
            status_for(MembershipError::payment_failed("declined")),
            StatusCode::PAYMENT_REQUIRED
        );
    }

    #[test]
    fn maps_gateway_to_502() {
        assert_eq!(
            status_for(MembershipError::gateway("timeout")),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn maps_validation_to_400() {
        assert_eq!(
            status_for(MembershipError::validation("tier", "unknown tier")),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn maps_infrastructure_to_500() {
        assert_eq!(
            status_for(MembershipError::infrastructure("db down")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
