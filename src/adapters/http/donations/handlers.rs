//! Axum handlers for donation endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::adapters::http::AppState;
use crate::application::handlers::CreateDonationCommand;
use crate::domain::donation::DonationError;
use crate::domain::foundation::Money;

use super::dto::{CreateDonationRequest, DonationResponse, DonationStatsResponse};

/// Wraps `DonationError` for conversion into HTTP responses.
pub struct DonationApiError(pub DonationError);

impl From<DonationError> for DonationApiError {
    fn from(err: DonationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for DonationApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DonationError::NotFound(_) => StatusCode::NOT_FOUND,
            DonationError::DuplicateTransaction(_) => StatusCode::CONFLICT,
            DonationError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            DonationError::Gateway(_) => StatusCode::BAD_GATEWAY,
            DonationError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        (status, Json(body)).into_response()
    }
}

/// POST /api/donations
///
/// Authentication is optional; a signed-in donor gets the donation
/// linked to their account, everyone else donates anonymously.
pub async fn create_donation(
    State(state): State<AppState>,
    user: Option<RequireAuth>,
    Json(request): Json<CreateDonationRequest>,
) -> Result<impl IntoResponse, DonationApiError> {
    let method = request
        .method
        .parse()
        .map_err(|_| {
            DonationError::validation("method", "must be mobile_money, bank_transfer or cash")
        })?;

    let result = state
        .create_donation_handler()
        .handle(CreateDonationCommand {
            donor_name: request.donor_name,
            donor_user_id: user.map(|RequireAuth(u)| u.user_id),
            amount: Money::new(request.amount),
            currency: request.currency,
            method,
            phone: request.phone,
            message: request.message,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DonationResponse::from_result(result)),
    ))
}

/// GET /api/donations/stats
pub async fn get_donation_stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<DonationStatsResponse>, DonationApiError> {
    let stats = state.get_donation_stats_handler().handle().await?;
    Ok(Json(stats.into()))
}
