//! Axum handlers for account endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppState;
use crate::application::handlers::RegisterUserCommand;
use crate::domain::foundation::{DomainError, ErrorCode};

use super::dto::{RegisterRequest, UserResponse};

/// Wraps `DomainError` for conversion into HTTP responses.
pub struct UserApiError(pub DomainError);

impl From<DomainError> for UserApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for UserApiError {
    fn into_response(self) -> Response {
        let status = match self.0.code {
            ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse::new(self.0.code.to_string(), self.0.message.clone());
        (status, Json(body)).into_response()
    }
}

/// POST /api/users/register
///
/// Creates the account row for the caller's token subject. Registering
/// twice is a no-op that returns the existing account.
pub async fn register_user(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, UserApiError> {
    let result = state
        .register_user_handler()
        .handle(RegisterUserCommand {
            user_id: user.user_id,
            email: request.email,
            full_name: request.full_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(result.user))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_validation_to_400() {
        let err = UserApiError(DomainError::validation("email", "missing '@'"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn maps_unknown_codes_to_500() {
        let err = UserApiError(DomainError::new(ErrorCode::DatabaseError, "db down"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
