//! Axum handlers for event endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::adapters::http::AppState;
use crate::application::handlers::{CreateEventCommand, RegisterForEventCommand};
use crate::domain::event::EventError;
use crate::domain::foundation::{EventId, Timestamp};

use super::dto::{CreateEventRequest, EventResponse, RegistrationResponse};

/// Wraps `EventError` for conversion into HTTP responses.
pub struct EventApiError(pub EventError);

impl From<EventError> for EventApiError {
    fn from(err: EventError) -> Self {
        Self(err)
    }
}

impl IntoResponse for EventApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            EventError::NotFound(_) => StatusCode::NOT_FOUND,
            EventError::Full(_)
            | EventError::Closed(_)
            | EventError::AlreadyRegistered(_) => StatusCode::CONFLICT,
            EventError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            EventError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        (status, Json(body)).into_response()
    }
}

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<Json<Vec<EventResponse>>, EventApiError> {
    let events = state.list_events_handler().handle().await?;
    Ok(Json(events.into_iter().map(EventResponse::from).collect()))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(request): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, EventApiError> {
    let result = state
        .create_event_handler()
        .handle(CreateEventCommand {
            title: request.title,
            description: request.description,
            starts_at: Timestamp::from_datetime(request.starts_at),
            location: request.location,
            capacity: request.capacity,
            created_by: admin.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(EventResponse::from(result.event))))
}

/// POST /api/events/:id/register
pub async fn register_for_event(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(event_id): Path<EventId>,
) -> Result<impl IntoResponse, EventApiError> {
    let result = state
        .register_for_event_handler()
        .handle(RegisterForEventCommand {
            event_id,
            user_id: user.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(RegistrationResponse::from(result))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_for(err: EventError) -> StatusCode {
        EventApiError(err).into_response().status()
    }

    #[test]
    fn maps_not_found_to_404() {
        assert_eq!(
            status_for(EventError::not_found(EventId::new())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn maps_capacity_and_duplicate_conflicts_to_409() {
        assert_eq!(status_for(EventError::full(EventId::new())), StatusCode::CONFLICT);
        assert_eq!(
            status_for(EventError::already_registered(EventId::new())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(EventError::closed(EventId::new())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn maps_validation_to_400() {
        assert_eq!(
            status_for(EventError::validation("title", "cannot be empty")),
            StatusCode::BAD_REQUEST
        );
    }
}
