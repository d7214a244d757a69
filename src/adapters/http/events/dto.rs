//! Request and response types for event endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::handlers::RegisterForEventResult;
use crate::domain::event::Event;
use crate::domain::foundation::Timestamp;

/// Request to create an event (admin).
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub location: String,
    /// Maximum number of registrations. Absent means unlimited.
    pub capacity: Option<u32>,
}

/// Full event representation.
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub starts_at: Timestamp,
    pub location: String,
    pub capacity: Option<u32>,
    pub registered_count: u32,
    pub spots_remaining: Option<u32>,
    pub created_at: Timestamp,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        let spots_remaining = event
            .capacity
            .map(|cap| cap.saturating_sub(event.registered_count));
        Self {
            id: event.id.to_string(),
            title: event.title,
            description: event.description,
            starts_at: event.starts_at,
            location: event.location,
            capacity: event.capacity,
            registered_count: event.registered_count,
            spots_remaining,
            created_at: event.created_at,
        }
    }
}

/// Acknowledgement of a successful registration.
#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub event_id: String,
    pub user_id: String,
    pub registered_at: Timestamp,
    pub spots_remaining: Option<u32>,
}

impl From<RegisterForEventResult> for RegistrationResponse {
    fn from(result: RegisterForEventResult) -> Self {
        Self {
            event_id: result.registration.event_id.to_string(),
            user_id: result.registration.user_id.to_string(),
            registered_at: result.registration.registered_at,
            spots_remaining: result.spots_remaining,
        }
    }
}
