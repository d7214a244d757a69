//! CreateEventHandler - Admin creation of organization events.

use std::sync::Arc;

use crate::domain::event::{Event, EventError};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::EventRepository;

/// Command to create an event.
#[derive(Debug, Clone)]
pub struct CreateEventCommand {
    pub title: String,
    pub description: String,
    pub starts_at: Timestamp,
    pub location: String,
    pub capacity: Option<u32>,
    pub created_by: UserId,
}

/// Result of a created event.
#[derive(Debug, Clone)]
pub struct CreateEventResult {
    pub event: Event,
}

/// Handler for creating events.
pub struct CreateEventHandler {
    repository: Arc<dyn EventRepository>,
}

impl CreateEventHandler {
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateEventCommand,
    ) -> Result<CreateEventResult, EventError> {
        let event = Event::create(
            cmd.title,
            cmd.description,
            cmd.starts_at,
            cmd.location,
            cmd.capacity,
            cmd.created_by,
            Timestamp::now(),
        )?;
        self.repository.save(&event).await?;

        tracing::info!(event_id = %event.id, title = %event.title, "Event created");
        Ok(CreateEventResult { event })
    }
}
