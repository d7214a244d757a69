//! ListEventsHandler - Upcoming events, soonest first.

use std::sync::Arc;

use crate::domain::event::{Event, EventError};
use crate::ports::EventRepository;

/// Handler returning upcoming events with their registration counts.
pub struct ListEventsHandler {
    repository: Arc<dyn EventRepository>,
}

impl ListEventsHandler {
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<Vec<Event>, EventError> {
        self.repository.list_upcoming().await
    }
}
