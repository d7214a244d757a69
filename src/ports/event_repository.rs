//! Event repository port.
//!
//! # Design
//!
//! - **Atomic registration**: `add_registration` must re-check capacity
//!   at the database so two concurrent registrations cannot oversell the
//!   last spot
//! - **Unique registration**: One registration per user per event

use crate::domain::event::{Event, EventError, EventRegistration};
use crate::domain::foundation::EventId;
use async_trait::async_trait;

/// Repository port for Event persistence.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Save a new event.
    async fn save(&self, event: &Event) -> Result<(), EventError>;

    /// Find an event by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventError>;

    /// List events that have not yet started, soonest first.
    async fn list_upcoming(&self) -> Result<Vec<Event>, EventError>;

    /// Register a user for an event, atomically enforcing capacity.
    ///
    /// # Errors
    ///
    /// - `Full` if the last spot was taken concurrently
    /// - `AlreadyRegistered` if the user is already on the list
    /// - `NotFound` if the event doesn't exist
    async fn add_registration(
        &self,
        registration: &EventRegistration,
    ) -> Result<(), EventError>;
}
