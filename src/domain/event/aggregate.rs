//! Event aggregate entity.
//!
//! Organization events members can register for. Capacity is optional;
//! when set, the registered count can never exceed it. The registration
//! count here is a cached view; the registrations table is authoritative
//! and the capacity check is repeated atomically at the database.

use crate::domain::foundation::{EventId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use super::EventError;

/// An organization event open for member registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub starts_at: Timestamp,
    pub location: String,
    /// None means unlimited.
    pub capacity: Option<u32>,
    pub registered_count: u32,
    pub created_by: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Event {
    /// Creates a new event scheduled in the future.
    pub fn create(
        title: impl Into<String>,
        description: impl Into<String>,
        starts_at: Timestamp,
        location: impl Into<String>,
        capacity: Option<u32>,
        created_by: UserId,
        now: Timestamp,
    ) -> Result<Self, EventError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(EventError::validation("title", "cannot be empty"));
        }
        if !starts_at.is_after(&now) {
            return Err(EventError::validation(
                "starts_at",
                "must be in the future",
            ));
        }
        if capacity == Some(0) {
            return Err(EventError::validation(
                "capacity",
                "must be at least 1 when set",
            ));
        }

        Ok(Self {
            id: EventId::new(),
            title,
            description: description.into(),
            starts_at,
            location: location.into(),
            capacity,
            registered_count: 0,
            created_by,
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns true while registration is open: the event has not started
    /// and capacity (if any) is not exhausted.
    pub fn accepts_registrations(&self, now: Timestamp) -> bool {
        !now.is_after(&self.starts_at) && !self.is_full()
    }

    pub fn is_full(&self) -> bool {
        matches!(self.capacity, Some(cap) if self.registered_count >= cap)
    }

    /// Validates a registration attempt against this snapshot.
    pub fn check_registration(&self, now: Timestamp) -> Result<(), EventError> {
        if now.is_after(&self.starts_at) {
            return Err(EventError::closed(self.id));
        }
        if self.is_full() {
            return Err(EventError::full(self.id));
        }
        Ok(())
    }

    pub fn spots_remaining(&self) -> Option<u32> {
        self.capacity
            .map(|cap| cap.saturating_sub(self.registered_count))
    }
}

/// One member's registration for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRegistration {
    pub event_id: EventId,
    pub user_id: UserId,
    pub registered_at: Timestamp,
}
