//! Event-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | Full | 409 |
//! | Closed | 409 |
//! | AlreadyRegistered | 409 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, EventId};

/// Event-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// Event was not found.
    NotFound(EventId),

    /// Event has reached its registration capacity.
    Full(EventId),

    /// Event has already started; registration is closed.
    Closed(EventId),

    /// User is already registered for this event.
    AlreadyRegistered(EventId),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl EventError {
    pub fn not_found(id: EventId) -> Self {
        EventError::NotFound(id)
    }

    pub fn full(id: EventId) -> Self {
        EventError::Full(id)
    }

    pub fn closed(id: EventId) -> Self {
        EventError::Closed(id)
    }

    pub fn already_registered(id: EventId) -> Self {
        EventError::AlreadyRegistered(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EventError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        EventError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EventError::NotFound(_) => ErrorCode::EventNotFound,
            EventError::Full(_) => ErrorCode::EventFull,
            EventError::Closed(_) => ErrorCode::EventClosed,
            EventError::AlreadyRegistered(_) => ErrorCode::AlreadyRegistered,
            EventError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            EventError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            EventError::NotFound(id) => format!("Event not found: {}", id),
            EventError::Full(id) => format!("Event {} is at capacity", id),
            EventError::Closed(id) => format!("Event {} has already started", id),
            EventError::AlreadyRegistered(id) => {
                format!("Already registered for event {}", id)
            }
            EventError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            EventError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for EventError {}

impl From<EventError> for DomainError {
    fn from(err: EventError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
