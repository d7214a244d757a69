//! Event module - Organization events and member registration.

mod aggregate;
mod errors;

pub use aggregate::{Event, EventRegistration};
pub use errors::EventError;
