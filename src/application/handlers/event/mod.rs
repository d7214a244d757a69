//! Event command and query handlers.

mod create_event;
mod list_events;
mod register_for_event;

pub use create_event::{CreateEventCommand, CreateEventHandler, CreateEventResult};
pub use list_events::ListEventsHandler;
pub use register_for_event::{
    RegisterForEventCommand, RegisterForEventHandler, RegisterForEventResult,
};
