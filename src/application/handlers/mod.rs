//! Command and query handlers, one per operation.
//!
//! Handlers wire domain aggregates to ports. Each takes its
//! dependencies as `Arc<dyn Port>` so the HTTP layer and tests can
//! inject real adapters or in-memory fakes interchangeably.

pub mod donation;
pub mod event;
pub mod membership;
pub mod payments;
pub mod user;

#[cfg(test)]
pub mod testing;

pub use donation::*;
pub use event::*;
pub use membership::*;
pub use payments::*;
pub use user::*;
