//! Domain layer - Business logic with no infrastructure dependencies.
//!
//! Everything here is pure: aggregates, value objects, and the rules that
//! govern them. Persistence and transport live in the adapters.

pub mod donation;
pub mod event;
pub mod foundation;
pub mod membership;
pub mod user;
