//! Umoja Hub - membership organization backend.
//!
//! REST backend for a membership organization: user accounts, events
//! with capacity-limited registration, donations, and paid membership
//! subscriptions billed over M-Pesa.
//!
//! # Architecture
//!
//! Hexagonal, in four layers:
//!
//! - [`domain`] - aggregates, value objects and invariants. No IO.
//! - [`ports`] - trait contracts between the domain and the world.
//! - [`application`] - one command handler per operation.
//! - [`adapters`] - PostgreSQL repositories, the M-Pesa client and the
//!   axum HTTP surface.
//!
//! [`config`] loads everything from `UMOJA__`-prefixed environment
//! variables.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
