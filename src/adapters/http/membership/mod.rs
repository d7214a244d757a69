//! HTTP adapter for membership endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::membership_routes;
