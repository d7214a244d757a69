//! HTTP adapter for donation endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::donation_routes;
