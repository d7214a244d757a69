//! HTTP adapter for gateway payment callbacks.

pub mod handlers;
pub mod routes;

pub use routes::payment_routes;
