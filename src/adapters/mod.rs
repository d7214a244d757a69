//! Adapters layer - Concrete implementations of the ports.

pub mod http;
pub mod mpesa;
pub mod postgres;
