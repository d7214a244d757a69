//! M-Pesa adapter - STK push client and gateway wire types.

mod client;
mod types;

pub use client::{MpesaConfig, MpesaGateway};
pub use types::{CallbackEnvelope, StkCallback};
