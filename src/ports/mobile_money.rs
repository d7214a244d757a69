//! Mobile money gateway port.
//!
//! Contract for initiating STK push payment prompts on a donor's or
//! member's phone. The gateway settles asynchronously through the
//! callback endpoint; this port only covers the outbound leg.

use crate::domain::foundation::Money;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the mobile money gateway.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("Gateway authentication failed: {0}")]
    Auth(String),

    #[error("Gateway request failed: {0}")]
    Http(String),

    #[error("Gateway rejected the push: {code}: {message}")]
    Rejected { code: String, message: String },

    #[error("Unexpected gateway response: {0}")]
    InvalidResponse(String),
}

/// Request to prompt a phone for payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushRequest {
    /// Payer's phone number in international format (e.g. 2547XXXXXXXX).
    pub phone: String,

    /// Amount to collect, whole currency units.
    pub amount: Money,

    /// Short reference shown on the payer's statement.
    pub account_reference: String,

    /// Human-readable line shown in the payment prompt.
    pub description: String,
}

/// Gateway acknowledgement of an accepted push.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushResponse {
    /// Reference the settlement callback will carry. Stored as the
    /// payment's transaction reference.
    pub checkout_request_id: String,

    /// Gateway-side correlation ID.
    pub merchant_request_id: String,

    /// "0" when the push was accepted for processing.
    pub response_code: String,

    /// Message suitable for showing to the payer.
    pub customer_message: String,
}

/// Port for mobile money STK push integrations.
#[async_trait]
pub trait MobileMoneyGateway: Send + Sync {
    /// Obtain an OAuth access token for the gateway API.
    ///
    /// Implementations may cache tokens internally.
    async fn access_token(&self) -> Result<String, GatewayError>;

    /// Ask the gateway to prompt the phone for payment.
    ///
    /// A successful return means the prompt was accepted, not that money
    /// moved; settlement arrives on the callback endpoint.
    async fn initiate_push(&self, request: PushRequest) -> Result<PushResponse, GatewayError>;
}
