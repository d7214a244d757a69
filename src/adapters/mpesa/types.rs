//! Wire types for the M-Pesa Daraja API.
//!
//! Field names follow the gateway's PascalCase JSON exactly; everything
//! here is private plumbing for the client and the callback handler.

use serde::{Deserialize, Serialize};

/// Response from the OAuth token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[allow(dead_code)]
    pub expires_in: String,
}

/// Body sent to the STK push endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StkPushBody {
    pub business_short_code: String,
    pub password: String,
    pub timestamp: String,
    pub transaction_type: String,
    pub amount: i64,
    pub party_a: String,
    pub party_b: String,
    pub phone_number: String,
    #[serde(rename = "CallBackURL")]
    pub callback_url: String,
    pub account_reference: String,
    pub transaction_desc: String,
}

/// Acknowledgement from the STK push endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StkPushAck {
    #[serde(rename = "CheckoutRequestID")]
    pub checkout_request_id: String,
    #[serde(rename = "MerchantRequestID")]
    pub merchant_request_id: String,
    pub response_code: String,
    #[serde(default)]
    pub customer_message: String,
}

/// Error body the gateway returns on rejected requests.
#[derive(Debug, Deserialize)]
pub struct GatewayErrorBody {
    #[serde(rename = "errorCode", default)]
    pub error_code: String,
    #[serde(rename = "errorMessage", default)]
    pub error_message: String,
}

/// Settlement callback posted to our callback endpoint.
///
/// Structure: `{"Body": {"stkCallback": {...}}}`. A `ResultCode` of 0
/// means the payer completed the prompt.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallbackEnvelope {
    #[serde(rename = "Body")]
    pub body: CallbackBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallbackBody {
    #[serde(rename = "stkCallback")]
    pub stk_callback: StkCallback,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StkCallback {
    #[serde(rename = "CheckoutRequestID")]
    pub checkout_request_id: String,
    #[serde(rename = "MerchantRequestID")]
    pub merchant_request_id: String,
    pub result_code: i64,
    pub result_desc: String,
}

impl StkCallback {
    pub fn is_success(&self) -> bool {
        self.result_code == 0
    }
}
