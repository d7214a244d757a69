//! M-Pesa Daraja implementation of the MobileMoneyGateway port.
//!
//! Two-leg flow: obtain an OAuth token with the consumer key/secret, then
//! post the STK push request. Settlement arrives asynchronously on the
//! callback endpoint; this client never waits for it.

use crate::ports::{GatewayError, MobileMoneyGateway, PushRequest, PushResponse};
use async_trait::async_trait;
use base64::Engine;
use chrono::Utc;

use super::types::{GatewayErrorBody, StkPushAck, StkPushBody, TokenResponse};

/// M-Pesa gateway configuration.
#[derive(Debug, Clone)]
pub struct MpesaConfig {
    /// API base URL (sandbox or production).
    pub base_url: String,

    /// OAuth consumer key.
    pub consumer_key: String,

    /// OAuth consumer secret.
    pub consumer_secret: String,

    /// Paybill/till number payments land on.
    pub short_code: String,

    /// Passkey used to derive the push password.
    pub passkey: String,

    /// Public URL the gateway posts settlement callbacks to.
    pub callback_url: String,
}

/// M-Pesa Daraja STK push client.
pub struct MpesaGateway {
    config: MpesaConfig,
    http_client: reqwest::Client,
}

impl MpesaGateway {
    /// Creates a new gateway client with the given configuration.
    pub fn new(config: MpesaConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Push password: base64(shortcode + passkey + timestamp).
    fn password(&self, timestamp: &str) -> String {
        base64::engine::general_purpose::STANDARD.encode(format!(
            "{}{}{}",
            self.config.short_code, self.config.passkey, timestamp
        ))
    }
}

#[async_trait]
impl MobileMoneyGateway for MpesaGateway {
    async fn access_token(&self) -> Result<String, GatewayError> {
        let credentials = base64::engine::general_purpose::STANDARD.encode(format!(
            "{}:{}",
            self.config.consumer_key, self.config.consumer_secret
        ));

        let response = self
            .http_client
            .get(format!(
                "{}/oauth/v1/generate?grant_type=client_credentials",
                self.config.base_url
            ))
            .header("Authorization", format!("Basic {}", credentials))
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Auth(format!(
                "token request returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        Ok(token.access_token)
    }

    async fn initiate_push(&self, request: PushRequest) -> Result<PushResponse, GatewayError> {
        let token = self.access_token().await?;
        let timestamp = Utc::now().format("%Y%m%d%H%M%S").to_string();

        let body = StkPushBody {
            business_short_code: self.config.short_code.clone(),
            password: self.password(&timestamp),
            timestamp,
            transaction_type: "CustomerPayBillOnline".to_string(),
            amount: request.amount.units(),
            party_a: request.phone.clone(),
            party_b: self.config.short_code.clone(),
            phone_number: request.phone,
            callback_url: self.config.callback_url.clone(),
            account_reference: request.account_reference,
            transaction_desc: request.description,
        };

        let response = self
            .http_client
            .post(format!(
                "{}/mpesa/stkpush/v1/processrequest",
                self.config.base_url
            ))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let error: GatewayErrorBody = response
                .json()
                .await
                .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
            return Err(GatewayError::Rejected {
                code: error.error_code,
                message: error.error_message,
            });
        }

        let ack: StkPushAck = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        if ack.response_code != "0" {
            return Err(GatewayError::Rejected {
                code: ack.response_code,
                message: ack.customer_message,
            });
        }

        tracing::info!(
            checkout_request_id = %ack.checkout_request_id,
            merchant_request_id = %ack.merchant_request_id,
            "STK push accepted by gateway"
        );

        Ok(PushResponse {
            checkout_request_id: ack.checkout_request_id,
            merchant_request_id: ack.merchant_request_id,
            response_code: ack.response_code,
            customer_message: ack.customer_message,
        })
    }
}
