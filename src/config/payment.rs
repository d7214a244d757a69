//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Payment configuration (M-Pesa Daraja)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Daraja API base URL (sandbox or production)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OAuth consumer key
    pub consumer_key: String,

    /// OAuth consumer secret
    pub consumer_secret: String,

    /// Business shortcode (paybill or till number)
    pub short_code: String,

    /// STK push passkey
    pub passkey: String,

    /// Public URL the gateway posts settlement callbacks to
    pub callback_url: String,
}

impl PaymentConfig {
    /// Check if pointed at the Daraja sandbox
    pub fn is_sandbox(&self) -> bool {
        self.base_url.contains("sandbox")
    }

    /// Validate payment configuration
    ///
    /// The callback URL must always be HTTPS; the gateway refuses plain
    /// HTTP endpoints. The base URL may be HTTP only outside production.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.consumer_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT_CONSUMER_KEY"));
        }
        if self.consumer_secret.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT_CONSUMER_SECRET"));
        }
        if self.short_code.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT_SHORT_CODE"));
        }
        if self.passkey.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT_PASSKEY"));
        }
        if self.callback_url.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT_CALLBACK_URL"));
        }
        if !self.callback_url.starts_with("https://") {
            return Err(ValidationError::CallbackMustBeHttps);
        }
        if *environment == Environment::Production && !self.base_url.starts_with("https://") {
            return Err(ValidationError::GatewayMustBeHttps);
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://sandbox.safaricom.co.ke".to_string()
}
