//! Donation-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | DuplicateTransaction | 409 |
//! | ValidationFailed | 400 |
//! | Gateway | 502 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, DonationId, ErrorCode};

/// Donation-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonationError {
    /// Donation was not found.
    NotFound(DonationId),

    /// A donation with this transaction reference already exists.
    DuplicateTransaction(String),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// The mobile money gateway rejected or failed the request.
    Gateway(String),

    /// Infrastructure error.
    Infrastructure(String),
}

impl DonationError {
    pub fn not_found(id: DonationId) -> Self {
        DonationError::NotFound(id)
    }

    pub fn duplicate_transaction(transaction_ref: impl Into<String>) -> Self {
        DonationError::DuplicateTransaction(transaction_ref.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DonationError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn gateway(message: impl Into<String>) -> Self {
        DonationError::Gateway(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        DonationError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DonationError::NotFound(_) => ErrorCode::DonationNotFound,
            DonationError::DuplicateTransaction(_) => ErrorCode::DuplicateTransaction,
            DonationError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            DonationError::Gateway(_) => ErrorCode::GatewayError,
            DonationError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            DonationError::NotFound(id) => format!("Donation not found: {}", id),
            DonationError::DuplicateTransaction(transaction_ref) => {
                format!("Transaction '{}' was already recorded", transaction_ref)
            }
            DonationError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            DonationError::Gateway(msg) => format!("Payment gateway error: {}", msg),
            DonationError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for DonationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for DonationError {}

impl From<DonationError> for DomainError {
    fn from(err: DonationError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
