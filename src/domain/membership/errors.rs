//! Membership-specific error types.
//!
//! Errors related to membership lifecycle operations and dues collection.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | NotFoundForUser | 404 |
//! | AlreadyExists | 409 |
//! | NumberAssigned | 409 |
//! | DuplicateTransaction | 409 |
//! | InvalidState | 409 |
//! | PaymentFailed | 402 |
//! | Gateway | 502 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{
    DomainError, ErrorCode, MembershipId, UserId, ValidationError,
};

/// Membership-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// Membership was not found.
    NotFound(MembershipId),

    /// No membership exists for this user.
    NotFoundForUser(UserId),

    /// User already has a membership on file.
    AlreadyExists(UserId),

    /// Membership number was already assigned at approval.
    NumberAssigned(MembershipId),

    /// A payment with this transaction reference already exists.
    DuplicateTransaction(String),

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Payment processing failed.
    PaymentFailed { reason: String },

    /// The mobile money gateway rejected or failed the request.
    Gateway(String),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl MembershipError {
    // Constructor functions for cleaner error creation

    pub fn not_found(id: MembershipId) -> Self {
        MembershipError::NotFound(id)
    }

    pub fn not_found_for_user(user_id: UserId) -> Self {
        MembershipError::NotFoundForUser(user_id)
    }

    pub fn already_exists(user_id: UserId) -> Self {
        MembershipError::AlreadyExists(user_id)
    }

    pub fn number_assigned(id: MembershipId) -> Self {
        MembershipError::NumberAssigned(id)
    }

    pub fn duplicate_transaction(transaction_ref: impl Into<String>) -> Self {
        MembershipError::DuplicateTransaction(transaction_ref.into())
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        MembershipError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn payment_failed(reason: impl Into<String>) -> Self {
        MembershipError::PaymentFailed {
            reason: reason.into(),
        }
    }

    pub fn gateway(message: impl Into<String>) -> Self {
        MembershipError::Gateway(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::NotFound(_) | MembershipError::NotFoundForUser(_) => {
                ErrorCode::MembershipNotFound
            }
            MembershipError::AlreadyExists(_) => ErrorCode::MembershipExists,
            MembershipError::NumberAssigned(_) => ErrorCode::MembershipNumberAssigned,
            MembershipError::DuplicateTransaction(_) => ErrorCode::DuplicateTransaction,
            MembershipError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            MembershipError::PaymentFailed { .. } => ErrorCode::PaymentFailed,
            MembershipError::Gateway(_) => ErrorCode::GatewayError,
            MembershipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MembershipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            MembershipError::NotFound(id) => format!("Membership not found: {}", id),
            MembershipError::NotFoundForUser(user_id) => {
                format!("No membership found for user: {}", user_id)
            }
            MembershipError::AlreadyExists(user_id) => {
                format!("User {} already has a membership", user_id)
            }
            MembershipError::NumberAssigned(id) => {
                format!("Membership {} already has a membership number", id)
            }
            MembershipError::DuplicateTransaction(transaction_ref) => {
                format!("Transaction '{}' was already recorded", transaction_ref)
            }
            MembershipError::InvalidState { current, attempted } => {
                format!("Cannot {} membership in {} state", attempted, current)
            }
            MembershipError::PaymentFailed { reason } => format!("Payment failed: {}", reason),
            MembershipError::Gateway(msg) => format!("Payment gateway error: {}", msg),
            MembershipError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MembershipError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MembershipError::Infrastructure(_) | MembershipError::Gateway(_)
        )
    }
}

impl std::fmt::Display for MembershipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MembershipError {}

impl From<ValidationError> for MembershipError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyField { field } => {
                MembershipError::validation(field, "cannot be empty")
            }
            ValidationError::OutOfRange {
                field,
                min,
                max,
                actual,
            } => MembershipError::validation(
                field,
                format!("must be between {} and {}, got {}", min, max, actual),
            ),
            ValidationError::InvalidFormat { field, reason } => {
                MembershipError::validation(field, reason)
            }
        }
    }
}

impl From<MembershipError> for DomainError {
    fn from(err: MembershipError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_membership_id() -> MembershipId {
        MembershipId::new()
    }

    // ============================================================
    // Constructor Tests
    // ============================================================

    #[test]
    fn not_found_creates_correctly() {
        let id = test_membership_id();
        let err = MembershipError::not_found(id);
        assert!(matches!(err, MembershipError::NotFound(i) if i == id));
        assert_eq!(err.code(), ErrorCode::MembershipNotFound);
    }

    #[test]
    fn already_exists_creates_correctly() {
        let user_id = UserId::new();
        let err = MembershipError::already_exists(user_id);
        assert!(matches!(err, MembershipError::AlreadyExists(u) if u == user_id));
        assert_eq!(err.code(), ErrorCode::MembershipExists);
    }

    #[test]
    fn duplicate_transaction_creates_correctly() {
        let err = MembershipError::duplicate_transaction("WS_CO_123");
        assert!(matches!(
            err,
            MembershipError::DuplicateTransaction(ref t) if t == "WS_CO_123"
        ));
        assert_eq!(err.code(), ErrorCode::DuplicateTransaction);
    }

    #[test]
    fn invalid_state_creates_correctly() {
        let err = MembershipError::invalid_state("pending", "suspend");
        assert!(matches!(
            err,
            MembershipError::InvalidState { ref current, ref attempted }
            if current == "pending" && attempted == "suspend"
        ));
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn number_assigned_creates_correctly() {
        let id = test_membership_id();
        let err = MembershipError::number_assigned(id);
        assert_eq!(err.code(), ErrorCode::MembershipNumberAssigned);
    }

    // ============================================================
    // Message Tests
    // ============================================================

    #[test]
    fn not_found_message_includes_id() {
        let id = test_membership_id();
        let err = MembershipError::not_found(id);
        assert!(err.message().contains(&id.to_string()));
    }

    #[test]
    fn invalid_state_message_names_both_sides() {
        let err = MembershipError::invalid_state("cancelled", "renew");
        let msg = err.message();
        assert!(msg.contains("cancelled"));
        assert!(msg.contains("renew"));
    }

    // ============================================================
    // Retryable Tests
    // ============================================================

    #[test]
    fn infrastructure_errors_are_retryable() {
        assert!(MembershipError::infrastructure("timeout").is_retryable());
    }

    #[test]
    fn gateway_errors_are_retryable() {
        assert!(MembershipError::gateway("upstream 503").is_retryable());
    }

    #[test]
    fn state_errors_are_not_retryable() {
        assert!(!MembershipError::invalid_state("expired", "suspend").is_retryable());
    }

    // ============================================================
    // Conversion Tests
    // ============================================================

    #[test]
    fn display_matches_message() {
        let err = MembershipError::payment_failed("insufficient funds");
        assert_eq!(format!("{}", err), err.message());
    }

    #[test]
    fn converts_to_domain_error() {
        let err = MembershipError::not_found(test_membership_id());
        let domain_err: DomainError = err.clone().into();
        assert_eq!(domain_err.code, err.code());
    }

    #[test]
    fn converts_from_validation_error() {
        let err: MembershipError = ValidationError::empty_field("phone").into();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }
}
