//! Shared error body for all HTTP endpoints.

use serde::Serialize;

/// Standard error response returned by every endpoint.
///
/// ```json
/// {
///   "error_code": "MEMBERSHIP_NOT_FOUND",
///   "message": "No membership exists for this user",
///   "details": null
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_null_details() {
        let body = serde_json::to_value(ErrorResponse::new("NOT_FOUND", "gone")).unwrap();
        assert_eq!(body["error_code"], "NOT_FOUND");
        assert!(body.get("details").is_none());
    }

    #[test]
    fn carries_details_when_present() {
        let body = ErrorResponse::new("VALIDATION_FAILED", "bad field")
            .with_details(serde_json::json!({"field": "phone"}));
        let json = serde_json::to_value(body).unwrap();
        assert_eq!(json["details"]["field"], "phone");
    }
}
