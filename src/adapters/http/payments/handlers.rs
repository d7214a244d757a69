//! Axum handler for the gateway settlement callback.
//!
//! The gateway retries callbacks it considers unacknowledged, so this
//! endpoint always answers 200 with a `ResultCode: 0` body once the
//! payload parses. Unknown references are logged and acknowledged.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::adapters::http::AppState;
use crate::adapters::mpesa::CallbackEnvelope;
use crate::application::handlers::{CallbackResolution, ProcessGatewayCallbackCommand};

/// POST /api/payments/callback
///
/// Unauthenticated; the gateway cannot send bearer tokens. The checkout
/// request id is the only linkage back to a pending payment.
pub async fn gateway_callback(
    State(state): State<AppState>,
    Json(envelope): Json<CallbackEnvelope>,
) -> impl IntoResponse {
    let callback = envelope.body.stk_callback;
    let command = ProcessGatewayCallbackCommand {
        transaction_ref: callback.checkout_request_id.clone(),
        success: callback.is_success(),
        result_description: callback.result_desc.clone(),
    };

    match state.process_gateway_callback_handler().handle(command).await {
        Ok(resolution) => {
            if resolution == CallbackResolution::Unmatched {
                tracing::warn!(
                    transaction_ref = %callback.checkout_request_id,
                    "Callback did not match any pending payment"
                );
            }
        }
        Err(e) => {
            // Acknowledge anyway; the ledger entry stays pending and can
            // be reconciled manually.
            tracing::error!(
                transaction_ref = %callback.checkout_request_id,
                error = %e.message(),
                "Failed to process gateway callback"
            );
        }
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "ResultCode": 0,
            "ResultDesc": "Accepted"
        })),
    )
}
