//! ProcessGatewayCallbackHandler - Settles mobile money pushes when the gateway reports back.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::membership::MembershipError;
use crate::ports::{
    ConfirmOutcome, DonationConfirmOutcome, DonationRepository, MembershipRepository,
};

/// Gateway settlement report for one checkout.
#[derive(Debug, Clone)]
pub struct ProcessGatewayCallbackCommand {
    pub transaction_ref: String,
    pub success: bool,
    pub result_description: String,
}

/// What the callback resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackResolution {
    MembershipPayment,
    Donation,
    AlreadyProcessed,
    Unmatched,
}

/// Handler for gateway settlement callbacks.
///
/// A checkout reference belongs to either a dues payment or a donation;
/// the membership ledger is checked first. Replayed callbacks resolve to
/// `AlreadyProcessed` and change nothing. References we never issued
/// resolve to `Unmatched`; the HTTP layer still acknowledges the
/// gateway so it stops retrying.
pub struct ProcessGatewayCallbackHandler {
    memberships: Arc<dyn MembershipRepository>,
    donations: Arc<dyn DonationRepository>,
}

impl ProcessGatewayCallbackHandler {
    pub fn new(
        memberships: Arc<dyn MembershipRepository>,
        donations: Arc<dyn DonationRepository>,
    ) -> Self {
        Self {
            memberships,
            donations,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessGatewayCallbackCommand,
    ) -> Result<CallbackResolution, MembershipError> {
        let now = Timestamp::now();

        match self
            .memberships
            .confirm_payment(&cmd.transaction_ref, cmd.success, now)
            .await?
        {
            ConfirmOutcome::Applied {
                membership_id,
                amount,
            } => {
                tracing::info!(
                    membership_id = %membership_id,
                    transaction_ref = %cmd.transaction_ref,
                    amount = %amount,
                    success = cmd.success,
                    "Dues payment settled"
                );
                return Ok(CallbackResolution::MembershipPayment);
            }
            ConfirmOutcome::AlreadyProcessed => {
                tracing::info!(
                    transaction_ref = %cmd.transaction_ref,
                    "Replayed callback ignored"
                );
                return Ok(CallbackResolution::AlreadyProcessed);
            }
            ConfirmOutcome::NotFound => {}
        }

        match self
            .donations
            .confirm(&cmd.transaction_ref, cmd.success, now)
            .await
            .map_err(|e| MembershipError::infrastructure(e.to_string()))?
        {
            DonationConfirmOutcome::Applied { donation_id } => {
                tracing::info!(
                    donation_id = %donation_id,
                    transaction_ref = %cmd.transaction_ref,
                    success = cmd.success,
                    "Donation settled"
                );
                Ok(CallbackResolution::Donation)
            }
            DonationConfirmOutcome::AlreadyProcessed => {
                Ok(CallbackResolution::AlreadyProcessed)
            }
            DonationConfirmOutcome::NotFound => {
                tracing::warn!(
                    transaction_ref = %cmd.transaction_ref,
                    result = %cmd.result_description,
                    "Callback for unknown transaction reference"
                );
                Ok(CallbackResolution::Unmatched)
            }
        }
    }
}
