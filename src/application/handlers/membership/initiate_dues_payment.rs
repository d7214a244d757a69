//! InitiateDuesPaymentHandler - Pushes a dues payment prompt to the member's phone.

use std::sync::Arc;

use crate::domain::foundation::{Money, Timestamp, UserId};
use crate::domain::membership::{
    MembershipError, MembershipStatus, PaymentMethod, PaymentRecordStatus,
};
use crate::ports::{MembershipRepository, MobileMoneyGateway, PushRequest};

/// Command to start a mobile money dues payment.
#[derive(Debug, Clone)]
pub struct InitiateDuesPaymentCommand {
    pub user_id: UserId,
    /// Overrides the installment amount, e.g. to clear arrears in one go.
    pub amount: Option<Money>,
}

/// Result of an accepted push. Settlement arrives later on the callback
/// endpoint.
#[derive(Debug, Clone)]
pub struct InitiateDuesPaymentResult {
    pub transaction_ref: String,
    pub amount: Money,
    pub customer_message: String,
}

/// Handler for initiating dues payments over mobile money.
///
/// Records a pending ledger entry keyed by the gateway's checkout
/// request ID; the settlement callback completes or fails it.
pub struct InitiateDuesPaymentHandler {
    repository: Arc<dyn MembershipRepository>,
    gateway: Arc<dyn MobileMoneyGateway>,
}

impl InitiateDuesPaymentHandler {
    pub fn new(
        repository: Arc<dyn MembershipRepository>,
        gateway: Arc<dyn MobileMoneyGateway>,
    ) -> Self {
        Self {
            repository,
            gateway,
        }
    }

    pub async fn handle(
        &self,
        cmd: InitiateDuesPaymentCommand,
    ) -> Result<InitiateDuesPaymentResult, MembershipError> {
        // 1. The caller must hold a membership that can still take money
        let mut membership = self
            .repository
            .find_by_user_id(&cmd.user_id)
            .await?
            .ok_or_else(|| MembershipError::not_found_for_user(cmd.user_id))?;
        if membership.status == MembershipStatus::Cancelled {
            return Err(MembershipError::invalid_state(
                membership.status.as_str(),
                "pay dues",
            ));
        }

        let amount = cmd.amount.unwrap_or_else(|| membership.fees.installment());
        if amount <= Money::ZERO {
            return Err(MembershipError::validation(
                "amount",
                "must be greater than zero",
            ));
        }

        // 2. Prompt the phone
        let reference = membership
            .membership_number
            .as_ref()
            .map(|n| n.as_str().to_string())
            .unwrap_or_else(|| membership.id.to_string());
        let ack = self
            .gateway
            .initiate_push(PushRequest {
                phone: membership.applicant.phone.clone(),
                amount,
                account_reference: reference,
                description: "Membership dues".to_string(),
            })
            .await
            .map_err(|e| MembershipError::gateway(e.to_string()))?;

        // 3. Open a pending ledger entry under the checkout reference
        let now = Timestamp::now();
        let record = membership
            .record_payment(
                amount,
                PaymentMethod::MobileMoney,
                Some(ack.checkout_request_id.clone()),
                PaymentRecordStatus::Pending,
                now,
            )?
            .clone();
        self.repository
            .record_payment(&membership.id, &record, None)
            .await?;

        tracing::info!(
            membership_id = %membership.id,
            transaction_ref = %ack.checkout_request_id,
            amount = %amount,
            "Dues payment initiated"
        );
        Ok(InitiateDuesPaymentResult {
            transaction_ref: ack.checkout_request_id,
            amount,
            customer_message: ack.customer_message,
        })
    }
}
