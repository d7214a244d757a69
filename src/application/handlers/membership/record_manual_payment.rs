//! RecordManualPaymentHandler - Admin-entered dues payments (cash, bank).

use std::sync::Arc;

use crate::domain::foundation::{MembershipId, Money, Timestamp};
use crate::domain::membership::{
    Membership, MembershipError, PaymentMethod, PaymentRecordStatus,
};
use crate::ports::{MembershipRepository, ProgressAdvance};

/// Command to record a dues payment received outside the gateway.
#[derive(Debug, Clone)]
pub struct RecordManualPaymentCommand {
    pub membership_id: MembershipId,
    pub amount: Money,
    pub method: PaymentMethod,
    /// Bank slip or receipt number, if one exists.
    pub reference: Option<String>,
}

/// Result of a recorded payment.
#[derive(Debug, Clone)]
pub struct RecordManualPaymentResult {
    pub membership: Membership,
}

/// Handler for manual payment entry.
///
/// The payment lands completed: cash and bank transfers are settled by
/// the time an admin keys them in. Ledger append and summary advance
/// happen in one repository transaction.
pub struct RecordManualPaymentHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl RecordManualPaymentHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: RecordManualPaymentCommand,
    ) -> Result<RecordManualPaymentResult, MembershipError> {
        let mut membership = self
            .repository
            .find_by_id(&cmd.membership_id)
            .await?
            .ok_or_else(|| MembershipError::not_found(cmd.membership_id))?;

        let now = Timestamp::now();
        let record = membership
            .record_payment(
                cmd.amount,
                cmd.method,
                cmd.reference,
                PaymentRecordStatus::Completed,
                now,
            )?
            .clone();

        let advance = ProgressAdvance {
            amount: cmd.amount,
            last_payment_date: now,
            next_payment_date: now.add_days(membership.plan().period_days()),
        };
        self.repository
            .record_payment(&membership.id, &record, Some(&advance))
            .await?;

        tracing::info!(
            membership_id = %membership.id,
            amount = %cmd.amount,
            method = %cmd.method,
            "Manual payment recorded"
        );
        Ok(RecordManualPaymentResult { membership })
    }
}
