//! CreateDonationHandler - Accepts donations, pushing mobile money prompts when needed.

use std::sync::Arc;

use crate::domain::donation::{Donation, DonationError};
use crate::domain::foundation::{Money, Timestamp, UserId};
use crate::domain::membership::PaymentMethod;
use crate::ports::{DonationRepository, MobileMoneyGateway, PushRequest};

/// Command to record a donation.
#[derive(Debug, Clone)]
pub struct CreateDonationCommand {
    pub donor_name: Option<String>,
    /// Set when a signed-in user donates.
    pub donor_user_id: Option<UserId>,
    pub amount: Money,
    pub currency: String,
    pub method: PaymentMethod,
    /// Required for mobile money donations.
    pub phone: Option<String>,
    pub message: Option<String>,
}

/// Result of an accepted donation.
#[derive(Debug, Clone)]
pub struct CreateDonationResult {
    pub donation: Donation,
    /// Present when a phone prompt was pushed.
    pub customer_message: Option<String>,
}

/// Handler for creating donations.
///
/// Cash and bank donations settle on entry. Mobile money donations are
/// saved pending first, then prompted; if the push is rejected the row
/// is marked failed rather than dropped, so the attempt stays auditable.
pub struct CreateDonationHandler {
    repository: Arc<dyn DonationRepository>,
    gateway: Arc<dyn MobileMoneyGateway>,
}

impl CreateDonationHandler {
    pub fn new(
        repository: Arc<dyn DonationRepository>,
        gateway: Arc<dyn MobileMoneyGateway>,
    ) -> Self {
        Self {
            repository,
            gateway,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateDonationCommand,
    ) -> Result<CreateDonationResult, DonationError> {
        let now = Timestamp::now();
        let mut donation = Donation::create(
            cmd.donor_name,
            cmd.donor_user_id,
            cmd.amount,
            cmd.currency,
            cmd.method,
            cmd.message,
            now,
        )?;

        if cmd.method != PaymentMethod::MobileMoney {
            self.repository.save(&donation).await?;
            tracing::info!(donation_id = %donation.id, amount = %donation.amount, "Donation recorded");
            return Ok(CreateDonationResult {
                donation,
                customer_message: None,
            });
        }

        let phone = cmd
            .phone
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                DonationError::validation("phone", "required for mobile money donations")
            })?;

        match self
            .gateway
            .initiate_push(PushRequest {
                phone,
                amount: donation.amount,
                account_reference: "DONATION".to_string(),
                description: "Donation".to_string(),
            })
            .await
        {
            Ok(ack) => {
                donation.attach_transaction_ref(ack.checkout_request_id);
                self.repository.save(&donation).await?;
                tracing::info!(
                    donation_id = %donation.id,
                    transaction_ref = ?donation.transaction_ref,
                    "Donation push initiated"
                );
                Ok(CreateDonationResult {
                    donation,
                    customer_message: Some(ack.customer_message),
                })
            }
            Err(e) => {
                // Keep the failed attempt on record
                donation.confirm(false, now)?;
                self.repository.save(&donation).await?;
                Err(DonationError::gateway(e.to_string()))
            }
        }
    }
}
