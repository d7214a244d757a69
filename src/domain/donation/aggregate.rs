//! Donation aggregate entity.
//!
//! One-off gifts to the organization, from members or anonymous donors.
//! Mobile money donations start Pending and settle through the same
//! gateway callback flow as membership dues.

use crate::domain::foundation::{DonationId, Money, Timestamp, UserId};
use crate::domain::membership::{PaymentMethod, PaymentRecordStatus};
use serde::{Deserialize, Serialize};

use super::DonationError;

/// A one-off donation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: DonationId,
    /// Display name; "Anonymous" when the donor withholds it.
    pub donor_name: String,
    /// Linked account when the donor is a registered user.
    pub donor_user_id: Option<UserId>,
    pub amount: Money,
    pub currency: String,
    pub method: PaymentMethod,
    pub status: PaymentRecordStatus,
    /// Gateway transaction reference. Unique across all donations.
    pub transaction_ref: Option<String>,
    pub message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Donation {
    /// Records a new donation.
    ///
    /// Cash and bank donations settle immediately; mobile money starts
    /// Pending until the gateway confirms.
    pub fn create(
        donor_name: Option<String>,
        donor_user_id: Option<UserId>,
        amount: Money,
        currency: impl Into<String>,
        method: PaymentMethod,
        message: Option<String>,
        now: Timestamp,
    ) -> Result<Self, DonationError> {
        if amount <= Money::ZERO {
            return Err(DonationError::validation(
                "amount",
                "must be greater than zero",
            ));
        }

        let status = match method {
            PaymentMethod::MobileMoney => PaymentRecordStatus::Pending,
            PaymentMethod::BankTransfer | PaymentMethod::Cash => PaymentRecordStatus::Completed,
        };

        Ok(Self {
            id: DonationId::new(),
            donor_name: donor_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "Anonymous".to_string()),
            donor_user_id,
            amount,
            currency: currency.into(),
            method,
            status,
            transaction_ref: None,
            message,
            created_at: now,
            updated_at: now,
        })
    }

    /// Attaches the gateway transaction reference after push initiation.
    pub fn attach_transaction_ref(&mut self, transaction_ref: impl Into<String>) {
        self.transaction_ref = Some(transaction_ref.into());
    }

    /// Settles or fails a pending donation.
    ///
    /// Idempotent: returns `Ok(false)` when the donation is no longer
    /// pending.
    pub fn confirm(&mut self, success: bool, now: Timestamp) -> Result<bool, DonationError> {
        if self.status != PaymentRecordStatus::Pending {
            return Ok(false);
        }
        self.status = if success {
            PaymentRecordStatus::Completed
        } else {
            PaymentRecordStatus::Failed
        };
        self.updated_at = now;
        Ok(true)
    }

    pub fn is_completed(&self) -> bool {
        self.status == PaymentRecordStatus::Completed
    }
}
