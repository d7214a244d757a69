//! Request and response types for donation endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::CreateDonationResult;
use crate::domain::donation::Donation;
use crate::domain::foundation::Timestamp;
use crate::ports::DonationStats;

/// Request to record a donation.
#[derive(Debug, Deserialize)]
pub struct CreateDonationRequest {
    /// Absent or blank means anonymous.
    pub donor_name: Option<String>,
    /// Amount in whole currency units.
    pub amount: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// "mobile_money", "bank_transfer" or "cash".
    pub method: String,
    /// Required for mobile money donations.
    pub phone: Option<String>,
    pub message: Option<String>,
}

fn default_currency() -> String {
    "KES".to_string()
}

/// Full donation representation.
#[derive(Debug, Serialize)]
pub struct DonationResponse {
    pub id: String,
    pub donor_name: String,
    pub amount: i64,
    pub currency: String,
    pub method: String,
    pub status: String,
    pub transaction_ref: Option<String>,
    pub message: Option<String>,
    /// Prompt text from the gateway when an STK push was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_message: Option<String>,
    pub created_at: Timestamp,
}

impl DonationResponse {
    pub fn from_result(result: CreateDonationResult) -> Self {
        let mut response = Self::from(result.donation);
        response.customer_message = result.customer_message;
        response
    }
}

impl From<Donation> for DonationResponse {
    fn from(donation: Donation) -> Self {
        Self {
            id: donation.id.to_string(),
            donor_name: donation.donor_name,
            amount: donation.amount.units(),
            currency: donation.currency,
            method: donation.method.as_str().to_string(),
            status: donation.status.as_str().to_string(),
            transaction_ref: donation.transaction_ref,
            message: donation.message,
            customer_message: None,
            created_at: donation.created_at,
        }
    }
}

/// Aggregate donation totals (admin dashboard).
#[derive(Debug, Serialize)]
pub struct DonationStatsResponse {
    pub count: i64,
    pub total_amount: i64,
}

impl From<DonationStats> for DonationStatsResponse {
    fn from(stats: DonationStats) -> Self {
        Self {
            count: stats.count,
            total_amount: stats.total_amount.units(),
        }
    }
}
