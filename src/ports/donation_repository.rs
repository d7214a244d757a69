//! Donation repository port.

use crate::domain::donation::{Donation, DonationError};
use crate::domain::foundation::{DonationId, Money, Timestamp};
use async_trait::async_trait;

/// Aggregate donation figures for the public totals endpoint.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct DonationStats {
    pub count: i64,
    pub total_amount: Money,
}

/// Result of applying a gateway confirmation to a donation.
#[derive(Debug, Clone, PartialEq)]
pub enum DonationConfirmOutcome {
    /// The pending donation was settled.
    Applied { donation_id: DonationId },

    /// The reference was already settled or failed. Nothing changed.
    AlreadyProcessed,

    /// No donation carries this reference.
    NotFound,
}

/// Repository port for Donation persistence.
#[async_trait]
pub trait DonationRepository: Send + Sync {
    /// Save a new donation.
    ///
    /// # Errors
    ///
    /// - `DuplicateTransaction` if the reference already exists
    /// - `Infrastructure` on persistence failure
    async fn save(&self, donation: &Donation) -> Result<(), DonationError>;

    /// Find a donation by its ID.
    async fn find_by_id(&self, id: &DonationId) -> Result<Option<Donation>, DonationError>;

    /// Find a donation by its gateway transaction reference.
    async fn find_by_transaction_ref(
        &self,
        transaction_ref: &str,
    ) -> Result<Option<Donation>, DonationError>;

    /// Settle or fail a pending donation by gateway reference.
    ///
    /// Idempotent in the same way as membership payment confirmation.
    async fn confirm(
        &self,
        transaction_ref: &str,
        success: bool,
        now: Timestamp,
    ) -> Result<DonationConfirmOutcome, DonationError>;

    /// Count and total of completed donations.
    async fn stats(&self) -> Result<DonationStats, DonationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn donation_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn DonationRepository) {}
    }
}
