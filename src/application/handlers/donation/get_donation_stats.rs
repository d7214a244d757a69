//! GetDonationStatsHandler - Completed donation totals for the admin dashboard.

use std::sync::Arc;

use crate::domain::donation::DonationError;
use crate::ports::{DonationRepository, DonationStats};

/// Handler returning the count and sum of completed donations.
pub struct GetDonationStatsHandler {
    repository: Arc<dyn DonationRepository>,
}

impl GetDonationStatsHandler {
    pub fn new(repository: Arc<dyn DonationRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<DonationStats, DonationError> {
        self.repository.stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::MockDonationRepository;
    use crate::domain::donation::Donation;
    use crate::domain::foundation::{Money, Timestamp};
    use crate::domain::membership::PaymentMethod;
    use crate::ports::DonationRepository as _;

    #[tokio::test]
    async fn counts_only_completed_donations() {
        let repo = Arc::new(MockDonationRepository::new());
        let cash = Donation::create(
            Some("Amina".to_string()),
            None,
            Money::new(500),
            "KES".to_string(),
            PaymentMethod::Cash,
            None,
            Timestamp::now(),
        )
        .unwrap();
        let mut pending = Donation::create(
            None,
            None,
            Money::new(2000),
            "KES".to_string(),
            PaymentMethod::MobileMoney,
            None,
            Timestamp::now(),
        )
        .unwrap();
        pending.attach_transaction_ref("ws_CO_pending");
        repo.save(&cash).await.unwrap();
        repo.save(&pending).await.unwrap();

        let stats = GetDonationStatsHandler::new(repo).handle().await.unwrap();

        assert_eq!(stats.count, 1);
        assert_eq!(stats.total_amount, Money::new(500));
    }
}
