//! ExpireMembershipsHandler - Sweeps active memberships past their expiry date.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::membership::MembershipError;
use crate::ports::MembershipRepository;

/// Result of an expiry sweep.
#[derive(Debug, Clone, Default)]
pub struct ExpireMembershipsResult {
    pub expired: u32,
}

/// Handler that expires lapsed memberships. Intended to run on a
/// schedule; a failed update for one membership does not stop the sweep.
pub struct ExpireMembershipsHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl ExpireMembershipsHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<ExpireMembershipsResult, MembershipError> {
        let now = Timestamp::now();
        let candidates = self.repository.find_past_expiry(now).await?;

        let mut expired = 0;
        for mut membership in candidates {
            if !membership.is_past_expiry(now) {
                continue;
            }
            if let Err(e) = membership.expire(now) {
                tracing::warn!(membership_id = %membership.id, error = %e, "Skipping expiry");
                continue;
            }
            match self.repository.update(&membership).await {
                Ok(()) => {
                    expired += 1;
                    tracing::info!(membership_id = %membership.id, "Membership expired");
                }
                Err(e) => {
                    tracing::warn!(membership_id = %membership.id, error = %e, "Expiry update failed");
                }
            }
        }

        Ok(ExpireMembershipsResult { expired })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::active_membership;
    use crate::application::handlers::testing::MockMembershipRepository;
    use crate::domain::membership::MembershipStatus;

    #[tokio::test]
    async fn expires_lapsed_membership() {
        let mut membership = active_membership();
        membership.expiry_date = Some(Timestamp::now().minus_days(5));
        let id = membership.id;
        let repo = Arc::new(MockMembershipRepository::with_membership(membership));
        let handler = ExpireMembershipsHandler::new(repo.clone());

        let result = handler.handle().await.unwrap();

        assert_eq!(result.expired, 1);
        assert_eq!(repo.stored(&id).unwrap().status, MembershipStatus::Expired);
    }

    #[tokio::test]
    async fn leaves_current_membership_alone() {
        let membership = active_membership();
        let id = membership.id;
        let repo = Arc::new(MockMembershipRepository::with_membership(membership));
        let handler = ExpireMembershipsHandler::new(repo.clone());

        let result = handler.handle().await.unwrap();

        assert_eq!(result.expired, 0);
        assert_eq!(repo.stored(&id).unwrap().status, MembershipStatus::Active);
    }
}
