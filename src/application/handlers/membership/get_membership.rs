//! GetMembershipHandler - Read side for a member's own membership.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::membership::{Membership, MembershipError};
use crate::ports::MembershipRepository;

/// Query for the caller's membership.
#[derive(Debug, Clone)]
pub struct GetMembershipQuery {
    pub user_id: UserId,
}

/// The membership with dues standing freshened for today.
#[derive(Debug, Clone)]
pub struct GetMembershipResult {
    pub membership: Membership,
}

/// Handler returning a member's membership.
///
/// Recomputes dues standing against today's date before returning, so
/// the overdue amount never goes stale between payments. The recompute
/// is not written back; the stored summary only moves on settlement.
pub struct GetMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl GetMembershipHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetMembershipQuery,
    ) -> Result<GetMembershipResult, MembershipError> {
        let mut membership = self
            .repository
            .find_by_user_id(&query.user_id)
            .await?
            .ok_or_else(|| MembershipError::not_found_for_user(query.user_id))?;

        membership.check_payment_status(Timestamp::now());
        Ok(GetMembershipResult { membership })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::active_membership;
    use crate::application::handlers::testing::MockMembershipRepository;
    use crate::domain::foundation::Money;
    use crate::domain::membership::DuesStatus;

    #[tokio::test]
    async fn freshens_overdue_amount_without_writing_back() {
        let mut membership = active_membership();
        // 70 days past the due date on a gold monthly plan
        membership.progress.next_payment_date = Some(Timestamp::now().minus_days(70));
        membership.progress.last_payment_date = Some(Timestamp::now().minus_days(100));
        let user_id = membership.applicant.user_id;
        let id = membership.id;
        let repo = Arc::new(MockMembershipRepository::with_membership(membership));
        let handler = GetMembershipHandler::new(repo.clone());

        let result = handler.handle(GetMembershipQuery { user_id }).await.unwrap();

        // Two whole 30-day periods missed at 417/month
        assert_eq!(result.membership.progress.payment_status, DuesStatus::Overdue);
        assert_eq!(result.membership.progress.overdue_amount, Money::new(834));
        // Stored copy untouched
        assert_eq!(
            repo.stored(&id).unwrap().progress.overdue_amount,
            Money::ZERO
        );
    }

    #[tokio::test]
    async fn user_without_membership_is_not_found() {
        let handler = GetMembershipHandler::new(Arc::new(MockMembershipRepository::new()));

        let result = handler
            .handle(GetMembershipQuery {
                user_id: UserId::new(),
            })
            .await;

        assert!(matches!(result, Err(MembershipError::NotFoundForUser(_))));
    }
}
