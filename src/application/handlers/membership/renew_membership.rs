//! RenewMembershipHandler - Command handler for renewing a membership term.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::membership::{Membership, MembershipError};
use crate::ports::MembershipRepository;

/// Command to renew the caller's own membership.
#[derive(Debug, Clone)]
pub struct RenewMembershipCommand {
    pub user_id: UserId,
}

/// Result of a successful renewal.
#[derive(Debug, Clone)]
pub struct RenewMembershipResult {
    pub membership: Membership,
}

/// Handler for renewing memberships.
///
/// The new term extends from the stored expiry date, lapsed or not.
/// Suspended and pending memberships cannot renew.
pub struct RenewMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl RenewMembershipHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: RenewMembershipCommand,
    ) -> Result<RenewMembershipResult, MembershipError> {
        let mut membership = self
            .repository
            .find_by_user_id(&cmd.user_id)
            .await?
            .ok_or_else(|| MembershipError::not_found_for_user(cmd.user_id))?;

        membership.renew(Timestamp::now())?;
        self.repository.update(&membership).await?;

        tracing::info!(
            membership_id = %membership.id,
            expiry = ?membership.expiry_date,
            "Membership renewed"
        );
        Ok(RenewMembershipResult { membership })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::active_membership;
    use crate::application::handlers::testing::MockMembershipRepository;
    use crate::domain::membership::MembershipStatus;

    #[tokio::test]
    async fn renewal_extends_from_current_expiry() {
        let membership = active_membership();
        let user_id = membership.applicant.user_id;
        let before = membership.expiry_date.unwrap();
        let handler = RenewMembershipHandler::new(Arc::new(
            MockMembershipRepository::with_membership(membership),
        ));

        let result = handler
            .handle(RenewMembershipCommand { user_id })
            .await
            .unwrap();

        // Gold monthly plan: one more 30-day period on top of the open term
        assert_eq!(
            result.membership.expiry_date.unwrap().days_since(&before),
            30
        );
    }

    #[tokio::test]
    async fn expired_membership_extends_from_previous_expiry() {
        let mut membership = active_membership();
        let lapsed = Timestamp::now().minus_days(90);
        membership.expiry_date = Some(lapsed);
        membership.expire(Timestamp::now()).unwrap();
        let user_id = membership.applicant.user_id;
        let handler = RenewMembershipHandler::new(Arc::new(
            MockMembershipRepository::with_membership(membership),
        ));

        let result = handler
            .handle(RenewMembershipCommand { user_id })
            .await
            .unwrap();

        // Gold monthly plan: one 30-day period on top of the lapsed expiry.
        assert_eq!(result.membership.status, MembershipStatus::Active);
        assert_eq!(result.membership.expiry_date, Some(lapsed.add_days(30)));
    }

    #[tokio::test]
    async fn suspended_membership_cannot_renew() {
        let mut membership = active_membership();
        membership.suspend(None, Timestamp::now()).unwrap();
        let user_id = membership.applicant.user_id;
        let id = membership.id;
        let expiry_before = membership.expiry_date;
        let repo = Arc::new(MockMembershipRepository::with_membership(membership));
        let handler = RenewMembershipHandler::new(repo.clone());

        let result = handler.handle(RenewMembershipCommand { user_id }).await;

        assert!(matches!(result, Err(MembershipError::InvalidState { .. })));
        // Nothing persisted
        let stored = repo.stored(&id).unwrap();
        assert_eq!(stored.status, MembershipStatus::Suspended);
        assert_eq!(stored.expiry_date, expiry_before);
    }
}
