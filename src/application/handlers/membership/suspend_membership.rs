//! SuspendMembershipHandler - Command handler for suspending active memberships.

use std::sync::Arc;

use crate::domain::foundation::{MembershipId, Timestamp};
use crate::domain::membership::{Membership, MembershipError};
use crate::ports::MembershipRepository;

/// Command to suspend an active membership.
#[derive(Debug, Clone)]
pub struct SuspendMembershipCommand {
    pub membership_id: MembershipId,
    pub reason: Option<String>,
}

/// Result of a successful suspension.
#[derive(Debug, Clone)]
pub struct SuspendMembershipResult {
    pub membership: Membership,
}

/// Handler for suspending memberships.
pub struct SuspendMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl SuspendMembershipHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: SuspendMembershipCommand,
    ) -> Result<SuspendMembershipResult, MembershipError> {
        let mut membership = self
            .repository
            .find_by_id(&cmd.membership_id)
            .await?
            .ok_or_else(|| MembershipError::not_found(cmd.membership_id))?;

        membership.suspend(cmd.reason, Timestamp::now())?;
        self.repository.update(&membership).await?;

        tracing::info!(membership_id = %membership.id, "Membership suspended");
        Ok(SuspendMembershipResult { membership })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{active_membership, MockMembershipRepository};
    use crate::domain::foundation::UserId;
    use crate::domain::membership::{
        Applicant, FeeSchedule, MembershipStatus, MembershipTier, PaymentPlan,
    };

    #[tokio::test]
    async fn suspends_active_membership_with_reason() {
        let membership = active_membership();
        let id = membership.id;
        let repo = Arc::new(MockMembershipRepository::with_membership(membership));
        let handler = SuspendMembershipHandler::new(repo.clone());

        let result = handler
            .handle(SuspendMembershipCommand {
                membership_id: id,
                reason: Some("dues dispute".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(result.membership.status, MembershipStatus::Suspended);
        assert!(repo
            .stored(&id)
            .unwrap()
            .notes
            .as_deref()
            .unwrap()
            .contains("dues dispute"));
    }

    #[tokio::test]
    async fn cannot_suspend_pending_membership() {
        let fees = FeeSchedule::default().snapshot(MembershipTier::Gold, PaymentPlan::Monthly);
        let pending = Membership::apply(
            Applicant {
                user_id: UserId::new(),
                full_name: "B".to_string(),
                email: "b@example.com".to_string(),
                phone: "254700000001".to_string(),
            },
            MembershipTier::Gold,
            fees,
            Timestamp::now(),
        )
        .unwrap();
        let id = pending.id;
        let handler = SuspendMembershipHandler::new(Arc::new(
            MockMembershipRepository::with_membership(pending),
        ));

        let result = handler
            .handle(SuspendMembershipCommand {
                membership_id: id,
                reason: None,
            })
            .await;

        assert!(matches!(result, Err(MembershipError::InvalidState { .. })));
    }
}
