//! RemindRenewalsHandler - Flags memberships nearing expiry for renewal.
//!
//! Notification delivery is out of process; this sweep records which
//! memberships are due a reminder so it goes out at most once per term.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::membership::MembershipError;
use crate::ports::MembershipRepository;

/// Result of a reminder sweep.
#[derive(Debug, Clone, Default)]
pub struct RemindRenewalsResult {
    pub reminded: u32,
}

/// Handler that flags memberships expiring within the window. Like the
/// expiry sweep, one failed update does not stop the rest.
pub struct RemindRenewalsHandler {
    repository: Arc<dyn MembershipRepository>,
    window_days: u32,
}

impl RemindRenewalsHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>, window_days: u32) -> Self {
        Self {
            repository,
            window_days,
        }
    }

    pub async fn handle(&self) -> Result<RemindRenewalsResult, MembershipError> {
        let now = Timestamp::now();
        let expiring = self
            .repository
            .find_expiring_within_days(self.window_days)
            .await?;

        let mut reminded = 0;
        for mut membership in expiring {
            if membership.renewal_reminder_sent {
                continue;
            }
            membership.mark_reminder_sent(now);
            match self.repository.update(&membership).await {
                Ok(()) => {
                    reminded += 1;
                    tracing::info!(
                        membership_id = %membership.id,
                        expiry_date = ?membership.expiry_date,
                        "Renewal reminder recorded"
                    );
                }
                Err(e) => {
                    tracing::warn!(membership_id = %membership.id, error = %e, "Reminder update failed");
                }
            }
        }

        Ok(RemindRenewalsResult { reminded })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::active_membership;
    use crate::application::handlers::testing::MockMembershipRepository;
    use crate::domain::foundation::Timestamp;

    #[tokio::test]
    async fn flags_membership_expiring_soon_once() {
        let mut membership = active_membership();
        membership.expiry_date = Some(Timestamp::now().add_days(5));
        let id = membership.id;
        let repo = Arc::new(MockMembershipRepository::with_membership(membership));
        let handler = RemindRenewalsHandler::new(repo.clone(), 7);

        let result = handler.handle().await.unwrap();
        assert_eq!(result.reminded, 1);
        assert!(repo.stored(&id).unwrap().renewal_reminder_sent);

        // Second sweep finds the flag already set.
        let result = handler.handle().await.unwrap();
        assert_eq!(result.reminded, 0);
    }

    #[tokio::test]
    async fn ignores_memberships_outside_the_window() {
        let mut membership = active_membership();
        membership.expiry_date = Some(Timestamp::now().add_days(90));
        let repo = Arc::new(MockMembershipRepository::with_membership(membership));
        let handler = RemindRenewalsHandler::new(repo, 7);

        let result = handler.handle().await.unwrap();
        assert_eq!(result.reminded, 0);
    }
}
