//! CancelMembershipHandler - Command handler for member-initiated cancellation.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::membership::{Membership, MembershipError};
use crate::ports::MembershipRepository;

/// Command to cancel the caller's own membership.
#[derive(Debug, Clone)]
pub struct CancelMembershipCommand {
    pub user_id: UserId,
    pub reason: Option<String>,
}

/// Result of a successful cancellation.
#[derive(Debug, Clone)]
pub struct CancelMembershipResult {
    pub membership: Membership,
}

/// Handler for cancelling memberships. Cancellation is terminal; a
/// cancelled member must apply again from scratch.
pub struct CancelMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl CancelMembershipHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CancelMembershipCommand,
    ) -> Result<CancelMembershipResult, MembershipError> {
        let mut membership = self
            .repository
            .find_by_user_id(&cmd.user_id)
            .await?
            .ok_or_else(|| MembershipError::not_found_for_user(cmd.user_id))?;

        membership.cancel(cmd.reason, Timestamp::now())?;
        self.repository.update(&membership).await?;

        tracing::info!(membership_id = %membership.id, "Membership cancelled");
        Ok(CancelMembershipResult { membership })
    }
}
