//! ReinstateMembershipHandler - Command handler for lifting suspensions.

use std::sync::Arc;

use crate::domain::foundation::{MembershipId, Timestamp};
use crate::domain::membership::{Membership, MembershipError};
use crate::ports::MembershipRepository;

/// Command to reinstate a suspended membership.
#[derive(Debug, Clone)]
pub struct ReinstateMembershipCommand {
    pub membership_id: MembershipId,
}

/// Result of a successful reinstatement.
#[derive(Debug, Clone)]
pub struct ReinstateMembershipResult {
    pub membership: Membership,
}

/// Handler for reinstating suspended memberships.
pub struct ReinstateMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl ReinstateMembershipHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: ReinstateMembershipCommand,
    ) -> Result<ReinstateMembershipResult, MembershipError> {
        let mut membership = self
            .repository
            .find_by_id(&cmd.membership_id)
            .await?
            .ok_or_else(|| MembershipError::not_found(cmd.membership_id))?;

        membership.reinstate(Timestamp::now())?;
        self.repository.update(&membership).await?;

        tracing::info!(membership_id = %membership.id, "Membership reinstated");
        Ok(ReinstateMembershipResult { membership })
    }
}
