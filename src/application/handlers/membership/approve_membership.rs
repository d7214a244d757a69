//! ApproveMembershipHandler - Command handler for approving pending applications.

use std::sync::Arc;

use crate::domain::foundation::{MembershipId, Timestamp};
use crate::domain::membership::{Membership, MembershipError};
use crate::ports::MembershipRepository;

/// Number-collision retries before giving up. The suffix space is 10,000
/// per tier and year, so collisions are rare.
const MAX_NUMBER_ATTEMPTS: u32 = 3;

/// Command to approve a pending membership application.
#[derive(Debug, Clone)]
pub struct ApproveMembershipCommand {
    pub membership_id: MembershipId,
}

/// Result of a successful approval.
#[derive(Debug, Clone)]
pub struct ApproveMembershipResult {
    pub membership: Membership,
}

/// Handler for approving membership applications.
///
/// Activates the membership, opens the first term, and assigns a unique
/// membership number (retrying on suffix collision).
pub struct ApproveMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
    org_code: String,
}

impl ApproveMembershipHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>, org_code: String) -> Self {
        Self {
            repository,
            org_code,
        }
    }

    pub async fn handle(
        &self,
        cmd: ApproveMembershipCommand,
    ) -> Result<ApproveMembershipResult, MembershipError> {
        let membership = self
            .repository
            .find_by_id(&cmd.membership_id)
            .await?
            .ok_or_else(|| MembershipError::not_found(cmd.membership_id))?;

        let mut last_err = None;
        for _ in 0..MAX_NUMBER_ATTEMPTS {
            let mut attempt = membership.clone();
            attempt.approve(&self.org_code, Timestamp::now())?;

            match self.repository.update(&attempt).await {
                Ok(()) => {
                    tracing::info!(
                        membership_id = %attempt.id,
                        membership_number = %attempt.membership_number.as_ref()
                            .map(|n| n.as_str().to_string())
                            .unwrap_or_default(),
                        "Membership approved"
                    );
                    return Ok(ApproveMembershipResult { membership: attempt });
                }
                // Number collision surfaces as a retryable infrastructure
                // error; regenerate and try again.
                Err(e) if e.is_retryable() => last_err = Some(e),
                Err(e) => return Err(e),
            }
        }

        Err(last_err.unwrap_or_else(|| {
            MembershipError::infrastructure("Could not assign a membership number")
        }))
    }
}
