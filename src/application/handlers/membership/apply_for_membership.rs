//! ApplyForMembershipHandler - Command handler for submitting membership applications.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::membership::{
    Applicant, FeeSchedule, Membership, MembershipError, MembershipTier, PaymentPlan,
};
use crate::ports::{MembershipRepository, UserRepository};

/// Command to apply for membership.
#[derive(Debug, Clone)]
pub struct ApplyForMembershipCommand {
    pub user_id: crate::domain::foundation::UserId,
    pub tier: MembershipTier,
    pub plan: PaymentPlan,
    /// Mobile money number dues will be collected from.
    pub phone: String,
}

/// Result of a successful application.
#[derive(Debug, Clone)]
pub struct ApplyForMembershipResult {
    pub membership: Membership,
}

/// Handler for submitting membership applications.
///
/// Captures a fee snapshot from the schedule in force, so later schedule
/// changes never affect this membership.
pub struct ApplyForMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
    users: Arc<dyn UserRepository>,
    fee_schedule: FeeSchedule,
}

impl ApplyForMembershipHandler {
    pub fn new(
        repository: Arc<dyn MembershipRepository>,
        users: Arc<dyn UserRepository>,
        fee_schedule: FeeSchedule,
    ) -> Self {
        Self {
            repository,
            users,
            fee_schedule,
        }
    }

    pub async fn handle(
        &self,
        cmd: ApplyForMembershipCommand,
    ) -> Result<ApplyForMembershipResult, MembershipError> {
        // 1. One membership per user
        if self.repository.find_by_user_id(&cmd.user_id).await?.is_some() {
            return Err(MembershipError::already_exists(cmd.user_id));
        }

        // 2. The applicant must hold an account
        let user = self
            .users
            .find_by_id(&cmd.user_id)
            .await
            .map_err(|e| MembershipError::infrastructure(e.to_string()))?
            .ok_or_else(|| {
                MembershipError::validation("user_id", "No account for this user")
            })?;

        // 3. Freeze the fee amounts and create the aggregate
        let fees = self.fee_schedule.snapshot(cmd.tier, cmd.plan);
        let membership = Membership::apply(
            Applicant {
                user_id: cmd.user_id,
                full_name: user.full_name,
                email: user.email,
                phone: cmd.phone,
            },
            cmd.tier,
            fees,
            Timestamp::now(),
        )?;

        // 4. Persist
        self.repository.save(&membership).await?;

        tracing::info!(
            membership_id = %membership.id,
            tier = %membership.tier,
            plan = %membership.plan(),
            "Membership application submitted"
        );

        Ok(ApplyForMembershipResult { membership })
    }
}
