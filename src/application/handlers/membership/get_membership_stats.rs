//! GetMembershipStatsHandler - Aggregate counts for the admin dashboard.

use std::sync::Arc;

use crate::domain::membership::MembershipError;
use crate::ports::{MembershipRepository, MembershipStats};

/// Handler returning membership counts by status and the collected total.
pub struct GetMembershipStatsHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl GetMembershipStatsHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<MembershipStats, MembershipError> {
        self.repository.stats().await
    }
}
