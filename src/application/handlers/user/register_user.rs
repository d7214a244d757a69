//! RegisterUserHandler - Provisions a local account for an authenticated identity.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

/// Command to register an account profile.
///
/// The user ID comes from the identity token subject; credentials live
/// with the identity provider, never here.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub user_id: UserId,
    pub email: String,
    pub full_name: String,
}

/// Result of a registered account.
#[derive(Debug, Clone)]
pub struct RegisterUserResult {
    pub user: User,
}

/// Handler for account registration. Idempotent on the user ID: calling
/// again for an existing account returns the stored profile unchanged.
pub struct RegisterUserHandler {
    repository: Arc<dyn UserRepository>,
}

impl RegisterUserHandler {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: RegisterUserCommand,
    ) -> Result<RegisterUserResult, DomainError> {
        if let Some(existing) = self.repository.find_by_id(&cmd.user_id).await? {
            return Ok(RegisterUserResult { user: existing });
        }

        let mut user = User::register(&cmd.email, &cmd.full_name, Timestamp::now())?;
        user.id = cmd.user_id;
        self.repository.save(&user).await?;

        tracing::info!(user_id = %user.id, "Account registered");
        Ok(RegisterUserResult { user })
    }
}
