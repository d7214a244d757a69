//! User account entity.

use crate::domain::foundation::{Timestamp, UserId, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access level of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Member,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Member => "member",
            UserRole::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(UserRole::Member),
            "admin" => Ok(UserRole::Admin),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("Unknown role '{}'", other),
            )),
        }
    }
}

/// Account holder in the organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub created_at: Timestamp,
}

impl User {
    /// Registers a new member-level account.
    pub fn register(
        email: impl Into<String>,
        full_name: impl Into<String>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let email = email.into();
        let full_name = full_name.into();

        if full_name.trim().is_empty() {
            return Err(ValidationError::empty_field("full_name"));
        }
        if !email.contains('@') {
            return Err(ValidationError::invalid_format(
                "email",
                "missing '@'".to_string(),
            ));
        }

        Ok(Self {
            id: UserId::new(),
            email,
            full_name,
            role: UserRole::Member,
            created_at: now,
        })
    }
}
