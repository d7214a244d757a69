//! Membership tiers offered by the organization.

use crate::domain::foundation::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tier a member subscribes to. Determines the annual fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipTier {
    Gold,
    Silver,
    Bronze,
}

impl MembershipTier {
    /// Three-letter code embedded in membership numbers.
    pub fn code(&self) -> &'static str {
        match self {
            MembershipTier::Gold => "GLD",
            MembershipTier::Silver => "SLV",
            MembershipTier::Bronze => "BRZ",
        }
    }

    /// Stable string form used in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipTier::Gold => "gold",
            MembershipTier::Silver => "silver",
            MembershipTier::Bronze => "bronze",
        }
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MembershipTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gold" => Ok(MembershipTier::Gold),
            "silver" => Ok(MembershipTier::Silver),
            "bronze" => Ok(MembershipTier::Bronze),
            other => Err(ValidationError::invalid_format(
                "tier",
                format!("Unknown membership tier '{}'", other),
            )),
        }
    }
}
