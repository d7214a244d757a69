//! Membership status state machine.
//!
//! Defines all possible membership states and valid transitions
//! according to the membership lifecycle.

use crate::domain::foundation::{StateMachine, ValidationError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Membership lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Application submitted, awaiting committee approval.
    Pending,

    /// Approved, dues current or being collected.
    Active,

    /// Temporarily suspended by an administrator.
    Suspended,

    /// Billing period lapsed without renewal.
    Expired,

    /// Withdrawn by the member or an administrator. Terminal.
    Cancelled,
}

impl MembershipStatus {
    /// Returns true for statuses that count as a member in good standing.
    pub fn is_member(&self) -> bool {
        matches!(self, MembershipStatus::Active)
    }

    /// Stable string form used in the database and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Pending => "pending",
            MembershipStatus::Active => "active",
            MembershipStatus::Suspended => "suspended",
            MembershipStatus::Expired => "expired",
            MembershipStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for MembershipStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MembershipStatus::Pending),
            "active" => Ok(MembershipStatus::Active),
            "suspended" => Ok(MembershipStatus::Suspended),
            "expired" => Ok(MembershipStatus::Expired),
            "cancelled" => Ok(MembershipStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("Unknown membership status '{}'", other),
            )),
        }
    }
}

impl StateMachine for MembershipStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MembershipStatus::*;
        matches!(
            (self, target),
            // From PENDING
            (Pending, Active)      // approval
                | (Pending, Cancelled)
            // From ACTIVE
                | (Active, Suspended)
                | (Active, Cancelled)
                | (Active, Expired)
                | (Active, Active) // renewal
            // From SUSPENDED
                | (Suspended, Active)
                | (Suspended, Cancelled)
            // From EXPIRED
                | (Expired, Active) // renewal
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MembershipStatus::*;
        match self {
            Pending => vec![Active, Cancelled],
            Active => vec![Suspended, Cancelled, Expired, Active],
            Suspended => vec![Active, Cancelled],
            Expired => vec![Active],
            Cancelled => vec![],
        }
    }
}
