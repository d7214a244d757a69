//! Membership number value object.
//!
//! Format: `{ORG}-{TIER}-{YEAR}-{NNNN}`, e.g. `UMJ-GLD-2026-0481`.
//! Assigned once at approval; uniqueness is enforced by the database.

use super::MembershipTier;
use crate::domain::foundation::{Timestamp, ValidationError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Human-readable membership number printed on cards and receipts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MembershipNumber(String);

impl MembershipNumber {
    /// Generates a number for a tier with a random 4-digit suffix.
    ///
    /// Collisions are possible within a tier and year; callers retry on a
    /// unique constraint violation.
    pub fn generate(org_code: &str, tier: MembershipTier, approved_at: Timestamp) -> Self {
        let suffix: u16 = rand::thread_rng().gen_range(0..10000);
        Self(format!(
            "{}-{}-{}-{:04}",
            org_code,
            tier.code(),
            approved_at.year(),
            suffix
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MembershipNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MembershipNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        let well_formed = parts.len() == 4
            && !parts[0].is_empty()
            && parts[0].chars().all(|c| c.is_ascii_uppercase())
            && matches!(parts[1], "GLD" | "SLV" | "BRZ")
            && parts[2].len() == 4
            && parts[2].chars().all(|c| c.is_ascii_digit())
            && parts[3].len() == 4
            && parts[3].chars().all(|c| c.is_ascii_digit());

        if well_formed {
            Ok(Self(s.to_string()))
        } else {
            Err(ValidationError::invalid_format(
                "membership_number",
                format!("'{}' does not match ORG-TIER-YEAR-NNNN", s),
            ))
        }
    }
}
