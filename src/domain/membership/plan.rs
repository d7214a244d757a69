//! Billing plans for membership dues.

use crate::domain::foundation::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a member pays their dues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentPlan {
    /// One installment per month.
    Monthly,

    /// A single payment covering the full year.
    Annual,
}

impl PaymentPlan {
    /// Length of one billing period in days.
    ///
    /// Months are approximated at 30 days throughout the dues arithmetic.
    pub fn period_days(&self) -> i64 {
        match self {
            PaymentPlan::Monthly => 30,
            PaymentPlan::Annual => 365,
        }
    }

    /// Stable string form used in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentPlan::Monthly => "monthly",
            PaymentPlan::Annual => "annual",
        }
    }
}

impl fmt::Display for PaymentPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentPlan {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(PaymentPlan::Monthly),
            "annual" => Ok(PaymentPlan::Annual),
            other => Err(ValidationError::invalid_format(
                "payment_plan",
                format!("Unknown payment plan '{}'", other),
            )),
        }
    }
}
