//! Payment entries and the running dues summary.
//!
//! `PaymentRecord` is an append-only ledger line. `PaymentProgress` is the
//! summary derived from completed entries; `apply_completed` advances it
//! when a payment settles and `recompute_dues` refreshes the overdue view
//! against a clock reading.

use super::{FeeSnapshot, PaymentPlan};
use crate::domain::foundation::{Money, PaymentId, Timestamp, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Channel through which a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    MobileMoney,
    BankTransfer,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::MobileMoney => "mobile_money",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile_money" => Ok(PaymentMethod::MobileMoney),
            "bank_transfer" => Ok(PaymentMethod::BankTransfer),
            "cash" => Ok(PaymentMethod::Cash),
            other => Err(ValidationError::invalid_format(
                "payment_method",
                format!("Unknown payment method '{}'", other),
            )),
        }
    }
}

/// Settlement state of a single payment entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentRecordStatus {
    /// Initiated but not yet confirmed by the gateway.
    Pending,

    /// Confirmed. Counts toward the dues total.
    Completed,

    /// Rejected or abandoned. Never counts toward the total.
    Failed,
}

impl PaymentRecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentRecordStatus::Pending => "pending",
            PaymentRecordStatus::Completed => "completed",
            PaymentRecordStatus::Failed => "failed",
        }
    }
}

impl FromStr for PaymentRecordStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentRecordStatus::Pending),
            "completed" => Ok(PaymentRecordStatus::Completed),
            "failed" => Ok(PaymentRecordStatus::Failed),
            other => Err(ValidationError::invalid_format(
                "payment_status",
                format!("Unknown payment status '{}'", other),
            )),
        }
    }
}

/// One line in a membership's payment ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub amount: Money,
    pub method: PaymentMethod,
    pub status: PaymentRecordStatus,
    /// Gateway transaction reference. Unique across all payments.
    pub transaction_ref: Option<String>,
    pub paid_at: Timestamp,
}

impl PaymentRecord {
    pub fn is_completed(&self) -> bool {
        self.status == PaymentRecordStatus::Completed
    }
}

/// Where a membership stands relative to its dues schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuesStatus {
    UpToDate,
    Overdue,
    /// No payment has been recorded yet.
    Pending,
}

impl DuesStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuesStatus::UpToDate => "up_to_date",
            DuesStatus::Overdue => "overdue",
            DuesStatus::Pending => "pending",
        }
    }
}

/// Running summary of a membership's payment history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentProgress {
    pub total_paid: Money,
    pub last_payment_date: Option<Timestamp>,
    pub next_payment_date: Option<Timestamp>,
    pub payment_status: DuesStatus,
    pub overdue_amount: Money,
    pub consecutive_payments: u32,
}

impl PaymentProgress {
    /// Progress for a membership with no payments yet.
    pub fn starting() -> Self {
        Self {
            total_paid: Money::ZERO,
            last_payment_date: None,
            next_payment_date: None,
            payment_status: DuesStatus::Pending,
            overdue_amount: Money::ZERO,
            consecutive_payments: 0,
        }
    }

    /// Advances the summary after a payment settles.
    ///
    /// The next due date moves one billing period forward from the
    /// settlement date, and any overdue amount is cleared.
    pub fn apply_completed(&mut self, amount: Money, plan: PaymentPlan, paid_at: Timestamp) {
        self.total_paid += amount;
        self.last_payment_date = Some(paid_at);
        self.next_payment_date = Some(paid_at.add_days(plan.period_days()));
        self.payment_status = DuesStatus::UpToDate;
        self.overdue_amount = Money::ZERO;
        self.consecutive_payments += 1;
    }

    /// Refreshes the overdue view as of `now`.
    ///
    /// Any membership past its due date is overdue, even when the amount
    /// owed is still zero. Monthly plans owe one installment per full
    /// 30-day period past the due date; annual plans owe the unpaid
    /// remainder of the annual fee.
    pub fn recompute_dues(&mut self, fees: &FeeSnapshot, now: Timestamp) {
        let Some(next_due) = self.next_payment_date else {
            self.payment_status = DuesStatus::Pending;
            self.overdue_amount = Money::ZERO;
            return;
        };

        if !now.is_after(&next_due) {
            self.payment_status = if self.last_payment_date.is_some() {
                DuesStatus::UpToDate
            } else {
                DuesStatus::Pending
            };
            self.overdue_amount = Money::ZERO;
            return;
        }

        let days_late = now.days_since(&next_due);
        self.payment_status = DuesStatus::Overdue;
        self.overdue_amount = match fees.selected_plan {
            PaymentPlan::Monthly => fees.monthly_amount.times(days_late / 30),
            PaymentPlan::Annual => fees.annual_amount.saturating_sub(self.total_paid),
        };
    }

    /// Breaks the consecutive payment streak when dues lapse.
    pub fn reset_streak(&mut self) {
        self.consecutive_payments = 0;
    }
}
