//! Request and response types for membership endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{InitiateDuesPaymentResult, RecordManualPaymentResult};
use crate::domain::foundation::Timestamp;
use crate::domain::membership::{Membership, PaymentRecord};
use crate::ports::MembershipStats;

// ════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════

/// Request to apply for membership.
#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    /// "gold", "silver" or "bronze".
    pub tier: String,
    /// "monthly" or "annual".
    pub plan: String,
    /// Mobile money number dues will be collected from.
    pub phone: String,
}

/// Request to cancel the caller's own membership.
#[derive(Debug, Default, Deserialize)]
pub struct CancelRequest {
    pub reason: Option<String>,
}

/// Request to suspend a membership (admin).
#[derive(Debug, Default, Deserialize)]
pub struct SuspendRequest {
    pub reason: Option<String>,
}

/// Request to start an STK push for dues.
#[derive(Debug, Default, Deserialize)]
pub struct InitiatePaymentRequest {
    /// Amount in whole currency units. Defaults to the plan installment.
    pub amount: Option<i64>,
}

/// Request to record an out-of-band payment (admin).
#[derive(Debug, Deserialize)]
pub struct ManualPaymentRequest {
    /// Amount in whole currency units.
    pub amount: i64,
    /// "mobile_money", "bank_transfer" or "cash".
    pub method: String,
    /// External receipt or transaction reference.
    pub reference: Option<String>,
}

// ════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════

/// A single ledger entry.
#[derive(Debug, Serialize)]
pub struct PaymentRecordResponse {
    pub id: String,
    pub amount: i64,
    pub method: String,
    pub status: String,
    pub transaction_ref: Option<String>,
    pub paid_at: Timestamp,
}

impl From<&PaymentRecord> for PaymentRecordResponse {
    fn from(record: &PaymentRecord) -> Self {
        Self {
            id: record.id.to_string(),
            amount: record.amount.units(),
            method: record.method.as_str().to_string(),
            status: record.status.as_str().to_string(),
            transaction_ref: record.transaction_ref.clone(),
            paid_at: record.paid_at,
        }
    }
}

/// Dues summary derived from the ledger.
#[derive(Debug, Serialize)]
pub struct DuesResponse {
    pub total_paid: i64,
    pub payment_status: String,
    pub overdue_amount: i64,
    pub last_payment_date: Option<Timestamp>,
    pub next_payment_date: Option<Timestamp>,
    pub consecutive_payments: u32,
}

/// Full membership representation.
#[derive(Debug, Serialize)]
pub struct MembershipResponse {
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub tier: String,
    pub status: String,
    pub plan: String,
    pub membership_number: Option<String>,
    /// Fee captured at application time, per installment.
    pub installment_amount: i64,
    pub annual_amount: i64,
    pub currency: String,
    pub dues: DuesResponse,
    pub payments: Vec<PaymentRecordResponse>,
    pub approval_date: Option<Timestamp>,
    pub start_date: Option<Timestamp>,
    pub expiry_date: Option<Timestamp>,
    pub last_renewal_date: Option<Timestamp>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

impl From<Membership> for MembershipResponse {
    fn from(m: Membership) -> Self {
        let progress = &m.progress;
        Self {
            id: m.id.to_string(),
            user_id: m.applicant.user_id.to_string(),
            full_name: m.applicant.full_name.clone(),
            email: m.applicant.email.clone(),
            phone: m.applicant.phone.clone(),
            tier: m.tier.as_str().to_string(),
            status: m.status.as_str().to_string(),
            plan: m.plan().as_str().to_string(),
            membership_number: m.membership_number.as_ref().map(|n| n.to_string()),
            installment_amount: m.fees.selected_amount.units(),
            annual_amount: m.fees.annual_amount.units(),
            currency: m.fees.currency.clone(),
            dues: DuesResponse {
                total_paid: progress.total_paid.units(),
                payment_status: progress.payment_status.as_str().to_string(),
                overdue_amount: progress.overdue_amount.units(),
                last_payment_date: progress.last_payment_date,
                next_payment_date: progress.next_payment_date,
                consecutive_payments: progress.consecutive_payments,
            },
            payments: m.payments.iter().map(PaymentRecordResponse::from).collect(),
            approval_date: m.approval_date,
            start_date: m.start_date,
            expiry_date: m.expiry_date,
            last_renewal_date: m.last_renewal_date,
            notes: m.notes.clone(),
            created_at: m.created_at,
        }
    }
}

/// Acknowledgement of an initiated STK push.
#[derive(Debug, Serialize)]
pub struct PaymentInitiatedResponse {
    pub transaction_ref: String,
    pub amount: i64,
    pub customer_message: String,
}

impl From<InitiateDuesPaymentResult> for PaymentInitiatedResponse {
    fn from(result: InitiateDuesPaymentResult) -> Self {
        Self {
            transaction_ref: result.transaction_ref,
            amount: result.amount.units(),
            customer_message: result.customer_message,
        }
    }
}

/// A membership after a manual payment was recorded.
#[derive(Debug, Serialize)]
pub struct ManualPaymentResponse {
    pub membership: MembershipResponse,
}

impl From<RecordManualPaymentResult> for ManualPaymentResponse {
    fn from(result: RecordManualPaymentResult) -> Self {
        Self {
            membership: result.membership.into(),
        }
    }
}

/// Aggregate membership counts (admin dashboard).
#[derive(Debug, Serialize)]
pub struct MembershipStatsResponse {
    pub total: i64,
    pub pending: i64,
    pub active: i64,
    pub suspended: i64,
    pub expired: i64,
    pub cancelled: i64,
    pub total_collected: i64,
}

impl From<MembershipStats> for MembershipStatsResponse {
    fn from(stats: MembershipStats) -> Self {
        Self {
            total: stats.total,
            pending: stats.pending,
            active: stats.active,
            suspended: stats.suspended,
            expired: stats.expired,
            cancelled: stats.cancelled,
            total_collected: stats.total_collected.units(),
        }
    }
}

/// Result of the expiry sweep.
#[derive(Debug, Serialize)]
pub struct ExpireSweepResponse {
    pub expired: u32,
}

/// Published fee schedule.
#[derive(Debug, Serialize)]
pub struct TierFeesResponse {
    pub annual: i64,
    pub monthly: i64,
}

#[derive(Debug, Serialize)]
pub struct FeeScheduleResponse {
    pub currency: String,
    pub gold: TierFeesResponse,
    pub silver: TierFeesResponse,
    pub bronze: TierFeesResponse,
}

impl From<&crate::domain::membership::FeeSchedule> for FeeScheduleResponse {
    fn from(schedule: &crate::domain::membership::FeeSchedule) -> Self {
        use crate::domain::membership::MembershipTier;
        let tier = |t: MembershipTier| TierFeesResponse {
            annual: schedule.annual_for(t).units(),
            monthly: schedule.monthly_for(t).units(),
        };
        Self {
            currency: schedule.currency.clone(),
            gold: tier(MembershipTier::Gold),
            silver: tier(MembershipTier::Silver),
            bronze: tier(MembershipTier::Bronze),
        }
    }
}
