//! Membership aggregate entity.
//!
//! The Membership aggregate represents one person's paid subscription to
//! the organization. Each user has at most one Membership. The aggregate
//! owns its payment ledger and running dues summary.
//!
//! # Design Decisions
//!
//! - **One per user**: Unique constraint on user_id enforced at database level
//! - **Money in whole units**: All monetary values stored as i64 (not floats)
//! - **Self-validating transitions**: Every operation checks the state machine
//!   before mutating, so an aggregate can never hold an illegal status
//! - **Fee snapshot**: The amounts owed are frozen at application time and
//!   never change when the published schedule does

use crate::domain::foundation::{
    MembershipId, Money, PaymentId, StateMachine, Timestamp, UserId,
};
use serde::{Deserialize, Serialize};

use super::{
    FeeSnapshot, MembershipError, MembershipNumber, MembershipStatus, MembershipTier,
    PaymentMethod, PaymentPlan, PaymentProgress, PaymentRecord, PaymentRecordStatus,
};

/// Contact details captured with a membership application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub user_id: UserId,
    pub full_name: String,
    pub email: String,
    /// Mobile money number dues are collected from.
    pub phone: String,
}

/// Membership aggregate.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `applicant.user_id` is unique (one membership per user)
/// - Status transitions follow state machine rules
/// - `progress.total_paid` equals the sum of completed ledger entries
/// - `membership_number` is assigned exactly once, at approval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    /// Unique identifier for this membership.
    pub id: MembershipId,

    /// Who applied and where to reach them.
    pub applicant: Applicant,

    /// Tier determining the fee schedule row.
    pub tier: MembershipTier,

    /// Current status in the membership lifecycle.
    pub status: MembershipStatus,

    /// Amounts frozen at application time.
    pub fees: FeeSnapshot,

    /// Append-only payment ledger.
    pub payments: Vec<PaymentRecord>,

    /// Running dues summary derived from completed ledger entries.
    pub progress: PaymentProgress,

    /// Assigned at approval. None while pending.
    pub membership_number: Option<MembershipNumber>,

    /// When the application was approved.
    pub approval_date: Option<Timestamp>,

    /// Start of the current membership term.
    pub start_date: Option<Timestamp>,

    /// End of the current membership term.
    pub expiry_date: Option<Timestamp>,

    /// Most recent renewal, if any.
    pub last_renewal_date: Option<Timestamp>,

    /// Whether the upcoming-expiry reminder has gone out for this term.
    pub renewal_reminder_sent: bool,

    /// Free-form administrative notes.
    pub notes: Option<String>,

    /// When the application was submitted.
    pub created_at: Timestamp,

    /// When the membership was last updated.
    pub updated_at: Timestamp,
}

impl Membership {
    /// Submits a new membership application in Pending status.
    pub fn apply(
        applicant: Applicant,
        tier: MembershipTier,
        fees: FeeSnapshot,
        now: Timestamp,
    ) -> Result<Self, MembershipError> {
        if applicant.full_name.trim().is_empty() {
            return Err(MembershipError::validation("full_name", "cannot be empty"));
        }
        if applicant.phone.trim().is_empty() {
            return Err(MembershipError::validation("phone", "cannot be empty"));
        }

        Ok(Self {
            id: MembershipId::new(),
            applicant,
            tier,
            status: MembershipStatus::Pending,
            fees,
            payments: Vec::new(),
            progress: PaymentProgress::starting(),
            membership_number: None,
            approval_date: None,
            start_date: None,
            expiry_date: None,
            last_renewal_date: None,
            renewal_reminder_sent: false,
            notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Billing plan chosen at application time.
    pub fn plan(&self) -> PaymentPlan {
        self.fees.selected_plan
    }

    /// Approves a pending application.
    ///
    /// Activates the membership, opens the first term, and assigns a
    /// membership number.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the membership is Pending, and
    /// `NumberAssigned` if a number already exists.
    pub fn approve(&mut self, org_code: &str, now: Timestamp) -> Result<(), MembershipError> {
        if self.membership_number.is_some() {
            return Err(MembershipError::number_assigned(self.id));
        }
        // Renewal shares the Active -> Active edge; approval must not
        // take it.
        if self.status != MembershipStatus::Pending {
            return Err(MembershipError::invalid_state(
                self.status.as_str(),
                "approve",
            ));
        }
        self.transition(MembershipStatus::Active, "approve")?;

        self.approval_date = Some(now);
        self.start_date = Some(now);
        self.expiry_date = Some(now.add_days(self.plan().period_days()));
        self.progress.next_payment_date = Some(now.add_days(self.plan().period_days()));
        self.membership_number = Some(MembershipNumber::generate(org_code, self.tier, now));
        self.renewal_reminder_sent = false;
        self.updated_at = now;
        Ok(())
    }

    /// Suspends an active membership.
    pub fn suspend(
        &mut self,
        reason: Option<String>,
        now: Timestamp,
    ) -> Result<(), MembershipError> {
        self.transition(MembershipStatus::Suspended, "suspend")?;
        if let Some(reason) = reason {
            self.append_note(&format!("Suspended: {}", reason));
        }
        self.updated_at = now;
        Ok(())
    }

    /// Lifts a suspension.
    pub fn reinstate(&mut self, now: Timestamp) -> Result<(), MembershipError> {
        if self.status != MembershipStatus::Suspended {
            return Err(MembershipError::invalid_state(self.status.as_str(), "reinstate"));
        }
        self.transition(MembershipStatus::Active, "reinstate")?;
        self.updated_at = now;
        Ok(())
    }

    /// Cancels the membership. Terminal.
    pub fn cancel(
        &mut self,
        reason: Option<String>,
        now: Timestamp,
    ) -> Result<(), MembershipError> {
        self.transition(MembershipStatus::Cancelled, "cancel")?;
        if let Some(reason) = reason {
            self.append_note(&format!("Cancelled: {}", reason));
        }
        self.updated_at = now;
        Ok(())
    }

    /// Renews the membership for one more billing period.
    ///
    /// The new term extends from the stored expiry date, even when that
    /// date has passed; `now` is the base only when no expiry was ever
    /// set.
    pub fn renew(&mut self, now: Timestamp) -> Result<(), MembershipError> {
        // Reinstatement shares the Suspended -> Active edge; renewal must
        // not take it.
        if !matches!(
            self.status,
            MembershipStatus::Active | MembershipStatus::Expired
        ) {
            return Err(MembershipError::invalid_state(self.status.as_str(), "renew"));
        }
        self.transition(MembershipStatus::Active, "renew")?;

        let base = self.expiry_date.unwrap_or(now);
        self.expiry_date = Some(base.add_days(self.plan().period_days()));
        self.last_renewal_date = Some(now);
        self.renewal_reminder_sent = false;
        self.updated_at = now;
        Ok(())
    }

    /// Marks an active membership as expired when its term lapses.
    pub fn expire(&mut self, now: Timestamp) -> Result<(), MembershipError> {
        self.transition(MembershipStatus::Expired, "expire")?;
        self.progress.reset_streak();
        self.updated_at = now;
        Ok(())
    }

    /// Returns true when the current term has lapsed.
    pub fn is_past_expiry(&self, now: Timestamp) -> bool {
        matches!(self.expiry_date, Some(expiry) if now.is_after(&expiry))
    }

    /// Records that the upcoming-expiry reminder went out for this term.
    pub fn mark_reminder_sent(&mut self, now: Timestamp) {
        self.renewal_reminder_sent = true;
        self.updated_at = now;
    }

    /// Appends a payment to the ledger.
    ///
    /// Completed payments advance the dues summary immediately; pending
    /// payments wait for `confirm_payment`.
    ///
    /// # Errors
    ///
    /// Rejects non-positive amounts and transaction references already on
    /// the ledger.
    pub fn record_payment(
        &mut self,
        amount: Money,
        method: PaymentMethod,
        transaction_ref: Option<String>,
        status: PaymentRecordStatus,
        now: Timestamp,
    ) -> Result<&PaymentRecord, MembershipError> {
        if amount <= Money::ZERO {
            return Err(MembershipError::validation(
                "amount",
                "must be greater than zero",
            ));
        }
        if let Some(ref tx) = transaction_ref {
            if self.payments.iter().any(|p| {
                p.transaction_ref.as_deref() == Some(tx.as_str())
            }) {
                return Err(MembershipError::duplicate_transaction(tx.clone()));
            }
        }

        let record = PaymentRecord {
            id: PaymentId::new(),
            amount,
            method,
            status,
            transaction_ref,
            paid_at: now,
        };

        if record.is_completed() {
            self.progress.apply_completed(amount, self.plan(), now);
        }

        self.payments.push(record);
        self.updated_at = now;
        Ok(&self.payments[self.payments.len() - 1])
    }

    /// Settles or fails a pending payment by gateway transaction reference.
    ///
    /// Idempotent: a reference that is already completed or failed returns
    /// `Ok(false)` without touching the ledger. Unknown references are an
    /// error.
    pub fn confirm_payment(
        &mut self,
        transaction_ref: &str,
        success: bool,
        now: Timestamp,
    ) -> Result<bool, MembershipError> {
        let position = self
            .payments
            .iter()
            .position(|p| p.transaction_ref.as_deref() == Some(transaction_ref))
            .ok_or_else(|| {
                MembershipError::payment_failed(format!(
                    "no payment with transaction reference '{}'",
                    transaction_ref
                ))
            })?;

        if self.payments[position].status != PaymentRecordStatus::Pending {
            return Ok(false);
        }

        if success {
            let amount = self.payments[position].amount;
            self.payments[position].status = PaymentRecordStatus::Completed;
            self.payments[position].paid_at = now;
            self.progress.apply_completed(amount, self.plan(), now);
        } else {
            self.payments[position].status = PaymentRecordStatus::Failed;
        }
        self.updated_at = now;
        Ok(true)
    }

    /// Refreshes the dues summary against a clock reading.
    ///
    /// Read-side only; never changes the lifecycle status.
    pub fn check_payment_status(&mut self, now: Timestamp) {
        let fees = self.fees.clone();
        self.progress.recompute_dues(&fees, now);
    }

    /// Sum of completed ledger entries. Must always equal
    /// `progress.total_paid`.
    pub fn completed_total(&self) -> Money {
        self.payments
            .iter()
            .filter(|p| p.is_completed())
            .map(|p| p.amount)
            .sum()
    }

    fn transition(
        &mut self,
        target: MembershipStatus,
        attempted: &str,
    ) -> Result<(), MembershipError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| MembershipError::invalid_state(self.status.as_str(), attempted))?;
        Ok(())
    }

    fn append_note(&mut self, line: &str) {
        match self.notes {
            Some(ref mut notes) => {
                notes.push('\n');
                notes.push_str(line);
            }
            None => self.notes = Some(line.to_string()),
        }
    }
}
