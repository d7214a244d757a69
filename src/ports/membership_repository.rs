//! Membership repository port (write side).
//!
//! Defines the contract for persisting and retrieving Membership
//! aggregates.
//!
//! # Design
//!
//! - **Unique constraints**: One membership per user; membership numbers
//!   and transaction references are globally unique
//! - **Atomic dues updates**: `record_payment` and `confirm_payment` must
//!   update the ledger and the running summary in one transaction, so the
//!   sum invariant holds under concurrent requests
//! - **Idempotent confirmation**: `confirm_payment` applies a transaction
//!   reference at most once

use crate::domain::foundation::{MembershipId, Money, Timestamp, UserId};
use crate::domain::membership::{Membership, MembershipError, PaymentRecord};
use async_trait::async_trait;

/// Summary advance to apply atomically alongside a settled payment.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressAdvance {
    pub amount: Money,
    pub last_payment_date: Timestamp,
    pub next_payment_date: Timestamp,
}

/// Result of applying a gateway confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome {
    /// The pending payment was resolved by this callback. On success the
    /// summary advanced; on failure the entry was marked failed.
    Applied {
        membership_id: MembershipId,
        amount: Money,
    },

    /// The reference was already settled or failed. Nothing changed.
    AlreadyProcessed,

    /// No payment carries this reference.
    NotFound,
}

/// Aggregate counts for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct MembershipStats {
    pub total: i64,
    pub pending: i64,
    pub active: i64,
    pub suspended: i64,
    pub expired: i64,
    pub cancelled: i64,
    pub total_collected: Money,
}

/// Repository port for Membership aggregate persistence.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Save a new membership.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the user already has a membership
    /// - `Infrastructure` on persistence failure
    async fn save(&self, membership: &Membership) -> Result<(), MembershipError>;

    /// Update an existing membership's lifecycle fields.
    ///
    /// Does not touch the payment ledger; use `record_payment` and
    /// `confirm_payment` for that.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the membership doesn't exist
    /// - `Infrastructure` on persistence failure
    async fn update(&self, membership: &Membership) -> Result<(), MembershipError>;

    /// Find a membership by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &MembershipId)
        -> Result<Option<Membership>, MembershipError>;

    /// Find a membership by user ID.
    ///
    /// The primary lookup since each user has at most one membership.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Membership>, MembershipError>;

    /// Find the membership holding a payment with this gateway reference.
    async fn find_by_transaction_ref(
        &self,
        transaction_ref: &str,
    ) -> Result<Option<Membership>, MembershipError>;

    /// Append a payment to the ledger, optionally advancing the dues
    /// summary in the same transaction.
    ///
    /// The summary advance uses relative arithmetic at the database, so
    /// two concurrent payments both land in the total.
    ///
    /// # Errors
    ///
    /// - `DuplicateTransaction` if the reference is already on any ledger
    /// - `NotFound` if the membership doesn't exist
    async fn record_payment(
        &self,
        id: &MembershipId,
        record: &PaymentRecord,
        advance: Option<&ProgressAdvance>,
    ) -> Result<(), MembershipError>;

    /// Settle or fail a pending payment by gateway reference.
    ///
    /// Idempotent: only a payment still in pending status is touched, so
    /// replayed callbacks report `AlreadyProcessed`.
    async fn confirm_payment(
        &self,
        transaction_ref: &str,
        success: bool,
        now: Timestamp,
    ) -> Result<ConfirmOutcome, MembershipError>;

    /// Find active memberships whose term ends within the given number of
    /// days. Used for renewal reminders.
    async fn find_expiring_within_days(
        &self,
        days: u32,
    ) -> Result<Vec<Membership>, MembershipError>;

    /// Find active memberships whose term has already lapsed. Used by the
    /// expiry sweep.
    async fn find_past_expiry(
        &self,
        now: Timestamp,
    ) -> Result<Vec<Membership>, MembershipError>;

    /// Aggregate counts and collected total across all memberships.
    async fn stats(&self) -> Result<MembershipStats, MembershipError>;
}
