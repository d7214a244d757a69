//! Membership module - Applications, dues, and the membership lifecycle.
//!
//! The Membership aggregate owns its payment ledger; all lifecycle
//! transitions are validated by the status state machine.

mod aggregate;
mod errors;
mod fees;
mod number;
mod payment;
mod plan;
mod status;
mod tier;

pub use aggregate::{Applicant, Membership};
pub use errors::MembershipError;
pub use fees::{FeeSchedule, FeeSnapshot};
pub use number::MembershipNumber;
pub use payment::{
    DuesStatus, PaymentMethod, PaymentProgress, PaymentRecord, PaymentRecordStatus,
};
pub use plan::PaymentPlan;
pub use status::MembershipStatus;
pub use tier::MembershipTier;
