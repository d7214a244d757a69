//! Membership command and query handlers.

mod apply_for_membership;
mod approve_membership;
mod cancel_membership;
mod expire_memberships;
mod get_membership;
mod get_membership_stats;
mod initiate_dues_payment;
mod record_manual_payment;
mod remind_renewals;
mod reinstate_membership;
mod renew_membership;
mod suspend_membership;

pub use apply_for_membership::{
    ApplyForMembershipCommand, ApplyForMembershipHandler, ApplyForMembershipResult,
};
pub use approve_membership::{
    ApproveMembershipCommand, ApproveMembershipHandler, ApproveMembershipResult,
};
pub use cancel_membership::{
    CancelMembershipCommand, CancelMembershipHandler, CancelMembershipResult,
};
pub use expire_memberships::{ExpireMembershipsHandler, ExpireMembershipsResult};
pub use get_membership::{GetMembershipHandler, GetMembershipQuery, GetMembershipResult};
pub use get_membership_stats::GetMembershipStatsHandler;
pub use initiate_dues_payment::{
    InitiateDuesPaymentCommand, InitiateDuesPaymentHandler, InitiateDuesPaymentResult,
};
pub use record_manual_payment::{
    RecordManualPaymentCommand, RecordManualPaymentHandler, RecordManualPaymentResult,
};
pub use remind_renewals::{RemindRenewalsHandler, RemindRenewalsResult};
pub use reinstate_membership::{
    ReinstateMembershipCommand, ReinstateMembershipHandler, ReinstateMembershipResult,
};
pub use renew_membership::{
    RenewMembershipCommand, RenewMembershipHandler, RenewMembershipResult,
};
pub use suspend_membership::{
    SuspendMembershipCommand, SuspendMembershipHandler, SuspendMembershipResult,
};
