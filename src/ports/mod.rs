//! Ports layer - Contracts between the domain and the outside world.
//!
//! Every adapter implements one of these traits; application handlers
//! depend only on the traits.

mod donation_repository;
mod event_repository;
mod membership_repository;
mod mobile_money;
mod user_repository;

pub use donation_repository::{DonationConfirmOutcome, DonationRepository, DonationStats};
pub use event_repository::EventRepository;
pub use membership_repository::{
    ConfirmOutcome, MembershipRepository, MembershipStats, ProgressAdvance,
};
pub use mobile_money::{GatewayError, MobileMoneyGateway, PushRequest, PushResponse};
pub use user_repository::UserRepository;
