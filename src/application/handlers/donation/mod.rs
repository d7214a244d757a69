//! Donation command and query handlers.

mod create_donation;
mod get_donation_stats;

pub use create_donation::{CreateDonationCommand, CreateDonationHandler, CreateDonationResult};
pub use get_donation_stats::GetDonationStatsHandler;
