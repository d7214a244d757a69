//! Donation module - One-off gifts and their settlement.

mod aggregate;
mod errors;

pub use aggregate::Donation;
pub use errors::DonationError;
