//! PostgreSQL adapters - Database implementations for repository ports.

mod donation_repository;
mod event_repository;
mod membership_repository;
mod user_repository;

pub use donation_repository::PostgresDonationRepository;
pub use event_repository::PostgresEventRepository;
pub use membership_repository::PostgresMembershipRepository;
pub use user_repository::PostgresUserRepository;
