//! User module - Account holders and roles.

mod account;

pub use account::{User, UserRole};
