//! PostgreSQL adapters - Database implementations for member ports.
//!
//! - `PostgresMemberStore` - Member lookups by external user id
//! - `PostgresExpiryUpdater` - Writes the policy expiry to a member row

mod expiry_updater;
mod member_store;

pub use expiry_updater::PostgresExpiryUpdater;
pub use member_store::PostgresMemberStore;
