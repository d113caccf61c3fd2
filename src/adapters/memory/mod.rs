//! In-memory adapters for tests and local development.
//!
//! State lives behind `tokio::sync::RwLock` and is shared between clones.

mod member_store;
mod payment_provider;
mod pending_payment_cache;

pub use member_store::InMemoryMemberStore;
pub use payment_provider::MockPaymentProvider;
pub use pending_payment_cache::InMemoryPendingPaymentCache;
