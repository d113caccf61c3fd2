//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory stores and a scriptable payment provider
//! - `postgres` - Member lookups and expiry writes
//! - `redis` - Pending payment cache
//! - `square` - Square Orders API client

pub mod memory;
pub mod postgres;
pub mod redis;
pub mod square;

pub use memory::{InMemoryMemberStore, InMemoryPendingPaymentCache, MockPaymentProvider};
pub use postgres::{PostgresExpiryUpdater, PostgresMemberStore};
pub use self::redis::RedisPendingPaymentCache;
pub use square::SquarePaymentProvider;
