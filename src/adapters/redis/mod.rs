//! Redis adapters.
//!
//! - `RedisPendingPaymentCache` - Pending membership payment entries

mod pending_payment_cache;

pub use pending_payment_cache::RedisPendingPaymentCache;
