//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Membership Payment Ports
//!
//! - `MemberStore` - Member lookup by external user id
//! - `PendingPaymentCache` - In-flight order ids awaiting verification
//! - `PaymentProvider` - Order status lookups at the payment gateway
//! - `ExpiryUpdater` - Persists a member's new membership expiry

mod expiry_updater;
mod member_store;
mod payment_provider;
mod pending_payment_cache;

pub use expiry_updater::ExpiryUpdater;
pub use member_store::MemberStore;
pub use payment_provider::{PaymentError, PaymentErrorCode, PaymentProvider};
pub use pending_payment_cache::{pending_payment_key, PendingPaymentCache, ORDER_ID_FIELD};
