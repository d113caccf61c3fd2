//! Pending payment cache port.
//!
//! Between payment initiation and verification, the provider order id for a
//! user's membership payment lives in a short-lived cache entry. The entry is
//! removed once the payment has been verified.
//!
//! # Key Layout
//!
//! Entries are hashes stored at `payment:membership:{user_id}` with the order
//! id in the `orderId` field. The layout is shared with the service that
//! starts the checkout, so it must not change independently.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OrderId, UserId};

/// Hash field holding the order id.
pub const ORDER_ID_FIELD: &str = "orderId";

/// Cache key for a user's pending membership payment.
pub fn pending_payment_key(user_id: &UserId) -> String {
    format!("payment:membership:{}", user_id)
}

/// Port for the pending membership payment cache.
#[async_trait]
pub trait PendingPaymentCache: Send + Sync {
    /// Read the in-flight order id for a user.
    ///
    /// Returns `None` if there is no entry, or the entry has no order id.
    async fn get_order_id(&self, user_id: &UserId) -> Result<Option<OrderId>, DomainError>;

    /// Remove the user's pending payment entry.
    ///
    /// Deleting a missing entry is not an error.
    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError>;
}
