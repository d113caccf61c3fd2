//! In-memory pending payment cache.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, OrderId, UserId};
use crate::ports::PendingPaymentCache;

/// Pending payment entries keyed by user id.
///
/// Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPendingPaymentCache {
    entries: Arc<RwLock<HashMap<UserId, OrderId>>>,
}

impl InMemoryPendingPaymentCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pending order for a user, as checkout would.
    pub async fn record(&self, user_id: UserId, order_id: OrderId) {
        self.entries.write().await.insert(user_id, order_id);
    }

    /// Returns true if the user has a pending entry.
    pub async fn contains(&self, user_id: &UserId) -> bool {
        self.entries.read().await.contains_key(user_id)
    }

    /// Number of pending entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if there are no pending entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl PendingPaymentCache for InMemoryPendingPaymentCache {
    async fn get_order_id(&self, user_id: &UserId) -> Result<Option<OrderId>, DomainError> {
        Ok(self.entries.read().await.get(user_id).cloned())
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.entries.write().await.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn order(id: &str) -> OrderId {
        OrderId::new(id).unwrap()
    }

    #[tokio::test]
    async fn missing_entry_is_none() {
        let cache = InMemoryPendingPaymentCache::new();
        assert!(cache.get_order_id(&user("user_1")).await.unwrap().is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn recorded_entry_is_returned() {
        let cache = InMemoryPendingPaymentCache::new();
        cache.record(user("user_1"), order("order_1")).await;

        let order_id = cache.get_order_id(&user("user_1")).await.unwrap();
        assert_eq!(order_id, Some(order("order_1")));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn delete_removes_only_that_user() {
        let cache = InMemoryPendingPaymentCache::new();
        cache.record(user("user_1"), order("order_1")).await;
        cache.record(user("user_2"), order("order_2")).await;

        cache.delete(&user("user_1")).await.unwrap();

        assert!(!cache.contains(&user("user_1")).await);
        assert!(cache.contains(&user("user_2")).await);
    }

    #[tokio::test]
    async fn delete_of_missing_entry_succeeds() {
        let cache = InMemoryPendingPaymentCache::new();
        assert!(cache.delete(&user("user_1")).await.is_ok());
    }
}
