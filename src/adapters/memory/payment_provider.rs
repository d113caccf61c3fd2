//! Mock payment provider for testing.
//!
//! Provides a scriptable implementation of `PaymentProvider` for unit and
//! integration tests. Supports:
//! - Pre-configured order states
//! - Error injection
//! - Call tracking

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::OrderId;
use crate::domain::membership::OrderState;
use crate::ports::{PaymentError, PaymentProvider};

/// Mock payment provider for testing.
///
/// Orders without a configured state are reported as not found.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
/// mock.set_state(order_id.clone(), OrderState::Completed).await;
///
/// // Inject errors
/// mock.set_error(PaymentError::network("connection reset")).await;
///
/// assert_eq!(mock.call_count().await, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockPaymentProvider {
    inner: Arc<RwLock<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    /// Configured order states by ID.
    orders: HashMap<OrderId, OrderState>,

    /// Error returned by every call while set.
    error: Option<PaymentError>,

    /// Order IDs looked up, in call order.
    calls: Vec<OrderId>,
}

impl MockPaymentProvider {
    /// Create a new mock provider with no orders.
    pub fn new() -> Self {
        Self::default()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Set the state reported for an order.
    pub async fn set_state(&self, order_id: OrderId, state: OrderState) {
        self.inner.write().await.orders.insert(order_id, state);
    }

    /// Fail all calls with this error until cleared.
    pub async fn set_error(&self, error: PaymentError) {
        self.inner.write().await.error = Some(error);
    }

    /// Stop injecting errors.
    pub async fn clear_error(&self) {
        self.inner.write().await.error = None;
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Assertion Helpers
    // ════════════════════════════════════════════════════════════════════════════

    /// Number of lookups made.
    pub async fn call_count(&self) -> usize {
        self.inner.read().await.calls.len()
    }

    /// Order IDs looked up, in call order.
    pub async fn calls(&self) -> Vec<OrderId> {
        self.inner.read().await.calls.clone()
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn get_order_state(&self, order_id: &OrderId) -> Result<OrderState, PaymentError> {
        let mut state = self.inner.write().await;
        state.calls.push(order_id.clone());

        if let Some(error) = &state.error {
            return Err(error.clone());
        }

        state
            .orders
            .get(order_id)
            .cloned()
            .ok_or_else(|| PaymentError::not_found("Order"))
    }
}
