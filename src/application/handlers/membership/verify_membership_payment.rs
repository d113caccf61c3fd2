//! VerifyMembershipPaymentHandler - Query handler that confirms a membership payment.
//!
//! Checks, in order: the stored expiry, the pending-payment cache, and the
//! payment provider's order state. A completed order is converted into a
//! stored expiry and the pending entry is cleared.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::membership::{MemberKey, MembershipPayment};
use crate::ports::{ExpiryUpdater, MemberStore, PaymentProvider, PendingPaymentCache};

/// Query to verify a user's membership payment.
#[derive(Debug, Clone)]
pub struct VerifyMembershipPaymentQuery {
    pub user_id: UserId,
}

/// Result of a verification.
pub type VerifyMembershipPaymentResult = MembershipPayment;

/// Handler for verifying membership payments.
///
/// Never fails: every error along the way is logged and reported as
/// [`MembershipPayment::NotPaid`]. The caller cannot tell "never paid" from
/// "payment pending" from "provider unreachable".
pub struct VerifyMembershipPaymentHandler {
    members: Arc<dyn MemberStore>,
    pending_payments: Arc<dyn PendingPaymentCache>,
    payment_provider: Arc<dyn PaymentProvider>,
    expiry_updater: Arc<dyn ExpiryUpdater>,
}

impl VerifyMembershipPaymentHandler {
    pub fn new(
        members: Arc<dyn MemberStore>,
        pending_payments: Arc<dyn PendingPaymentCache>,
        payment_provider: Arc<dyn PaymentProvider>,
        expiry_updater: Arc<dyn ExpiryUpdater>,
    ) -> Self {
        Self {
            members,
            pending_payments,
            payment_provider,
            expiry_updater,
        }
    }

    pub async fn handle(&self, query: VerifyMembershipPaymentQuery) -> VerifyMembershipPaymentResult {
        let user_id = query.user_id;

        // 1. Already paid: short-circuit without touching cache or provider
        match self.members.find_by_user(&user_id).await {
            Ok(Some(member)) => {
                if let Some(membership_expires_at) = member.paid_until() {
                    return MembershipPayment::Paid {
                        membership_expires_at,
                    };
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Member lookup failed");
                return MembershipPayment::NotPaid;
            }
        }

        // 2. Pending order from checkout
        let order_id = match self.pending_payments.get_order_id(&user_id).await {
            Ok(Some(order_id)) => order_id,
            Ok(None) => return MembershipPayment::NotPaid,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Pending payment lookup failed");
                return MembershipPayment::NotPaid;
            }
        };

        // 3. Provider order state
        match self.payment_provider.get_order_state(&order_id).await {
            Ok(state) if state.is_completed() => {}
            Ok(state) => {
                tracing::debug!(
                    user_id = %user_id,
                    order_id = %order_id,
                    state = %state,
                    "Membership order not completed"
                );
                return MembershipPayment::NotPaid;
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    order_id = %order_id,
                    error = %e,
                    retryable = e.retryable,
                    "Order state lookup failed"
                );
                return MembershipPayment::NotPaid;
            }
        }

        // 4. Persist the new expiry, then drop the pending entry
        let membership_expires_at = match self
            .expiry_updater
            .update_expiry(&MemberKey::External(user_id.clone()))
            .await
        {
            Ok(expiry) => expiry,
            Err(e) => {
                tracing::error!(
                    user_id = %user_id,
                    order_id = %order_id,
                    error = %e,
                    "Failed to record membership expiry for completed order"
                );
                return MembershipPayment::NotPaid;
            }
        };

        if let Err(e) = self.pending_payments.delete(&user_id).await {
            tracing::warn!(
                user_id = %user_id,
                error = %e,
                "Failed to clear pending payment entry"
            );
        }

        tracing::info!(
            user_id = %user_id,
            order_id = %order_id,
            membership_expires_at = %membership_expires_at.as_datetime(),
            "Membership payment verified"
        );

        MembershipPayment::Paid {
            membership_expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode, MemberId, OrderId, Timestamp};
    use crate::domain::membership::{next_membership_expiry, MemberRecord, OrderState};
    use crate::ports::PaymentError;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    /// Members table double; serves both the read and the write port.
    struct MockMembers {
        records: Mutex<HashMap<UserId, MemberRecord>>,
        fail_read: bool,
        fail_update: bool,
        reads: AtomicUsize,
        updates: AtomicUsize,
    }

    impl MockMembers {
        fn new() -> Self {
            Self {
                records: Mutex::new(HashMap::new()),
                fail_read: false,
                fail_update: false,
                reads: AtomicUsize::new(0),
                updates: AtomicUsize::new(0),
            }
        }

        fn with_member(user_id: &UserId, expires_at: Option<Timestamp>) -> Self {
            let members = Self::new();
            members.records.lock().unwrap().insert(
                user_id.clone(),
                MemberRecord {
                    id: MemberId::new(),
                    membership_expires_at: expires_at,
                },
            );
            members
        }

        fn failing_read() -> Self {
            Self {
                fail_read: true,
                ..Self::new()
            }
        }

        fn failing_update(user_id: &UserId) -> Self {
            Self {
                fail_update: true,
                ..Self::with_member(user_id, None)
            }
        }

        fn update_count(&self) -> usize {
            self.updates.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MemberStore for MockMembers {
        async fn find_by_user(&self, user_id: &UserId) -> Result<Option<MemberRecord>, DomainError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.fail_read {
                return Err(DomainError::database("Simulated read failure"));
            }
            Ok(self.records.lock().unwrap().get(user_id).cloned())
        }
    }

    #[async_trait]
    impl ExpiryUpdater for MockMembers {
        async fn update_expiry(&self, key: &MemberKey) -> Result<Timestamp, DomainError> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            if self.fail_update {
                return Err(DomainError::database("Simulated write failure"));
            }
            let MemberKey::External(user_id) = key else {
                return Err(DomainError::new(ErrorCode::InternalError, "Expected external key"));
            };
            let expiry = next_membership_expiry(Timestamp::now())?;
            let mut records = self.records.lock().unwrap();
            let record = records
                .get_mut(user_id)
                .ok_or_else(|| DomainError::new(ErrorCode::MemberNotFound, "Member not found"))?;
            record.membership_expires_at = Some(expiry);
            Ok(expiry)
        }
    }

    struct MockPendingPayments {
        entries: Mutex<HashMap<UserId, OrderId>>,
        fail_get: bool,
        fail_delete: bool,
        gets: AtomicUsize,
        deletes: AtomicUsize,
    }

    impl MockPendingPayments {
        fn new() -> Self {
            Self {
                entries: Mutex::new(HashMap::new()),
                fail_get: false,
                fail_delete: false,
                gets: AtomicUsize::new(0),
                deletes: AtomicUsize::new(0),
            }
        }

        fn with_order(user_id: &UserId, order_id: &str) -> Self {
            let cache = Self::new();
            cache
                .entries
                .lock()
                .unwrap()
                .insert(user_id.clone(), OrderId::new(order_id).unwrap());
            cache
        }

        fn failing() -> Self {
            Self {
                fail_get: true,
                fail_delete: true,
                ..Self::new()
            }
        }

        fn contains(&self, user_id: &UserId) -> bool {
            self.entries.lock().unwrap().contains_key(user_id)
        }

        fn get_count(&self) -> usize {
            self.gets.load(Ordering::SeqCst)
        }

        fn delete_count(&self) -> usize {
            self.deletes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PendingPaymentCache for MockPendingPayments {
        async fn get_order_id(&self, user_id: &UserId) -> Result<Option<OrderId>, DomainError> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            if self.fail_get {
                return Err(DomainError::cache("Simulated cache failure"));
            }
            Ok(self.entries.lock().unwrap().get(user_id).cloned())
        }

        async fn delete(&self, user_id: &UserId) -> Result<(), DomainError> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            if self.fail_delete {
                return Err(DomainError::cache("Simulated cache failure"));
            }
            self.entries.lock().unwrap().remove(user_id);
            Ok(())
        }
    }

    struct StubPaymentProvider {
        result: Result<OrderState, PaymentError>,
        calls: AtomicUsize,
    }

    impl StubPaymentProvider {
        fn returning(state: OrderState) -> Self {
            Self {
                result: Ok(state),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                result: Err(PaymentError::network("Simulated provider outage")),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PaymentProvider for StubPaymentProvider {
        async fn get_order_state(&self, _order_id: &OrderId) -> Result<OrderState, PaymentError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn test_user_id() -> UserId {
        UserId::new("user_2abcXYZ").unwrap()
    }

    fn stored_expiry() -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    fn handler(
        members: &Arc<MockMembers>,
        cache: &Arc<MockPendingPayments>,
        provider: &Arc<StubPaymentProvider>,
    ) -> VerifyMembershipPaymentHandler {
        VerifyMembershipPaymentHandler::new(
            members.clone(),
            cache.clone(),
            provider.clone(),
            members.clone(),
        )
    }

    fn query() -> VerifyMembershipPaymentQuery {
        VerifyMembershipPaymentQuery {
            user_id: test_user_id(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Stored Expiry Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn returns_stored_expiry_without_consulting_cache_or_provider() {
        let members = Arc::new(MockMembers::with_member(&test_user_id(), Some(stored_expiry())));
        let cache = Arc::new(MockPendingPayments::failing());
        let provider = Arc::new(StubPaymentProvider::failing());

        let result = handler(&members, &cache, &provider).handle(query()).await;

        assert_eq!(
            result,
            MembershipPayment::Paid {
                membership_expires_at: stored_expiry()
            }
        );
        assert_eq!(cache.get_count(), 0);
        assert_eq!(cache.delete_count(), 0);
        assert_eq!(provider.call_count(), 0);
        assert_eq!(members.update_count(), 0);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Not Paid Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn not_paid_when_no_pending_payment() {
        let members = Arc::new(MockMembers::with_member(&test_user_id(), None));
        let cache = Arc::new(MockPendingPayments::new());
        let provider = Arc::new(StubPaymentProvider::returning(OrderState::Completed));

        let result = handler(&members, &cache, &provider).handle(query()).await;

        assert_eq!(result, MembershipPayment::NotPaid);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn not_paid_when_member_row_missing_and_no_pending_payment() {
        let members = Arc::new(MockMembers::new());
        let cache = Arc::new(MockPendingPayments::new());
        let provider = Arc::new(StubPaymentProvider::returning(OrderState::Completed));

        let result = handler(&members, &cache, &provider).handle(query()).await;

        assert_eq!(result, MembershipPayment::NotPaid);
    }

    #[tokio::test]
    async fn not_paid_and_cache_kept_for_each_incomplete_state() {
        for state in [
            OrderState::Open,
            OrderState::Draft,
            OrderState::Canceled,
            OrderState::Unknown("PENDING_REVIEW".to_string()),
        ] {
            let members = Arc::new(MockMembers::with_member(&test_user_id(), None));
            let cache = Arc::new(MockPendingPayments::with_order(&test_user_id(), "order-1"));
            let provider = Arc::new(StubPaymentProvider::returning(state.clone()));

            let result = handler(&members, &cache, &provider).handle(query()).await;

            assert_eq!(result, MembershipPayment::NotPaid, "state {}", state);
            assert!(cache.contains(&test_user_id()));
            assert_eq!(cache.delete_count(), 0);
            assert_eq!(members.update_count(), 0);
        }
    }

    #[tokio::test]
    async fn not_paid_and_cache_kept_when_state_differs_in_case() {
        let members = Arc::new(MockMembers::with_member(&test_user_id(), None));
        let cache = Arc::new(MockPendingPayments::with_order(&test_user_id(), "order-1"));
        let provider = Arc::new(StubPaymentProvider::returning(OrderState::from_provider(
            "completed",
        )));

        let result = handler(&members, &cache, &provider).handle(query()).await;

        assert_eq!(result, MembershipPayment::NotPaid);
        assert!(cache.contains(&test_user_id()));
        assert_eq!(cache.delete_count(), 0);
        assert_eq!(members.update_count(), 0);
    }

    #[tokio::test]
    async fn not_paid_and_cache_kept_when_provider_fails() {
        let members = Arc::new(MockMembers::with_member(&test_user_id(), None));
        let cache = Arc::new(MockPendingPayments::with_order(&test_user_id(), "order-1"));
        let provider = Arc::new(StubPaymentProvider::failing());

        let result = handler(&members, &cache, &provider).handle(query()).await;

        assert_eq!(result, MembershipPayment::NotPaid);
        assert_eq!(provider.call_count(), 1);
        assert!(cache.contains(&test_user_id()));
        assert_eq!(members.update_count(), 0);
    }

    #[tokio::test]
    async fn not_paid_when_member_lookup_fails() {
        let members = Arc::new(MockMembers::failing_read());
        let cache = Arc::new(MockPendingPayments::with_order(&test_user_id(), "order-1"));
        let provider = Arc::new(StubPaymentProvider::returning(OrderState::Completed));

        let result = handler(&members, &cache, &provider).handle(query()).await;

        assert_eq!(result, MembershipPayment::NotPaid);
        assert_eq!(cache.get_count(), 0);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn not_paid_when_cache_read_fails() {
        let members = Arc::new(MockMembers::with_member(&test_user_id(), None));
        let cache = Arc::new(MockPendingPayments::failing());
        let provider = Arc::new(StubPaymentProvider::returning(OrderState::Completed));

        let result = handler(&members, &cache, &provider).handle(query()).await;

        assert_eq!(result, MembershipPayment::NotPaid);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn not_paid_and_cache_kept_when_expiry_update_fails() {
        let members = Arc::new(MockMembers::failing_update(&test_user_id()));
        let cache = Arc::new(MockPendingPayments::with_order(&test_user_id(), "order-1"));
        let provider = Arc::new(StubPaymentProvider::returning(OrderState::Completed));

        let result = handler(&members, &cache, &provider).handle(query()).await;

        assert_eq!(result, MembershipPayment::NotPaid);
        assert_eq!(members.update_count(), 1);
        assert!(cache.contains(&test_user_id()));
        assert_eq!(cache.delete_count(), 0);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Completed Order Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn completed_order_sets_next_year_expiry_and_clears_cache() {
        let members = Arc::new(MockMembers::with_member(&test_user_id(), None));
        let cache = Arc::new(MockPendingPayments::with_order(&test_user_id(), "order-1"));
        let provider = Arc::new(StubPaymentProvider::returning(OrderState::Completed));
        let expected = next_membership_expiry(Timestamp::now()).unwrap();

        let result = handler(&members, &cache, &provider).handle(query()).await;

        assert_eq!(
            result,
            MembershipPayment::Paid {
                membership_expires_at: expected
            }
        );
        assert!(!cache.contains(&test_user_id()));
        assert_eq!(members.update_count(), 1);
    }

    #[tokio::test]
    async fn paid_even_when_cache_delete_fails() {
        let members = Arc::new(MockMembers::with_member(&test_user_id(), None));
        let cache = Arc::new(MockPendingPayments {
            fail_delete: true,
            ..MockPendingPayments::with_order(&test_user_id(), "order-1")
        });
        let provider = Arc::new(StubPaymentProvider::returning(OrderState::Completed));

        let result = handler(&members, &cache, &provider).handle(query()).await;

        assert!(result.is_paid());
        assert_eq!(cache.delete_count(), 1);
    }

    #[tokio::test]
    async fn second_verification_hits_stored_expiry() {
        let members = Arc::new(MockMembers::with_member(&test_user_id(), None));
        let cache = Arc::new(MockPendingPayments::with_order(&test_user_id(), "order-1"));
        let provider = Arc::new(StubPaymentProvider::returning(OrderState::Completed));
        let handler = handler(&members, &cache, &provider);

        let first = handler.handle(query()).await;
        let second = handler.handle(query()).await;

        assert!(first.is_paid());
        assert_eq!(first, second);
        assert_eq!(provider.call_count(), 1);
        assert_eq!(members.update_count(), 1);
    }
}
