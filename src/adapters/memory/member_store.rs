//! In-memory member store.
//!
//! Implements both `MemberStore` and `ExpiryUpdater` over one shared map so
//! a write made by the updater is visible to subsequent lookups.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, Timestamp, UserId};
use crate::domain::membership::{next_membership_expiry, MemberKey, MemberRecord};
use crate::ports::{ExpiryUpdater, MemberStore};

/// In-memory members table keyed by external user id.
///
/// Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberStore {
    members: Arc<RwLock<HashMap<UserId, MemberRecord>>>,
}

impl InMemoryMemberStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an unpaid member for the user and returns its id.
    pub async fn add_member(&self, user_id: UserId) -> MemberId {
        let record = MemberRecord {
            id: MemberId::new(),
            membership_expires_at: None,
        };
        let id = record.id;
        self.insert(user_id, record).await;
        id
    }

    /// Inserts or replaces the record for a user.
    pub async fn insert(&self, user_id: UserId, record: MemberRecord) {
        self.members.write().await.insert(user_id, record);
    }

    /// Returns the current record for a user.
    pub async fn get(&self, user_id: &UserId) -> Option<MemberRecord> {
        self.members.read().await.get(user_id).cloned()
    }
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<MemberRecord>, DomainError> {
        Ok(self.get(user_id).await)
    }
}

#[async_trait]
impl ExpiryUpdater for InMemoryMemberStore {
    async fn update_expiry(&self, key: &MemberKey) -> Result<Timestamp, DomainError> {
        let expiry = next_membership_expiry(Timestamp::now())?;
        let mut members = self.members.write().await;

        let record = match key {
            MemberKey::External(user_id) => members.get_mut(user_id),
            MemberKey::Internal(member_id) => members.values_mut().find(|r| r.id == *member_id),
        };

        match record {
            Some(record) => {
                record.membership_expires_at = Some(expiry);
                Ok(expiry)
            }
            None => Err(DomainError::new(
                ErrorCode::MemberNotFound,
                format!("No member with {}", key),
            )),
        }
    }
}
