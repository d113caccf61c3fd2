//! Member store port (read side).
//!
//! Looks up a member's paid-through date by external user id.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::membership::MemberRecord;

/// Read-only lookup of members by external user id.
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Find the member linked to an external user id.
    ///
    /// Returns `None` if no member row exists for the user.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<MemberRecord>, DomainError>;
}
