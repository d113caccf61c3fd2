//! Expiry updater port (write side).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::membership::MemberKey;

/// Computes and persists a member's new membership expiry.
///
/// Implementations apply [`next_membership_expiry`] to the current time and
/// must be idempotent within a calendar year: repeated calls write and return
/// the same date.
///
/// [`next_membership_expiry`]: crate::domain::membership::next_membership_expiry
#[async_trait]
pub trait ExpiryUpdater: Send + Sync {
    /// Persist the policy expiry for the member and return it.
    ///
    /// Fails with `MemberNotFound` if no member matches `key`.
    async fn update_expiry(&self, key: &MemberKey) -> Result<Timestamp, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_updater_is_object_safe() {
        fn _accepts_dyn(_updater: &dyn ExpiryUpdater) {}
    }
}
