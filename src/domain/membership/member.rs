//! Member record as seen by the payment verifier.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, Timestamp, UserId};

/// A member's identity and paid-through date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Internal primary key.
    pub id: MemberId,

    /// End of the paid membership; `None` if never paid or not yet verified.
    pub membership_expires_at: Option<Timestamp>,
}

impl MemberRecord {
    /// Returns the stored expiry if the member has paid.
    pub fn paid_until(&self) -> Option<Timestamp> {
        self.membership_expires_at
    }
}

/// How a member is addressed when writing to the member store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKey {
    /// External auth-provider user id.
    External(UserId),

    /// Internal member primary key.
    Internal(MemberId),
}

impl MemberKey {
    /// Short label for the key kind, used in logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            MemberKey::External(_) => "external_id",
            MemberKey::Internal(_) => "id",
        }
    }
}

impl std::fmt::Display for MemberKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberKey::External(user_id) => write!(f, "{}={}", self.kind(), user_id),
            MemberKey::Internal(member_id) => write!(f, "{}={}", self.kind(), member_id),
        }
    }
}
