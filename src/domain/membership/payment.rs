//! Outcome of a membership payment verification.

use serde::Serialize;

use crate::domain::foundation::Timestamp;

/// Whether a user has paid for their membership.
///
/// Serializes as `{"paid":true,"membershipExpiresAt":"..."}` or `{"paid":false}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "MembershipPaymentBody")]
pub enum MembershipPayment {
    /// Membership is paid through the given expiry.
    Paid { membership_expires_at: Timestamp },

    /// No payment on record, pending, failed, or unverifiable.
    NotPaid,
}

impl MembershipPayment {
    /// Returns true for the paid outcome.
    pub fn is_paid(&self) -> bool {
        matches!(self, MembershipPayment::Paid { .. })
    }

    /// Expiry of a paid membership.
    pub fn membership_expires_at(&self) -> Option<Timestamp> {
        match self {
            MembershipPayment::Paid {
                membership_expires_at,
            } => Some(*membership_expires_at),
            MembershipPayment::NotPaid => None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MembershipPaymentBody {
    paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    membership_expires_at: Option<Timestamp>,
}

impl From<MembershipPayment> for MembershipPaymentBody {
    fn from(payment: MembershipPayment) -> Self {
        Self {
            paid: payment.is_paid(),
            membership_expires_at: payment.membership_expires_at(),
        }
    }
}
