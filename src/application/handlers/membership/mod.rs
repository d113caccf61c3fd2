//! Membership handlers.
//!
//! ## Queries
//! - Verify a user's membership payment

mod verify_membership_payment;

pub use verify_membership_payment::{
    VerifyMembershipPaymentHandler, VerifyMembershipPaymentQuery, VerifyMembershipPaymentResult,
};
