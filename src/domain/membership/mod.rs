//! Membership domain module.
//!
//! Handles member payment status and the expiry policy.
//!
//! # Module Structure
//!
//! - `expiry` - Expiry date policy for paid memberships
//! - `member` - Member record and addressing
//! - `order_state` - Payment provider order states
//! - `payment` - Verification outcome

mod expiry;
mod member;
mod order_state;
mod payment;

pub use expiry::next_membership_expiry;
pub use member::{MemberKey, MemberRecord};
pub use order_state::OrderState;
pub use payment::MembershipPayment;
