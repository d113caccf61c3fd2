//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `membership` - Member payment status and expiry policy

pub mod foundation;
pub mod membership;
