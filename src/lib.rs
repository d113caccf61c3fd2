//! Membership Verifier - confirms pending membership payments
//!
//! This crate checks a member's pending payment order against the payment
//! provider and, once the order is completed, extends the membership to
//! January 1 of the following year.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
