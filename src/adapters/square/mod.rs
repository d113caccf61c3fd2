//! Square payment provider adapter.
//!
//! Implements the `PaymentProvider` port by retrieving orders from the
//! Square Orders API.
//!
//! # Configuration
//!
//! Required environment variables:
//! - `MEMBERSHIP_VERIFIER__PAYMENT__SQUARE_ACCESS_TOKEN`: Square access token
//! - `MEMBERSHIP_VERIFIER__PAYMENT__SQUARE_ENVIRONMENT`: `sandbox` or `production`

mod order_types;
mod square_adapter;

pub use order_types::{SquareApiError, SquareErrorResponse, SquareOrder, SquareOrderResponse};
pub use square_adapter::SquarePaymentProvider;
