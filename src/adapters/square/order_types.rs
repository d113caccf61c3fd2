//! Square Orders API wire types.
//!
//! Only the fields needed to read an order's state are modelled; unknown
//! fields are ignored.

use serde::Deserialize;

/// Body of `GET /v2/orders/{order_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SquareOrderResponse {
    /// The order, absent on error responses.
    pub order: Option<SquareOrder>,

    /// Errors reported alongside (or instead of) the order.
    #[serde(default)]
    pub errors: Vec<SquareApiError>,
}

/// Square order object.
#[derive(Debug, Clone, Deserialize)]
pub struct SquareOrder {
    /// Order ID.
    pub id: String,

    /// Order state (`OPEN`, `COMPLETED`, `CANCELED`, `DRAFT`).
    pub state: String,
}

/// Error response body from any Square endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SquareErrorResponse {
    #[serde(default)]
    pub errors: Vec<SquareApiError>,
}

/// A single Square API error.
#[derive(Debug, Clone, Deserialize)]
pub struct SquareApiError {
    /// High-level category, e.g. `INVALID_REQUEST_ERROR`.
    pub category: String,

    /// Specific code, e.g. `NOT_FOUND`.
    pub code: String,

    /// Human-readable explanation.
    #[serde(default)]
    pub detail: Option<String>,
}

impl SquareApiError {
    /// Detail text, falling back to the code.
    pub fn describe(&self) -> &str {
        self.detail.as_deref().unwrap_or(&self.code)
    }
}
