//! Payment provider order state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of an order as reported by the payment provider.
///
/// Only [`OrderState::Completed`] means the funds were captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    /// Order created, payment not yet captured.
    Open,

    /// Payment captured.
    Completed,

    /// Order cancelled by the buyer or merchant.
    Canceled,

    /// Order not yet submitted.
    Draft,

    /// A state this service does not recognise.
    #[serde(untagged)]
    Unknown(String),
}

impl OrderState {
    /// Parses the provider's wire representation (`"COMPLETED"`, `"OPEN"`, ...).
    ///
    /// Matching is exact; any other spelling becomes `Unknown`.
    pub fn from_provider(state: &str) -> Self {
        match state {
            "OPEN" => OrderState::Open,
            "COMPLETED" => OrderState::Completed,
            "CANCELED" => OrderState::Canceled,
            "DRAFT" => OrderState::Draft,
            _ => OrderState::Unknown(state.to_string()),
        }
    }

    /// Returns true if the order's payment has been captured.
    pub fn is_completed(&self) -> bool {
        matches!(self, OrderState::Completed)
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderState::Open => write!(f, "OPEN"),
            OrderState::Completed => write!(f, "COMPLETED"),
            OrderState::Canceled => write!(f, "CANCELED"),
            OrderState::Draft => write!(f, "DRAFT"),
            OrderState::Unknown(other) => write!(f, "{}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_provider_states() {
        assert_eq!(OrderState::from_provider("OPEN"), OrderState::Open);
        assert_eq!(OrderState::from_provider("COMPLETED"), OrderState::Completed);
        assert_eq!(OrderState::from_provider("CANCELED"), OrderState::Canceled);
        assert_eq!(OrderState::from_provider("DRAFT"), OrderState::Draft);
    }

    #[test]
    fn lowercase_completed_is_not_completed() {
        let state = OrderState::from_provider("completed");
        assert_eq!(state, OrderState::Unknown("completed".to_string()));
        assert!(!state.is_completed());
    }

    #[test]
    fn unrecognised_state_is_preserved() {
        let state = OrderState::from_provider("PARTIALLY_REFUNDED");
        assert_eq!(state, OrderState::Unknown("PARTIALLY_REFUNDED".to_string()));
        assert_eq!(state.to_string(), "PARTIALLY_REFUNDED");
    }

    #[test]
    fn only_completed_counts_as_paid() {
        assert!(OrderState::Completed.is_completed());
        assert!(!OrderState::Open.is_completed());
        assert!(!OrderState::Canceled.is_completed());
        assert!(!OrderState::Draft.is_completed());
        assert!(!OrderState::Unknown("COMPLETED_LATER".to_string()).is_completed());
    }

    #[test]
    fn deserializes_from_wire_format() {
        let state: OrderState = serde_json::from_str("\"COMPLETED\"").unwrap();
        assert_eq!(state, OrderState::Completed);

        let state: OrderState = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(state, OrderState::Unknown("SOMETHING_NEW".to_string()));
    }
}
