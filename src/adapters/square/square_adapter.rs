//! Square payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the Square Orders API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = PaymentConfig::sandbox(access_token);
//! let provider = SquarePaymentProvider::new(&config)?;
//! ```

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};

use crate::config::PaymentConfig;
use crate::domain::foundation::OrderId;
use crate::domain::membership::OrderState;
use crate::ports::{PaymentError, PaymentErrorCode, PaymentProvider};

use super::order_types::{SquareErrorResponse, SquareOrderResponse};

/// Square payment provider adapter.
///
/// Implements `PaymentProvider` by retrieving orders over HTTPS.
pub struct SquarePaymentProvider {
    access_token: SecretString,
    api_base_url: String,
    api_version: String,
    http_client: reqwest::Client,
}

impl SquarePaymentProvider {
    /// Create a new Square adapter from payment configuration.
    pub fn new(config: &PaymentConfig) -> Result<Self, PaymentError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PaymentError::new(PaymentErrorCode::Unknown, e.to_string()))?;

        Ok(Self {
            access_token: config.square_access_token.clone(),
            api_base_url: config.api_base_url().to_string(),
            api_version: config.square_api_version.clone(),
            http_client,
        })
    }

    /// URL of the retrieve-order endpoint, with the id percent-encoded.
    fn order_url(&self, order_id: &OrderId) -> Result<Url, PaymentError> {
        let mut url = Url::parse(&self.api_base_url).map_err(|e| {
            PaymentError::new(
                PaymentErrorCode::Unknown,
                format!("Invalid Square base URL: {}", e),
            )
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                PaymentError::new(PaymentErrorCode::Unknown, "Square base URL cannot have a path")
            })?
            .pop_if_empty()
            .extend(["v2", "orders", order_id.as_str()]);

        Ok(url)
    }
}

/// Map a non-success Square response to a payment error.
fn error_from_response(status: StatusCode, body: &str) -> PaymentError {
    let parsed: SquareErrorResponse = serde_json::from_str(body).unwrap_or_default();
    let first = parsed.errors.first();
    let detail = first
        .map(|e| e.describe().to_string())
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    let error = match status {
        StatusCode::NOT_FOUND => PaymentError::not_found("Order"),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            PaymentError::authentication(format!("Square rejected credentials: {}", detail))
        }
        StatusCode::TOO_MANY_REQUESTS => PaymentError::new(
            PaymentErrorCode::RateLimitExceeded,
            format!("Square rate limit: {}", detail),
        ),
        _ => PaymentError::provider(format!("Square API error: {}", detail)),
    };

    match first {
        Some(e) => error.with_provider_code(e.code.clone()),
        None => error,
    }
}

/// Extract the order state from a successful response body.
fn state_from_response(response: SquareOrderResponse) -> Result<OrderState, PaymentError> {
    if let Some(order) = response.order {
        return Ok(OrderState::from_provider(&order.state));
    }

    match response.errors.first() {
        Some(e) => Err(
            PaymentError::provider(format!("Square API error: {}", e.describe()))
                .with_provider_code(e.code.clone()),
        ),
        None => Err(PaymentError::provider("Square response did not include an order")),
    }
}

#[async_trait]
impl PaymentProvider for SquarePaymentProvider {
    async fn get_order_state(&self, order_id: &OrderId) -> Result<OrderState, PaymentError> {
        let url = self.order_url(order_id)?;

        let response = self
            .http_client
            .get(url)
            .bearer_auth(self.access_token.expose_secret())
            .header("Square-Version", &self.api_version)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = error_from_response(status, &body);
            tracing::warn!(
                order_id = %order_id,
                status = status.as_u16(),
                provider_code = ?error.provider_code,
                "Square order lookup failed"
            );
            return Err(error);
        }

        let body: SquareOrderResponse = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Square response: {}", e))
        })?;

        state_from_response(body)
    }
}

impl std::fmt::Debug for SquarePaymentProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SquarePaymentProvider")
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}
