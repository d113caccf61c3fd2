//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::telemetry::Environment;

const SQUARE_PRODUCTION_URL: &str = "https://connect.squareup.com";
const SQUARE_SANDBOX_URL: &str = "https://connect.squareupsandbox.com";

/// Square account environment
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentEnvironment {
    #[default]
    Sandbox,
    Production,
}

/// Payment configuration (Square)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Square access token
    pub square_access_token: SecretString,

    /// Which Square environment the token belongs to
    #[serde(default)]
    pub square_environment: PaymentEnvironment,

    /// Override for the API base URL
    pub square_api_base_url: Option<String>,

    /// Value sent in the `Square-Version` header
    #[serde(default = "default_api_version")]
    pub square_api_version: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl PaymentConfig {
    /// Create a sandbox configuration for the given token
    pub fn sandbox(access_token: impl Into<String>) -> Self {
        Self {
            square_access_token: SecretString::new(access_token.into()),
            square_environment: PaymentEnvironment::Sandbox,
            square_api_base_url: None,
            square_api_version: default_api_version(),
            timeout_secs: default_timeout(),
        }
    }

    /// Base URL for API requests
    pub fn api_base_url(&self) -> &str {
        match (&self.square_api_base_url, self.square_environment) {
            (Some(url), _) => url.trim_end_matches('/'),
            (None, PaymentEnvironment::Production) => SQUARE_PRODUCTION_URL,
            (None, PaymentEnvironment::Sandbox) => SQUARE_SANDBOX_URL,
        }
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate payment configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.square_access_token.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("SQUARE_ACCESS_TOKEN"));
        }
        if self.square_api_version.is_empty() {
            return Err(ValidationError::MissingRequired("SQUARE_API_VERSION"));
        }
        if !self.api_base_url().starts_with("https://") {
            return Err(ValidationError::PaymentUrlMustBeHttps);
        }
        if *environment == Environment::Production
            && self.square_environment == PaymentEnvironment::Sandbox
        {
            return Err(ValidationError::SandboxInProduction);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout("payment timeout_secs"));
        }
        Ok(())
    }
}

fn default_api_version() -> String {
    "2024-01-18".to_string()
}

fn default_timeout() -> u64 {
    10
}
