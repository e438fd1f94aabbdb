//! Payment configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Settings for the one-time program payment.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// How long the simulated gateway takes to confirm, in milliseconds
    #[serde(default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,

    /// Program price in the smallest currency unit
    #[serde(default = "default_price_cents")]
    pub price_cents: u32,

    /// ISO 4217 currency code
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            simulated_delay_ms: default_simulated_delay_ms(),
            price_cents: default_price_cents(),
            currency: default_currency(),
        }
    }
}

fn default_simulated_delay_ms() -> u64 {
    2000
}

fn default_price_cents() -> u32 {
    999
}

fn default_currency() -> String {
    "BRL".to_string()
}

impl PaymentConfig {
    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.price_cents == 0 {
            return Err(ValidationError::InvalidPrice);
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::InvalidCurrency);
        }
        Ok(())
    }
}
