//! Simulated payment gateway.
//!
//! Waits a fixed delay and then reports success, standing in for a real
//! checkout. Can be switched to decline for error-path tests, and tracks how
//! many payments were attempted.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::PaymentConfig;
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{PaymentError, PaymentGateway, PaymentReceipt};

#[derive(Debug, Clone)]
pub struct SimulatedPaymentGateway {
    delay: Duration,
    amount_cents: u32,
    currency: String,
    decline_reason: Option<String>,
    attempts: Arc<AtomicUsize>,
}

impl SimulatedPaymentGateway {
    pub fn new(delay: Duration, amount_cents: u32, currency: impl Into<String>) -> Self {
        Self {
            delay,
            amount_cents,
            currency: currency.into(),
            decline_reason: None,
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn from_config(config: &PaymentConfig) -> Self {
        Self::new(
            config.simulated_delay(),
            config.price_cents,
            config.currency.clone(),
        )
    }

    /// Gateway that confirms immediately, for tests.
    pub fn instant() -> Self {
        let defaults = PaymentConfig::default();
        Self::new(Duration::ZERO, defaults.price_cents, defaults.currency)
    }

    /// Every payment is declined with `reason`.
    pub fn declining(mut self, reason: impl Into<String>) -> Self {
        self.decline_reason = Some(reason.into());
        self
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn initiate(&self, user_id: &UserId) -> Result<PaymentReceipt, PaymentError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(user_id = %user_id, delay_ms = self.delay.as_millis() as u64, "Processing payment");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if let Some(reason) = &self.decline_reason {
            tracing::warn!(user_id = %user_id, "Payment declined: {}", reason);
            return Err(PaymentError::Declined(reason.clone()));
        }

        let receipt = PaymentReceipt {
            reference: format!("sim_{}", uuid::Uuid::new_v4().simple()),
            amount_cents: self.amount_cents,
            currency: self.currency.clone(),
            paid_at: Timestamp::now(),
        };
        tracing::info!(
            user_id = %user_id,
            reference = %receipt.reference,
            amount_cents = receipt.amount_cents,
            "Payment completed"
        );
        Ok(receipt)
    }
}
