//! Payment gateway port for the one-time program fee.
//!
//! The client only needs to know when payment has completed; card handling
//! lives entirely with the provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{Timestamp, UserId};

/// Proof of a completed payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// Provider reference for support lookups.
    pub reference: String,
    pub amount_cents: u32,
    pub currency: String,
    pub paid_at: Timestamp,
}

/// Payment failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("Payment declined: {0}")]
    Declined(String),

    #[error("Payment provider unavailable: {0}")]
    Unavailable(String),
}

impl PaymentError {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentError::Unavailable(_))
    }
}

/// Port for the payment provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Runs the payment for `user_id` and resolves once it has completed.
    async fn initiate(&self, user_id: &UserId) -> Result<PaymentReceipt, PaymentError>;
}
