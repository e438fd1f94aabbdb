//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AuthService` - session lookup, sign-in/up/out, session change events
//! - `ProfileStore` - profile rows and questionnaire audit rows
//! - `PaymentGateway` - the one-time program payment

mod auth_service;
mod payment_gateway;
mod profile_store;

pub use auth_service::{AuthEvent, AuthService, AuthSubscription, Credentials};
pub use payment_gateway::{PaymentError, PaymentGateway, PaymentReceipt};
pub use profile_store::{ProfileRecord, ProfileStore, QuestionnaireRecord, StoreError};
