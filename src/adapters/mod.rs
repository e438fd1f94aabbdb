//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - in-memory and hosted auth services
//! - `persistence` - in-memory and hosted profile stores
//! - `payment` - simulated payment gateway
//! - `backend` - HTTP client shared by the hosted adapters

pub mod auth;
pub mod backend;
pub mod payment;
pub mod persistence;

pub use auth::{GoTrueAuthService, InMemoryAuthService};
pub use backend::{BackendClient, BackendClientError};
pub use payment::SimulatedPaymentGateway;
pub use persistence::{InMemoryProfileStore, PostgrestProfileStore};
