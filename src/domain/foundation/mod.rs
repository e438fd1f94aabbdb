//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, authentication types and error
//! types that the rest of the domain builds on.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthSession, AuthenticatedUser};
pub use errors::ValidationError;
pub use ids::UserId;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
