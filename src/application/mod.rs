//! Application layer - orchestrates the domain over the ports.
//!
//! - `SessionController` - screen state machine driver for one client
//! - `AuthForm` - sign-in / sign-up with inline error text
//! - `ProfileSync` - best-effort mirror of the profile to the store

mod auth_form;
mod profile_sync;
mod session_controller;

pub use auth_form::{AuthForm, AuthMode};
pub use profile_sync::ProfileSync;
pub use session_controller::{ControllerError, SessionController};
