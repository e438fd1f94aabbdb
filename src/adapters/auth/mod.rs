//! Authentication adapters.
//!
//! Implementations of the `AuthService` port:
//!
//! - `in_memory` - accounts kept in process, for tests and offline runs
//! - `gotrue` - hosted GoTrue-compatible auth server over HTTP

mod gotrue;
mod in_memory;

pub use gotrue::GoTrueAuthService;
pub use in_memory::{InMemoryAuthService, MIN_PASSWORD_LEN};
