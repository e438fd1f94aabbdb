//! Authentication types for the domain layer.
//!
//! These types describe who is signed in. They have **no provider
//! dependencies** - the in-memory adapter and the hosted-backend adapter
//! both populate them through the `AuthService` port.

use secrecy::SecretString;
use thiserror::Error;

use super::{Timestamp, UserId};

/// A signed-in user as reported by the auth backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth backend.
    pub id: UserId,

    /// Email the user signed in with.
    pub email: String,

    /// Name given at sign-up, if any.
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
        }
    }

    /// Returns the user's display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// An active session: the user plus the bearer token for backend calls.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: AuthenticatedUser,

    /// Access token sent to the database backend. Redacted in `Debug`.
    pub access_token: SecretString,

    /// When the token stops being accepted, if the backend told us.
    pub expires_at: Option<Timestamp>,
}

impl AuthSession {
    pub fn new(user: AuthenticatedUser, access_token: SecretString) -> Self {
        Self {
            user,
            access_token,
            expires_at: None,
        }
    }

    pub fn with_expiry(mut self, expires_at: Timestamp) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn user_id(&self) -> &UserId {
        &self.user.id
    }

    /// Returns true once `now` is past the expiry. Sessions without an
    /// expiry never expire locally.
    pub fn is_expired_at(&self, now: &Timestamp) -> bool {
        self.expires_at
            .map(|expires_at| now.is_after(&expires_at))
            .unwrap_or(false)
    }
}

/// Authentication errors.
///
/// The `Display` text is what the sign-in form shows inline, so it is
/// written for the end user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Email/password pair was rejected.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Sign-up attempted with an email that already has an account.
    #[error("An account with this email already exists")]
    EmailTaken,

    /// Sign-up input the backend refused (weak password, bad email...).
    #[error("{0}")]
    Rejected(String),

    /// The session token is missing, malformed or expired.
    #[error("Your session has expired, please sign in again")]
    InvalidToken,

    /// Token is valid but the user no longer exists.
    #[error("User not found")]
    UserNotFound,

    /// The authentication service is unreachable or misbehaving.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("user-123").unwrap(),
            "ana@example.com",
            Some("Ana".to_string()),
        )
    }

    #[test]
    fn display_name_or_email_prefers_name() {
        assert_eq!(test_user().display_name_or_email(), "Ana");
    }

    #[test]
    fn display_name_or_email_falls_back_to_email() {
        let user = AuthenticatedUser::new(UserId::new("u").unwrap(), "bob@example.com", None);
        assert_eq!(user.display_name_or_email(), "bob@example.com");
    }

    #[test]
    fn session_without_expiry_never_expires() {
        let session = AuthSession::new(test_user(), SecretString::new("tok".into()));
        assert!(!session.is_expired_at(&Timestamp::now().plus_secs(1_000_000)));
    }

    #[test]
    fn session_expires_after_deadline() {
        let now = Timestamp::now();
        let session =
            AuthSession::new(test_user(), SecretString::new("tok".into())).with_expiry(now);
        assert!(session.is_expired_at(&now.plus_secs(1)));
        assert!(!session.is_expired_at(&now));
    }

    #[test]
    fn session_debug_does_not_leak_token() {
        let session = AuthSession::new(test_user(), SecretString::new("super-secret".into()));
        assert!(!format!("{:?}", session).contains("super-secret"));
    }

    #[test]
    fn auth_error_messages_are_user_facing() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
        assert_eq!(
            AuthError::service_unavailable("timeout").to_string(),
            "Auth service unavailable: timeout"
        );
    }

    #[test]
    fn auth_error_classification() {
        assert!(AuthError::service_unavailable("x").is_transient());
        assert!(!AuthError::EmailTaken.is_transient());
    }
}
