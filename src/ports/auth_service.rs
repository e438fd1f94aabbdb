//! Auth service port: session lookup, sign-in/up/out and session events.
//!
//! The session controller subscribes exactly once, when it is built, and the
//! subscription is released when the controller is dropped.
//!
//! # Example
//!
//! ```ignore
//! let mut events = auth.subscribe();
//! auth.sign_in(&Credentials::new("ana@example.com", "secret")).await?;
//!
//! match events.next().await {
//!     Some(AuthEvent::SignedIn(session)) => println!("hi {}", session.user.email),
//!     _ => {}
//! }
//! ```

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

use crate::domain::foundation::{AuthError, AuthSession, AuthenticatedUser};

/// Change in the signed-in state.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    SignedIn(AuthSession),
    SignedOut,
    /// Produced by the subscription, never sent by a service: the
    /// subscriber fell behind and `skipped` events were lost. The current
    /// session must be re-read from the service.
    Resync { skipped: u64 },
}

/// Email/password pair. The password is redacted in `Debug`.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::new(password.into()),
        }
    }
}

/// Live feed of `AuthEvent`s.
///
/// Dropping the subscription (or calling `unsubscribe`) detaches it from
/// the service; no callbacks outlive it.
#[derive(Debug)]
pub struct AuthSubscription {
    events: broadcast::Receiver<AuthEvent>,
}

impl AuthSubscription {
    pub fn new(events: broadcast::Receiver<AuthEvent>) -> Self {
        Self { events }
    }

    /// Waits for the next event. Returns `None` once the service is gone.
    ///
    /// Lost events surface as `AuthEvent::Resync`, followed by the events
    /// still retained.
    pub async fn next(&mut self) -> Option<AuthEvent> {
        match self.events.recv().await {
            Ok(event) => Some(event),
            Err(RecvError::Lagged(skipped)) => Some(lagged(skipped)),
            Err(RecvError::Closed) => None,
        }
    }

    /// Returns an already-delivered event without waiting.
    pub fn try_next(&mut self) -> Option<AuthEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Lagged(skipped)) => Some(lagged(skipped)),
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => None,
        }
    }

    /// Detaches from the service.
    pub fn unsubscribe(self) {}
}

fn lagged(skipped: u64) -> AuthEvent {
    tracing::warn!(skipped, "Auth event subscriber lagged");
    AuthEvent::Resync { skipped }
}

/// Authentication backend.
///
/// # Contract
///
/// Implementations must:
/// - Broadcast `AuthEvent::SignedIn` after a successful `sign_in`
/// - Broadcast `AuthEvent::SignedOut` after `sign_out`
/// - Return `AuthError::InvalidCredentials` for a rejected email/password
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait AuthService: Send + Sync {
    /// The session persisted from an earlier sign-in, if any.
    async fn current_session(&self) -> Result<Option<AuthSession>, AuthError>;

    /// Subscribes to session changes.
    fn subscribe(&self) -> AuthSubscription;

    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, AuthError>;

    /// Creates an account. Does not sign the user in.
    async fn sign_up(
        &self,
        credentials: &Credentials,
        name: &str,
    ) -> Result<AuthenticatedUser, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}
