//! In-memory auth service for tests and offline runs.
//!
//! Accounts live in a map keyed by email. Sessions are plain random tokens
//! and every sign-in/out is broadcast to subscribers like the hosted backend
//! would.
//!
//! # Example
//!
//! ```ignore
//! use vacuo_pro::adapters::auth::InMemoryAuthService;
//! use vacuo_pro::ports::{AuthService, Credentials};
//!
//! let auth = InMemoryAuthService::new().with_account("ana@example.com", "secret", "Ana");
//! let session = auth.sign_in(&Credentials::new("ana@example.com", "secret")).await?;
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::{broadcast, RwLock};

use crate::domain::foundation::{AuthError, AuthSession, AuthenticatedUser, Timestamp, UserId};
use crate::ports::{AuthEvent, AuthService, AuthSubscription, Credentials};

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Lifetime of issued sessions.
const SESSION_TTL_SECS: u64 = 3600;

const EVENT_CAPACITY: usize = 16;

#[derive(Debug)]
struct Account {
    user: AuthenticatedUser,
    password: SecretString,
}

#[derive(Debug, Default)]
struct AuthState {
    accounts: HashMap<String, Account>,
    session: Option<AuthSession>,
}

/// In-memory `AuthService`.
#[derive(Debug)]
pub struct InMemoryAuthService {
    state: RwLock<AuthState>,
    events: broadcast::Sender<AuthEvent>,
    /// Optional error to return for all calls (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl Default for InMemoryAuthService {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAuthService {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: RwLock::new(AuthState::default()),
            events,
            force_error: RwLock::new(None),
        }
    }

    /// Registers an account.
    pub fn with_account(
        mut self,
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let email = normalize_email(&email.into());
        let user = new_user(&email, Some(name.into()));
        self.state.get_mut().accounts.insert(
            email,
            Account {
                user,
                password: SecretString::new(password.into()),
            },
        );
        self
    }

    /// Starts with an already persisted session, as after an app restart.
    pub fn with_session(mut self, session: AuthSession) -> Self {
        self.state.get_mut().session = Some(session);
        self
    }

    /// Forces all calls to return the specified error.
    pub fn with_error(mut self, error: AuthError) -> Self {
        *self.force_error.get_mut() = Some(error);
        self
    }

    pub async fn set_error(&self, error: AuthError) {
        *self.force_error.write().await = Some(error);
    }

    /// Clears the forced error and returns to normal operation.
    pub async fn clear_error(&self) {
        *self.force_error.write().await = None;
    }

    /// Drops the current session from the backend side, e.g. token revoked.
    pub async fn revoke_session(&self) {
        self.state.write().await.session = None;
        self.emit(AuthEvent::SignedOut);
    }

    pub async fn account_count(&self) -> usize {
        self.state.read().await.accounts.len()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }

    fn emit(&self, event: AuthEvent) {
        // No subscribers is not an error.
        let _ = self.events.send(event);
    }

    async fn check_error(&self) -> Result<(), AuthError> {
        match self.force_error.read().await.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn new_user(email: &str, name: Option<String>) -> AuthenticatedUser {
    let name = name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    AuthenticatedUser::new(UserId::generate(), email, name)
}

#[async_trait]
impl AuthService for InMemoryAuthService {
    async fn current_session(&self) -> Result<Option<AuthSession>, AuthError> {
        self.check_error().await?;

        let mut state = self.state.write().await;
        let expired = state
            .session
            .as_ref()
            .map(|session| session.is_expired_at(&Timestamp::now()))
            .unwrap_or(false);
        if expired {
            tracing::debug!("Stored session expired");
            state.session = None;
            self.emit(AuthEvent::SignedOut);
        }
        Ok(state.session.clone())
    }

    fn subscribe(&self) -> AuthSubscription {
        AuthSubscription::new(self.events.subscribe())
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        self.check_error().await?;

        let email = normalize_email(&credentials.email);
        let session = {
            let mut state = self.state.write().await;
            let account = state
                .accounts
                .get(&email)
                .filter(|account| {
                    account.password.expose_secret() == credentials.password.expose_secret()
                })
                .ok_or(AuthError::InvalidCredentials)?;

            let token = SecretString::new(uuid::Uuid::new_v4().simple().to_string());
            let session = AuthSession::new(account.user.clone(), token)
                .with_expiry(Timestamp::now().plus_secs(SESSION_TTL_SECS));
            state.session = Some(session.clone());
            session
        };

        tracing::info!(user_id = %session.user_id(), "User signed in");
        self.emit(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_up(
        &self,
        credentials: &Credentials,
        name: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        self.check_error().await?;

        let email = normalize_email(&credentials.email);
        if !email.contains('@') {
            return Err(AuthError::Rejected("Unable to validate email address".into()));
        }
        if credentials.password.expose_secret().chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Rejected(format!(
                "Password should be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let mut state = self.state.write().await;
        if state.accounts.contains_key(&email) {
            return Err(AuthError::EmailTaken);
        }

        let user = new_user(&email, Some(name.to_string()));
        state.accounts.insert(
            email,
            Account {
                user: user.clone(),
                password: credentials.password.clone(),
            },
        );

        tracing::info!(user_id = %user.id, "Account created");
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.check_error().await?;

        let previous = self.state.write().await.session.take();
        if let Some(session) = previous {
            tracing::info!(user_id = %session.user_id(), "User signed out");
        }
        self.emit(AuthEvent::SignedOut);
        Ok(())
    }
}
