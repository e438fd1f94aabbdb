//! Auth adapter for a GoTrue-compatible hosted auth server.
//!
//! Endpoints used:
//! - `POST /auth/v1/token?grant_type=password` - sign in
//! - `POST /auth/v1/signup` - create an account
//! - `POST /auth/v1/logout` - revoke the current token
//!
//! The session is kept in memory for the life of the process and its access
//! token is shared with the database adapter through `BackendClient`. Session
//! events are emitted locally after each call succeeds.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::{broadcast, RwLock};

use crate::adapters::backend::{error_message, BackendClient};
use crate::domain::foundation::{AuthError, AuthSession, AuthenticatedUser, Timestamp, UserId};
use crate::ports::{AuthEvent, AuthService, AuthSubscription, Credentials};

const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<u64>,
    user: GoTrueUser,
}

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: String,
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    name: Option<String>,
}

/// Sign-up answers with the bare user, or with `{ user, session }` when
/// email confirmation is disabled.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Wrapped { user: GoTrueUser },
    Bare(GoTrueUser),
}

impl GoTrueUser {
    fn into_domain(self, fallback_email: &str) -> Result<AuthenticatedUser, AuthError> {
        let id = UserId::new(self.id).map_err(|e| {
            tracing::warn!("Auth server returned an invalid user id: {}", e);
            AuthError::service_unavailable("Auth server returned an invalid user")
        })?;
        let email = self.email.unwrap_or_else(|| fallback_email.to_string());
        Ok(AuthenticatedUser::new(id, email, self.user_metadata.name))
    }
}

/// `AuthService` backed by the hosted auth server.
pub struct GoTrueAuthService {
    backend: BackendClient,
    session: RwLock<Option<AuthSession>>,
    events: broadcast::Sender<AuthEvent>,
}

impl GoTrueAuthService {
    pub fn new(backend: BackendClient) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            backend,
            session: RwLock::new(None),
            events,
        }
    }

    fn emit(&self, event: AuthEvent) {
        let _ = self.events.send(event);
    }

    async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<reqwest::Response, AuthError> {
        self.backend
            .request(Method::POST, path)
            .await
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Auth request to {} failed: {}", path, e);
                AuthError::ServiceUnavailable(format!("Auth server unreachable: {}", e))
            })
    }
}

/// Maps an auth server failure status to the domain error.
fn classify_failure(status: StatusCode, body: &str) -> AuthError {
    let message = error_message(body);
    if status.is_server_error() {
        return AuthError::ServiceUnavailable(format!("Auth server returned {}", status));
    }
    if message.to_lowercase().contains("already registered") {
        return AuthError::EmailTaken;
    }
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AuthError::InvalidToken,
        _ if message.is_empty() => AuthError::Rejected(status.to_string()),
        _ => AuthError::Rejected(message),
    }
}

#[async_trait]
impl AuthService for GoTrueAuthService {
    async fn current_session(&self) -> Result<Option<AuthSession>, AuthError> {
        let mut session = self.session.write().await;
        let expired = session
            .as_ref()
            .map(|s| s.is_expired_at(&Timestamp::now()))
            .unwrap_or(false);
        if expired {
            tracing::debug!("Cached session expired");
            *session = None;
            self.backend.set_access_token(None).await;
            self.emit(AuthEvent::SignedOut);
        }
        Ok(session.clone())
    }

    fn subscribe(&self) -> AuthSubscription {
        AuthSubscription::new(self.events.subscribe())
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        let response = self
            .post(
                "/auth/v1/token?grant_type=password",
                json!({
                    "email": credentials.email.trim(),
                    "password": credentials.password.expose_secret(),
                }),
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // invalid_grant comes back as 400
            if status == StatusCode::BAD_REQUEST {
                tracing::debug!("Sign-in rejected: {}", error_message(&body));
                return Err(AuthError::InvalidCredentials);
            }
            return Err(classify_failure(status, &body));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse token response: {}", e);
            AuthError::ServiceUnavailable(format!("Failed to parse token response: {}", e))
        })?;

        let user = token.user.into_domain(&credentials.email)?;
        let access_token = SecretString::new(token.access_token);
        let mut session = AuthSession::new(user, access_token.clone());
        if let Some(expires_in) = token.expires_in {
            session = session.with_expiry(Timestamp::now().plus_secs(expires_in));
        }

        self.backend.set_access_token(Some(access_token)).await;
        *self.session.write().await = Some(session.clone());

        tracing::info!(user_id = %session.user_id(), "User signed in");
        self.emit(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_up(
        &self,
        credentials: &Credentials,
        name: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        let response = self
            .post(
                "/auth/v1/signup",
                json!({
                    "email": credentials.email.trim(),
                    "password": credentials.password.expose_secret(),
                    "data": { "name": name.trim() },
                }),
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &body));
        }

        let created: SignUpResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse sign-up response: {}", e);
            AuthError::ServiceUnavailable(format!("Failed to parse sign-up response: {}", e))
        })?;
        let user = match created {
            SignUpResponse::Wrapped { user } | SignUpResponse::Bare(user) => user,
        };

        let user = user.into_domain(&credentials.email)?;
        tracing::info!(user_id = %user.id, "Account created");
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let had_session = self.session.read().await.is_some();

        if had_session {
            match self.post("/auth/v1/logout", json!({})).await {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!("Logout returned {}; clearing local session", response.status());
                }
                Err(e) => {
                    tracing::warn!("Logout request failed: {}; clearing local session", e);
                }
                Ok(_) => {}
            }
        }

        if let Some(session) = self.session.write().await.take() {
            tracing::info!(user_id = %session.user_id(), "User signed out");
        }
        self.backend.set_access_token(None).await;
        self.emit(AuthEvent::SignedOut);
        Ok(())
    }
}
