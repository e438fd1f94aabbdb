//! Sign-in / sign-up form.
//!
//! Sign-up creates the account and then signs in with the same credentials.
//! Any failure is kept as inline error text for the form to show.

use std::sync::Arc;

use crate::domain::foundation::{AuthError, AuthSession};
use crate::ports::{AuthService, Credentials};

const FALLBACK_ERROR: &str = "Could not complete authentication";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

pub struct AuthForm {
    auth: Arc<dyn AuthService>,
    mode: AuthMode,
    error: Option<String>,
    is_submitting: bool,
}

impl AuthForm {
    pub fn new(auth: Arc<dyn AuthService>) -> Self {
        Self {
            auth,
            mode: AuthMode::SignIn,
            error: None,
            is_submitting: false,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Switches between sign-in and sign-up, clearing any shown error.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
        self.error = None;
    }

    /// Inline error text from the last submit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Submits the form in its current mode. `name` is ignored on sign-in.
    ///
    /// Returns the new session, or `None` with `error()` set.
    pub async fn submit(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Option<AuthSession> {
        self.is_submitting = true;
        self.error = None;

        let credentials = Credentials::new(email, password);
        let result = match self.mode {
            AuthMode::SignIn => self.auth.sign_in(&credentials).await,
            AuthMode::SignUp => self.sign_up_and_sign_in(&credentials, name).await,
        };

        self.is_submitting = false;
        match result {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::debug!(
                    mode = ?self.mode,
                    transient = e.is_transient(),
                    error = %e,
                    "Authentication failed"
                );
                self.error = Some(error_text(&e));
                None
            }
        }
    }

    async fn sign_up_and_sign_in(
        &self,
        credentials: &Credentials,
        name: &str,
    ) -> Result<AuthSession, AuthError> {
        self.auth.sign_up(credentials, name).await?;
        self.auth.sign_in(credentials).await
    }
}

fn error_text(error: &AuthError) -> String {
    let text = error.to_string();
    if text.trim().is_empty() {
        FALLBACK_ERROR.to_string()
    } else {
        text
    }
}
