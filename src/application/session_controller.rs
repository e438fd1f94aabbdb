//! SessionController - drives the screen state machine for one client.
//!
//! The controller owns the screen, the signed-in user and the in-memory
//! profile. It subscribes to auth events once, at construction, and the
//! subscription goes away with the controller.
//!
//! Every command takes `&mut self` and finishes its store write before it
//! returns, so commands against the profile never interleave. Store writes
//! are best-effort: a failed upsert is logged and the in-memory state keeps
//! the change.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{AuthError, AuthenticatedUser, StateMachine};
use crate::domain::program::{
    compute_level, exercise_for_day, ChecklistItem, Exercise, QuestionnaireAnswers,
};
use crate::domain::session::{ContactDetails, ContactForm, ContactFormErrors, Screen};
use crate::domain::user::{
    AvatarColor, ChecklistToggle, DayCompletion, PhotoSlot, ProgressSummary, UserProfile,
};
use crate::ports::{
    AuthEvent, AuthService, AuthSubscription, PaymentError, PaymentGateway, PaymentReceipt,
    ProfileStore,
};

use super::ProfileSync;

/// Errors returned by controller commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("Cannot go from {from} to {to}")]
    InvalidTransition { from: Screen, to: Screen },

    #[error("{0}")]
    InvalidContactForm(ContactFormErrors),

    #[error("No profile is loaded")]
    ProfileUnavailable,

    #[error("Progress can only change on the dashboard")]
    NotInDashboard,

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

pub struct SessionController {
    auth: Arc<dyn AuthService>,
    sync: ProfileSync,
    payments: Arc<dyn PaymentGateway>,
    events: AuthSubscription,
    screen: Screen,
    user: Option<AuthenticatedUser>,
    profile: Option<UserProfile>,
    contact: Option<ContactDetails>,
    contact_errors: ContactFormErrors,
    is_loading: bool,
}

impl SessionController {
    pub fn new(
        auth: Arc<dyn AuthService>,
        store: Arc<dyn ProfileStore>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        let events = auth.subscribe();
        Self {
            auth,
            sync: ProfileSync::new(store),
            payments,
            events,
            screen: Screen::Auth,
            user: None,
            profile: None,
            contact: None,
            contact_errors: ContactFormErrors::default(),
            is_loading: true,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.user.as_ref()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Contact details accepted on the result screen.
    pub fn contact(&self) -> Option<&ContactDetails> {
        self.contact.as_ref()
    }

    /// Fields flagged by the last rejected contact form.
    pub fn contact_errors(&self) -> ContactFormErrors {
        self.contact_errors
    }

    /// True until the initial session check has finished.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Exercise for the profile's current day.
    pub fn today_exercise(&self) -> Option<&'static Exercise> {
        self.profile
            .as_ref()
            .map(|profile| exercise_for_day(profile.current_day()))
    }

    pub fn progress(&self) -> Option<ProgressSummary> {
        self.profile.as_ref().map(ProgressSummary::from_profile)
    }

    // ───────────────────────────────────────────────────────────────
    // Session lifecycle
    // ───────────────────────────────────────────────────────────────

    /// Checks for a persisted session and resolves the first screen.
    pub async fn start(&mut self) -> Screen {
        match self.auth.current_session().await {
            Ok(Some(session)) => self.resolve_session(session.user).await,
            Ok(None) => tracing::debug!("No stored session"),
            Err(e) => tracing::warn!(error = %e, "Session check failed"),
        }
        self.is_loading = false;
        self.screen
    }

    /// Called by the auth form after a successful sign-in.
    ///
    /// Re-reads the session from the auth service. Does nothing once the
    /// session has already been resolved.
    pub async fn on_auth_success(&mut self) -> Screen {
        if self.screen != Screen::Auth {
            return self.screen;
        }
        match self.auth.current_session().await {
            Ok(Some(session)) => self.resolve_session(session.user).await,
            Ok(None) => tracing::warn!("Auth reported success but no session is stored"),
            Err(e) => tracing::warn!(error = %e, "Session check failed"),
        }
        self.screen
    }

    /// Applies one auth event.
    ///
    /// `SignedIn` only matters on the auth screen. `SignedOut` always drops
    /// the user and profile and returns to auth. `Resync` re-reads the
    /// session, since a lost event may have been a sign-out.
    pub async fn handle_auth_event(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn(session) if self.screen == Screen::Auth => {
                self.resolve_session(session.user).await;
            }
            AuthEvent::SignedIn(session) => {
                tracing::debug!(
                    user_id = %session.user_id(),
                    screen = %self.screen,
                    "Ignoring sign-in outside the auth screen"
                );
            }
            AuthEvent::SignedOut => self.reset(),
            AuthEvent::Resync { skipped } => self.resync(skipped).await,
        }
    }

    /// Applies every auth event already delivered. Returns how many there were.
    pub async fn process_pending_auth_events(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.events.try_next() {
            self.handle_auth_event(event).await;
            handled += 1;
        }
        handled
    }

    /// Waits for the next auth event and applies it. Returns false once the
    /// auth service has gone away.
    pub async fn next_auth_event(&mut self) -> bool {
        match self.events.next().await {
            Some(event) => {
                self.handle_auth_event(event).await;
                true
            }
            None => false,
        }
    }

    /// Signs out and returns to the auth screen.
    ///
    /// Events queued before the sign-out are applied first; a `SignedIn`
    /// left in the queue never outlives the sign-out.
    pub async fn sign_out(&mut self) -> Result<(), AuthError> {
        self.process_pending_auth_events().await;
        self.auth.sign_out().await?;
        self.reset();
        self.process_pending_auth_events().await;
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Onboarding flow
    // ───────────────────────────────────────────────────────────────

    pub fn start_questionnaire(&mut self) -> Result<(), ControllerError> {
        self.go_to(Screen::Questionnaire)
    }

    /// Scores the answers, creates a fresh profile and shows the result.
    pub async fn complete_questionnaire(
        &mut self,
        answers: QuestionnaireAnswers,
    ) -> Result<&UserProfile, ControllerError> {
        self.check_transition(Screen::Result)?;

        let (level, program_level) = compute_level(&answers);
        let profile = UserProfile::from_assessment(level, AvatarColor::random());

        if let Some(user) = &self.user {
            tracing::info!(
                user_id = %user.id,
                level = %level,
                program_level = program_level.value(),
                "Profile created from questionnaire"
            );
            self.sync.save(&user.id, &profile).await;
            self.sync.record_questionnaire(&user.id, &answers).await;
        }

        self.profile = Some(profile);
        self.go_to(Screen::Result)?;
        self.profile.as_ref().ok_or(ControllerError::ProfileUnavailable)
    }

    /// Validates the contact form and moves on to payment.
    ///
    /// On failure the screen stays on result and `contact_errors` marks the
    /// invalid fields.
    pub fn continue_to_payment(&mut self, form: &ContactForm) -> Result<(), ControllerError> {
        self.check_transition(Screen::Payment)?;

        match form.validate() {
            Ok(details) => {
                self.contact = Some(details);
                self.contact_errors = ContactFormErrors::default();
                self.go_to(Screen::Payment)
            }
            Err(errors) => {
                tracing::debug!(fields = ?errors.invalid_fields(), "Contact form rejected");
                self.contact_errors = errors;
                Err(ControllerError::InvalidContactForm(errors))
            }
        }
    }

    /// Runs the payment, unlocks the profile and opens the dashboard.
    ///
    /// A failed payment leaves everything as it was.
    pub async fn complete_payment(&mut self) -> Result<PaymentReceipt, ControllerError> {
        self.check_transition(Screen::Dashboard)?;
        let user_id = match (&self.user, &self.profile) {
            (Some(user), Some(_)) => user.id.clone(),
            _ => return Err(ControllerError::ProfileUnavailable),
        };

        let receipt = self.payments.initiate(&user_id).await.map_err(|e| {
            tracing::warn!(
                user_id = %user_id,
                retryable = e.is_retryable(),
                error = %e,
                "Payment failed"
            );
            e
        })?;

        if let Some(profile) = self.profile.as_mut() {
            profile.mark_premium();
        }
        self.persist().await;
        self.go_to(Screen::Dashboard)?;
        Ok(receipt)
    }

    // ───────────────────────────────────────────────────────────────
    // Dashboard
    // ───────────────────────────────────────────────────────────────

    pub async fn toggle_checklist_item(
        &mut self,
        item: ChecklistItem,
    ) -> Result<ChecklistToggle, ControllerError> {
        let toggle = self.dashboard_profile()?.toggle_checklist_item(item.id());
        self.persist().await;
        Ok(toggle)
    }

    /// Completes the current day. `Ok(None)` when the checklist is not
    /// finished; nothing is changed or saved in that case.
    pub async fn complete_day(&mut self) -> Result<Option<DayCompletion>, ControllerError> {
        let Some(completion) = self.dashboard_profile()?.complete_day() else {
            return Ok(None);
        };

        tracing::info!(
            user_id = ?self.user.as_ref().map(|u| u.id.as_str()),
            day = completion.completed_day.value(),
            streak = completion.streak,
            points = completion.points,
            "Day completed"
        );
        self.persist().await;
        Ok(Some(completion))
    }

    pub async fn set_photo(
        &mut self,
        slot: PhotoSlot,
        photo: Option<String>,
    ) -> Result<(), ControllerError> {
        self.dashboard_profile()?.set_photo(slot, photo);
        self.persist().await;
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Internals
    // ───────────────────────────────────────────────────────────────

    /// Reconciles with the service's session after lost events. A missing
    /// session or a different user returns to auth, then any new session is
    /// resolved from there.
    async fn resync(&mut self, skipped: u64) {
        let session = match self.auth.current_session().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(skipped, error = %e, "Session check after lost auth events failed");
                return;
            }
        };

        let current = self.user.as_ref().map(|user| &user.id);
        let stored = session.as_ref().map(|session| session.user_id());
        if current == stored {
            return;
        }

        tracing::info!(skipped, screen = %self.screen, "Auth session changed while events were lost");
        self.reset();
        if let Some(session) = session {
            self.resolve_session(session.user).await;
        }
    }

    async fn resolve_session(&mut self, user: AuthenticatedUser) {
        let user_id = user.id.clone();
        self.user = Some(user);

        let target = match self.sync.load(&user_id).await {
            Ok(Some(profile)) => {
                let target = if profile.is_premium() {
                    Screen::Dashboard
                } else {
                    Screen::Welcome
                };
                self.profile = Some(profile);
                target
            }
            Ok(None) => Screen::Welcome,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to load profile");
                Screen::Welcome
            }
        };

        if let Err(e) = self.go_to(target) {
            tracing::warn!(user_id = %user_id, error = %e, "Session resolved off the auth screen");
        }
    }

    fn reset(&mut self) {
        if self.screen.can_transition_to(&Screen::Auth) {
            tracing::debug!(from = %self.screen, "Returning to auth");
            self.screen = Screen::Auth;
        }
        self.user = None;
        self.profile = None;
        self.contact = None;
        self.contact_errors = ContactFormErrors::default();
    }

    fn check_transition(&self, target: Screen) -> Result<(), ControllerError> {
        self.screen
            .transition_to(target)
            .map(|_| ())
            .map_err(|_| ControllerError::InvalidTransition {
                from: self.screen,
                to: target,
            })
    }

    fn go_to(&mut self, target: Screen) -> Result<(), ControllerError> {
        self.check_transition(target)?;
        tracing::debug!(from = %self.screen, to = %target, "Screen transition");
        self.screen = target;
        Ok(())
    }

    fn dashboard_profile(&mut self) -> Result<&mut UserProfile, ControllerError> {
        if self.screen != Screen::Dashboard {
            return Err(ControllerError::NotInDashboard);
        }
        self.profile
            .as_mut()
            .ok_or(ControllerError::ProfileUnavailable)
    }

    async fn persist(&self) {
        if let (Some(user), Some(profile)) = (&self.user, &self.profile) {
            self.sync.save(&user.id, profile).await;
        }
    }
}
