//! Integration tests for the onboarding flow.
//!
//! These tests drive `SessionController` through the in-memory adapters:
//! 1. Fresh sign-up through questionnaire, result and payment
//! 2. Returning users resolved from a persisted session
//! 3. Sign-out from any screen

use std::sync::Arc;

use secrecy::SecretString;

use vacuo_pro::adapters::{InMemoryAuthService, InMemoryProfileStore, SimulatedPaymentGateway};
use vacuo_pro::application::{AuthForm, ControllerError, SessionController};
use vacuo_pro::domain::foundation::{AuthSession, AuthenticatedUser, UserId};
use vacuo_pro::domain::program::{FitnessLevel, Questionnaire, QuestionnaireAnswers};
use vacuo_pro::domain::session::{ContactForm, Screen};
use vacuo_pro::domain::user::{AvatarColor, UserProfile};
use vacuo_pro::ports::{AuthService, Credentials, ProfileRecord, ProfileStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct App {
    auth: Arc<InMemoryAuthService>,
    store: InMemoryProfileStore,
    payments: SimulatedPaymentGateway,
    controller: SessionController,
}

impl App {
    fn new(auth: InMemoryAuthService, store: InMemoryProfileStore) -> Self {
        let auth = Arc::new(auth);
        let payments = SimulatedPaymentGateway::instant();
        let controller = SessionController::new(
            auth.clone(),
            Arc::new(store.clone()),
            Arc::new(payments.clone()),
        );
        Self {
            auth,
            store,
            payments,
            controller,
        }
    }

    fn fresh() -> Self {
        Self::new(InMemoryAuthService::new(), InMemoryProfileStore::new())
    }

    fn form(&self) -> AuthForm {
        AuthForm::new(self.auth.clone())
    }
}

fn answers(values: [u8; 12]) -> QuestionnaireAnswers {
    let mut questionnaire = Questionnaire::new();
    for (index, value) in values.into_iter().enumerate() {
        questionnaire.answer(index as u8 + 1, value).unwrap();
    }
    questionnaire.finish().unwrap()
}

fn contact() -> ContactForm {
    ContactForm::new("Ana Souza", "ana@example.com", "+55 11 98888-7777")
}

fn persisted_session(user_id: &str) -> AuthSession {
    let user = AuthenticatedUser::new(UserId::new(user_id).unwrap(), "ana@example.com", None);
    AuthSession::new(user, SecretString::new("token".to_string()))
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn new_user_completes_onboarding() {
    let mut app = App::fresh();
    assert_eq!(app.controller.start().await, Screen::Auth);

    let mut form = app.form();
    form.toggle_mode();
    let session = form
        .submit("Ana", "ana@example.com", "secret1")
        .await
        .expect("sign-up should succeed");
    assert_eq!(app.controller.on_auth_success().await, Screen::Welcome);

    app.controller.start_questionnaire().unwrap();
    assert_eq!(app.controller.screen(), Screen::Questionnaire);

    // Sum 24 -> average 2.0 -> intermediate
    let profile = app
        .controller
        .complete_questionnaire(answers([2; 12]))
        .await
        .unwrap();
    assert_eq!(profile.level(), FitnessLevel::Intermediate);
    assert_eq!(profile.program_level().value(), 2);
    assert_eq!(app.controller.screen(), Screen::Result);

    app.controller.continue_to_payment(&contact()).unwrap();
    assert_eq!(app.controller.screen(), Screen::Payment);

    let receipt = app.controller.complete_payment().await.unwrap();
    assert_eq!(receipt.currency, "BRL");
    assert_eq!(app.payments.attempts(), 1);
    assert_eq!(app.controller.screen(), Screen::Dashboard);

    let stored = app.store.record(session.user_id()).await.unwrap();
    assert!(stored.is_premium);
    assert_eq!(stored.level, FitnessLevel::Intermediate);
    assert!(stored.updated_at.is_some());
    assert_eq!(app.store.questionnaire_records().await.len(), 1);
}

#[tokio::test]
async fn boundary_average_scores_resolve_low() {
    // Sum 18 -> average exactly 1.5 -> beginner
    let mut app = App::fresh();
    app.auth
        .sign_up(&Credentials::new("ana@example.com", "secret1"), "Ana")
        .await
        .unwrap();
    app.auth
        .sign_in(&Credentials::new("ana@example.com", "secret1"))
        .await
        .unwrap();
    app.controller.process_pending_auth_events().await;
    app.controller.start_questionnaire().unwrap();

    let profile = app
        .controller
        .complete_questionnaire(answers([1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2]))
        .await
        .unwrap();
    assert_eq!(profile.level(), FitnessLevel::Beginner);
}

#[tokio::test]
async fn persisted_premium_session_opens_dashboard() {
    let user_id = UserId::new("returning-user").unwrap();
    let mut profile =
        UserProfile::from_assessment(FitnessLevel::Advanced, AvatarColor::from_hue(120));
    profile.mark_premium();
    let record = ProfileRecord::from_profile(&user_id, &profile, Default::default());

    let mut app = App::new(
        InMemoryAuthService::new().with_session(persisted_session("returning-user")),
        InMemoryProfileStore::new().with_record(record),
    );

    assert_eq!(app.controller.start().await, Screen::Dashboard);
    assert!(!app.controller.is_loading());
    assert_eq!(app.controller.profile(), Some(&profile));
}

#[tokio::test]
async fn persisted_session_without_profile_opens_welcome() {
    let mut app = App::new(
        InMemoryAuthService::new().with_session(persisted_session("new-user")),
        InMemoryProfileStore::new(),
    );

    assert_eq!(app.controller.start().await, Screen::Welcome);
    assert!(app.controller.profile().is_none());
}

#[tokio::test]
async fn invalid_contact_fields_are_reported_together() {
    let mut app = App::new(
        InMemoryAuthService::new().with_session(persisted_session("u-1")),
        InMemoryProfileStore::new(),
    );
    app.controller.start().await;
    app.controller.start_questionnaire().unwrap();
    app.controller
        .complete_questionnaire(answers([3; 12]))
        .await
        .unwrap();

    let err = app
        .controller
        .continue_to_payment(&ContactForm::new("  ", "ana@", " "))
        .unwrap_err();

    match err {
        ControllerError::InvalidContactForm(errors) => {
            assert_eq!(errors.invalid_fields(), vec!["name", "email", "phone"]);
        }
        other => panic!("expected InvalidContactForm, got {:?}", other),
    }
    assert_eq!(app.controller.screen(), Screen::Result);
}

#[tokio::test]
async fn skipping_ahead_is_rejected() {
    let mut app = App::new(
        InMemoryAuthService::new().with_session(persisted_session("u-1")),
        InMemoryProfileStore::new(),
    );
    app.controller.start().await;

    assert!(matches!(
        app.controller.complete_payment().await,
        Err(ControllerError::InvalidTransition {
            from: Screen::Welcome,
            to: Screen::Dashboard
        })
    ));
    assert!(matches!(
        app.controller.continue_to_payment(&contact()),
        Err(ControllerError::InvalidTransition { .. })
    ));
    assert_eq!(app.payments.attempts(), 0);
}

#[tokio::test]
async fn sign_out_from_each_screen_returns_to_auth() {
    let mut app = App::fresh();
    app.auth
        .sign_up(&Credentials::new("ana@example.com", "secret1"), "Ana")
        .await
        .unwrap();

    for steps in 0..5 {
        app.auth
            .sign_in(&Credentials::new("ana@example.com", "secret1"))
            .await
            .unwrap();
        app.controller.process_pending_auth_events().await;
        if app.controller.screen() == Screen::Welcome && steps > 0 {
            app.controller.start_questionnaire().unwrap();
        }
        if steps > 1 && app.controller.screen() == Screen::Questionnaire {
            app.controller
                .complete_questionnaire(answers([0; 12]))
                .await
                .unwrap();
        }
        if steps > 2 && app.controller.screen() == Screen::Result {
            app.controller.continue_to_payment(&contact()).unwrap();
        }
        if steps > 3 && app.controller.screen() == Screen::Payment {
            app.controller.complete_payment().await.unwrap();
        }

        app.auth.sign_out().await.unwrap();
        app.controller.process_pending_auth_events().await;

        assert_eq!(app.controller.screen(), Screen::Auth, "after {} steps", steps);
        assert!(app.controller.profile().is_none());
    }

    let stored: Vec<_> = app.store.questionnaire_records().await;
    assert!(!stored.is_empty());
}

#[tokio::test]
async fn profile_store_outage_does_not_block_onboarding() {
    let store = InMemoryProfileStore::new();
    store
        .set_error(vacuo_pro::ports::StoreError::unavailable("maintenance"))
        .await;
    let mut app = App::new(
        InMemoryAuthService::new().with_session(persisted_session("u-1")),
        store,
    );

    assert_eq!(app.controller.start().await, Screen::Welcome);
    app.controller.start_questionnaire().unwrap();
    app.controller
        .complete_questionnaire(answers([1; 12]))
        .await
        .unwrap();
    app.controller.continue_to_payment(&contact()).unwrap();
    app.controller.complete_payment().await.unwrap();

    assert_eq!(app.controller.screen(), Screen::Dashboard);
    assert_eq!(app.store.upsert_count().await, 0);
    assert!(app
        .store
        .fetch_profile(&UserId::new("u-1").unwrap())
        .await
        .is_err());
}
