//! Demo walkthrough: one user from sign-up to the first completed day.
//!
//! Runs against the in-memory adapters unless `VACUO__BACKEND__URL` is set,
//! in which case it only resolves the stored session against the hosted
//! backend.

use std::sync::Arc;

use vacuo_pro::adapters::{
    BackendClient, GoTrueAuthService, InMemoryAuthService, InMemoryProfileStore,
    PostgrestProfileStore, SimulatedPaymentGateway,
};
use vacuo_pro::application::{AuthForm, SessionController};
use vacuo_pro::config::AppConfig;
use vacuo_pro::domain::program::{ChecklistItem, Questionnaire};
use vacuo_pro::domain::session::ContactForm;
use vacuo_pro::telemetry;

type DemoResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> DemoResult {
    let config = AppConfig::load()?;
    config.validate()?;
    telemetry::init_tracing(&config.logging)?;

    let payments = Arc::new(SimulatedPaymentGateway::from_config(&config.payment));

    if config.backend.is_configured() {
        let backend = BackendClient::from_config(&config.backend)?;
        let auth = Arc::new(GoTrueAuthService::new(backend.clone()));
        let store = Arc::new(PostgrestProfileStore::new(backend));
        let mut controller = SessionController::new(auth, store, payments);
        let screen = controller.start().await;
        println!("Hosted backend session resolved to screen: {}", screen);
        return Ok(());
    }

    walkthrough(payments).await
}

async fn walkthrough(payments: Arc<SimulatedPaymentGateway>) -> DemoResult {
    let auth = Arc::new(InMemoryAuthService::new());
    let store = Arc::new(InMemoryProfileStore::new());
    let mut controller = SessionController::new(auth.clone(), store, payments);

    println!("screen: {}", controller.start().await);

    let mut form = AuthForm::new(auth);
    form.toggle_mode();
    if form.submit("Ana", "ana@example.com", "secret1").await.is_none() {
        return Err(form.error().unwrap_or("sign-up failed").into());
    }
    println!("screen: {}", controller.on_auth_success().await);
    if let Some(user) = controller.user() {
        println!("hello, {}", user.display_name_or_email());
    }

    controller.start_questionnaire()?;
    let mut questionnaire = Questionnaire::new();
    while let Some(question) = questionnaire.next_unanswered() {
        questionnaire.answer(question, question % 4)?;
    }
    println!(
        "answered {} questions ({}%)",
        questionnaire.answered_count(),
        questionnaire.progress_percent()
    );
    let answers = questionnaire.finish()?;
    let average = answers.average_score();
    let profile = controller.complete_questionnaire(answers).await?;
    println!(
        "level: {} (program {}, average {:.2})",
        profile.level(),
        profile.program_level(),
        average
    );

    controller.continue_to_payment(&ContactForm::new(
        "Ana",
        "ana@example.com",
        "+55 11 99999-0000",
    ))?;
    println!("screen: {}", controller.screen());

    let receipt = controller.complete_payment().await?;
    println!(
        "paid {} {} ({}), screen: {}",
        receipt.amount_cents,
        receipt.currency,
        receipt.reference,
        controller.screen()
    );

    if let Some(exercise) = controller.today_exercise() {
        println!(
            "today: {} - {} min, {} steps",
            exercise.title,
            exercise.duration_minutes,
            exercise.instructions.len()
        );
    }

    for item in ChecklistItem::ALL {
        let toggle = controller.toggle_checklist_item(item).await?;
        let checked = controller
            .profile()
            .map(|profile| profile.checklist().checked_count())
            .unwrap_or_default();
        println!(
            "checked {}: {}/{}, {} points",
            item.label(),
            checked,
            ChecklistItem::ALL.len(),
            toggle.points
        );
    }

    if let Some(done) = controller.complete_day().await? {
        println!(
            "day {} done, now on day {} (streak {}, {} points)",
            done.completed_day, done.current_day, done.streak, done.points
        );
    }

    if let Some(summary) = controller.progress() {
        println!(
            "week {}: {}% of week, {}% of program",
            summary.current_week, summary.week_progress_percent, summary.total_progress_percent
        );
    }

    controller.sign_out().await?;
    println!("screen: {}", controller.screen());
    Ok(())
}
