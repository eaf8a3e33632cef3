//! Event wizard demo.
//!
//! Walks one session end to end against a JSON draft file and in-memory
//! services: restore, edit, gated navigation, submission.

use chrono::{Duration as ChronoDuration, Local, TimeZone, Utc};
use event_wizard::mocks::{MockEventService, MockOrganizerService};
use event_wizard::{
    Category, DraftEdit, FileDraftStore, MealSession, Money, UserId, WizardAction, WizardConfig,
    WizardEnvironment, WizardReducer, WizardState, WizardStore,
};
use event_wizard_core::environment::SystemClock;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EFFECT_TIMEOUT: Duration = Duration::from_secs(10);

async fn dispatch(
    store: &WizardStore,
    action: WizardAction,
) -> Result<(), Box<dyn std::error::Error>> {
    store
        .send_cascading(action)
        .await?
        .wait_with_timeout(EFFECT_TIMEOUT)
        .await?;
    Ok(())
}

async fn report(store: &WizardStore) {
    let (step, errors, dirty, saved_at) = store
        .state(|s| {
            (
                s.current_step,
                s.errors.messages(),
                s.has_unsaved_changes(),
                s.last_saved_at,
            )
        })
        .await;
    info!(%step, ?errors, dirty, ?saved_at, "Wizard state");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "event_wizard=info,event_wizard_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WizardConfig::from_env();
    config.validate()?;
    let zone = config.zone()?;
    info!(
        draft_path = %config.draft_path.display(),
        auto_save = config.auto_save,
        debounce_ms = config.auto_save_debounce_ms,
        %zone,
        "Configuration loaded"
    );

    let clock = Arc::new(SystemClock);
    let drafts = FileDraftStore::new(config.draft_path.clone(), clock);
    let organizers = MockOrganizerService::new();
    let environment = WizardEnvironment::new(
        Arc::new(drafts),
        Arc::new(MockEventService::new()),
        Arc::new(organizers.clone()),
        config,
    )?;
    let store = WizardStore::new(WizardState::new(), WizardReducer::new(), environment);

    dispatch(&store, WizardAction::LoadDraft).await?;
    report(&store).await;

    // Step 1: Next is refused until the required fields are filled in
    dispatch(&store, WizardAction::Next).await?;
    report(&store).await;

    let start = Local::now().date_naive() + ChronoDuration::days(30);
    let start = start
        .and_hms_opt(9, 0, 0)
        .and_then(|naive| Local.from_local_datetime(&naive).single())
        .map(|local| local.with_timezone(&Utc))
        .ok_or("could not build event start")?;

    let edits = vec![
        DraftEdit::SetName("Regional Meetup".to_string()),
        DraftEdit::SetVenue("Community Center".to_string()),
        DraftEdit::SetDate(Some(start)),
        DraftEdit::SetRegistrationDeadline(Some(start - ChronoDuration::days(7))),
        DraftEdit::SetMaxCapacity(120),
        DraftEdit::AddCategory(Category::new("Standard", Money::from_cents(2_500), 100)),
        DraftEdit::AddCategory(Category::new("Speaker", Money::ZERO, 20)),
        DraftEdit::AddMealSession(MealSession::new(
            "Lunch",
            Some(start + ChronoDuration::hours(3)),
            Some(start + ChronoDuration::hours(4)),
        )),
        DraftEdit::SetBadgeTemplate(Some("classic".to_string())),
        DraftEdit::AssignOrganizer(UserId::new()),
    ];
    for edit in edits {
        dispatch(&store, WizardAction::Edit(edit)).await?;
    }

    for _ in 0..5 {
        dispatch(&store, WizardAction::Next).await?;
        report(&store).await;
    }

    dispatch(&store, WizardAction::Submit).await?;

    let (submission, warning) = store
        .state(|s| (s.submission.clone(), s.assignment_warning.clone()))
        .await;
    info!(
        ?submission,
        ?warning,
        organizers = organizers.assignments().len(),
        "Submission finished"
    );

    store.shutdown(EFFECT_TIMEOUT).await?;
    Ok(())
}
