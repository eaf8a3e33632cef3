//! The wizard reducer: step navigation, draft lifecycle and submission.
//!
//! # Flow
//!
//! 1. `LoadDraft` restores the persisted draft once per session
//! 2. `Edit` changes the draft; user changes arm a debounced auto-save
//! 3. `Next` is gated on the active step's validation, `Previous`/`GoTo` are not;
//!    every transition is followed by a checkpoint
//! 4. `Submit` re-validates every step, creates the event, then deletes the
//!    draft and assigns organizers in parallel

use crate::actions::WizardAction;
use crate::environment::WizardEnvironment;
use crate::state::{DraftMode, SaveStatus, SubmissionStatus, WizardState};
use crate::submission::{AssignmentReport, CreatedEvent, EventInput};
use crate::types::{DraftRecord, WizardStep};
use crate::validation::ValidationErrors;
use event_wizard_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use futures::future::join_all;
use std::sync::Arc;

/// Reducer for a wizard session.
#[derive(Clone, Copy, Debug, Default)]
pub struct WizardReducer;

impl WizardReducer {
    /// Creates a new wizard reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    // ========================================================================
    // Effects
    // ========================================================================

    /// Writes the current draft and step to the draft store
    ///
    /// Skipped while restoring (it would overwrite the record being loaded)
    /// and once the event is being or has been created.
    fn checkpoint(state: &mut WizardState, env: &WizardEnvironment) -> Effect<WizardAction> {
        if state.is_restoring() || state.submission.is_locked() {
            return Effect::None;
        }

        state.save_status = SaveStatus::Saving;
        let generation = state.edit_generation;
        let draft = state.draft.clone();
        let step = state.current_step;
        let drafts = Arc::clone(&env.drafts);

        Effect::future(async move {
            match drafts.save_draft(draft, step).await {
                Ok(record) => Some(WizardAction::DraftSaved { record, generation }),
                Err(error) => Some(WizardAction::DraftSaveFailed { error }),
            }
        })
    }

    /// Arms (or immediately runs) the auto-save for the current generation
    fn schedule_auto_save(state: &mut WizardState, env: &WizardEnvironment) -> Effect<WizardAction> {
        if !env.config.auto_save || !state.draft.has_seed_content() {
            return Effect::None;
        }

        let debounce = env.config.auto_save_debounce();
        if debounce.is_zero() {
            return Self::checkpoint(state, env);
        }

        Effect::Delay {
            duration: debounce,
            action: Box::new(WizardAction::AutoSaveTick {
                generation: state.edit_generation,
            }),
        }
    }

    fn load(env: &WizardEnvironment) -> Effect<WizardAction> {
        let drafts = Arc::clone(&env.drafts);
        Effect::future(async move {
            match drafts.load_draft().await {
                Ok(record) => Some(WizardAction::DraftLoaded { record }),
                Err(error) => Some(WizardAction::DraftLoadFailed { error }),
            }
        })
    }

    fn create_event(input: EventInput, env: &WizardEnvironment) -> Effect<WizardAction> {
        let events = Arc::clone(&env.events);
        Effect::future(async move {
            match events.create_event(input).await {
                Ok(event) => Some(WizardAction::EventCreated { event }),
                Err(error) => Some(WizardAction::SubmissionFailed { error }),
            }
        })
    }

    fn delete_draft(env: &WizardEnvironment) -> Effect<WizardAction> {
        let drafts = Arc::clone(&env.drafts);
        Effect::future(async move {
            match drafts.delete_draft().await {
                Ok(()) => Some(WizardAction::DraftDeleted),
                Err(error) => Some(WizardAction::DraftDeleteFailed { error }),
            }
        })
    }

    /// One independent assignment per organizer, collected into a report
    fn assign_organizers(
        state: &WizardState,
        event: &CreatedEvent,
        env: &WizardEnvironment,
    ) -> Effect<WizardAction> {
        let users = state.draft.assigned_organizers.clone();
        if users.is_empty() {
            return Effect::None;
        }

        let organizers = Arc::clone(&env.organizers);
        let event_id = event.id.clone();

        Effect::future(async move {
            let results = join_all(users.iter().map(|&user| {
                let organizers = &organizers;
                let event_id = event_id.clone();
                async move { (user, organizers.assign_manager(event_id, user).await) }
            }))
            .await;

            let mut report = AssignmentReport::default();
            for (user, result) in results {
                match result {
                    Ok(()) => report.assigned.push(user),
                    Err(error) => report.failed.push((user, error.to_string())),
                }
            }
            Some(WizardAction::OrganizersAssigned { report })
        })
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    fn restore(state: &mut WizardState, record: Option<DraftRecord>) {
        if let Some(record) = record {
            tracing::debug!(
                step = %record.current_step,
                saved_at = %record.last_saved_at,
                "Restored draft"
            );
            state.draft = record.draft_data;
            state.current_step = record.current_step;
            state.last_saved_at = Some(record.last_saved_at);
            state.save_status = SaveStatus::Saved;
        }
        state.errors = ValidationErrors::new();
        state.dirty = false;
        state.mode = DraftMode::Editing;
    }

    fn move_to(
        state: &mut WizardState,
        step: WizardStep,
        env: &WizardEnvironment,
    ) -> SmallVec<[Effect<WizardAction>; 4]> {
        tracing::debug!(from = %state.current_step, to = %step, "Step transition");
        state.errors = ValidationErrors::new();
        state.current_step = step;
        smallvec![Self::checkpoint(state, env)]
    }

    fn submit(state: &mut WizardState, env: &WizardEnvironment) -> SmallVec<[Effect<WizardAction>; 4]> {
        if state.submission.is_locked() {
            tracing::debug!(status = ?state.submission, "Submit ignored");
            return SmallVec::new();
        }

        if let Some((step, errors)) = env.validator.validate_all(&state.draft) {
            tracing::debug!(step = %step, errors = errors.len(), "Submission blocked");
            state.current_step = step;
            state.errors = errors;
            return SmallVec::new();
        }

        state.errors = ValidationErrors::new();
        state.submission = SubmissionStatus::Submitting;
        state.last_error = None;
        smallvec![Self::create_event(EventInput::from(&state.draft), env)]
    }
}

impl Reducer for WizardReducer {
    type State = WizardState;
    type Action = WizardAction;
    type Environment = WizardEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Draft lifecycle ==========
            WizardAction::LoadDraft => {
                if state.mode != DraftMode::Idle {
                    return SmallVec::new();
                }
                state.mode = DraftMode::Restoring;
                smallvec![Self::load(env)]
            },

            WizardAction::DraftLoaded { record } => {
                Self::restore(state, record);
                SmallVec::new()
            },

            WizardAction::DraftLoadFailed { error } => {
                tracing::warn!(%error, "Failed to load draft");
                state.last_error = Some(error.into());
                state.mode = DraftMode::Editing;
                SmallVec::new()
            },

            WizardAction::Edit(edit) => {
                let changed = state.draft.apply(edit);
                if !changed || state.is_restoring() {
                    return SmallVec::new();
                }
                state.dirty = true;
                state.edit_generation += 1;
                smallvec![Self::schedule_auto_save(state, env)]
            },

            WizardAction::AutoSaveTick { generation } => {
                let current = generation == state.edit_generation;
                if !current || !state.dirty || !state.draft.has_seed_content() {
                    return SmallVec::new();
                }
                smallvec![Self::checkpoint(state, env)]
            },

            WizardAction::SaveNow => smallvec![Self::checkpoint(state, env)],

            WizardAction::DraftSaved { record, generation } => {
                state.last_saved_at = Some(record.last_saved_at);
                state.save_status = SaveStatus::Saved;
                // A checkpoint taken before the latest edit leaves the draft dirty
                if generation == state.edit_generation {
                    state.dirty = false;
                }
                SmallVec::new()
            },

            WizardAction::DraftSaveFailed { error } => {
                tracing::warn!(%error, "Failed to save draft");
                state.save_status = SaveStatus::Failed(error.clone());
                state.last_error = Some(error.into());
                SmallVec::new()
            },

            WizardAction::DraftDeleted => {
                state.last_saved_at = None;
                state.save_status = SaveStatus::Idle;
                SmallVec::new()
            },

            WizardAction::DraftDeleteFailed { error } => {
                tracing::warn!(%error, "Failed to delete submitted draft");
                state.last_error = Some(error.into());
                SmallVec::new()
            },

            // ========== Navigation ==========
            WizardAction::Next => {
                let errors = env.validator.validate(state.current_step, &state.draft);
                if !errors.is_empty() {
                    tracing::debug!(
                        step = %state.current_step,
                        errors = errors.len(),
                        "Next blocked by validation"
                    );
                    state.errors = errors;
                    return SmallVec::new();
                }
                let next = state.current_step.next();
                Self::move_to(state, next, env)
            },

            WizardAction::Previous => {
                let previous = state.current_step.previous();
                Self::move_to(state, previous, env)
            },

            WizardAction::GoTo(step) => Self::move_to(state, step, env),

            // ========== Submission ==========
            WizardAction::Submit => Self::submit(state, env),

            WizardAction::EventCreated { event } => {
                tracing::info!(event_id = %event.id, name = %event.name, "Event created");
                state.submission = SubmissionStatus::Created(event.id.clone());
                state.dirty = false;

                let effects = vec![
                    Self::delete_draft(env),
                    Self::assign_organizers(state, &event, env),
                ];
                state.created_event = Some(event);
                smallvec![Effect::merge(effects)]
            },

            WizardAction::SubmissionFailed { error } => {
                tracing::warn!(%error, "Event creation failed");
                state.submission = SubmissionStatus::Failed(error.clone());
                state.last_error = Some(error.into());
                SmallVec::new()
            },

            WizardAction::OrganizersAssigned { report } => {
                state.assignment_warning = report.warning();
                if let Some(warning) = &state.assignment_warning {
                    tracing::warn!(%warning, "Organizer assignment incomplete");
                } else {
                    tracing::info!(assigned = report.assigned.len(), "Organizers assigned");
                }
                state.assignment = Some(report);
                SmallVec::new()
            },
        }
    }
}
