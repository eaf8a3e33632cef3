//! Wizard session state.

use crate::error::{DraftStoreError, ServiceError, WizardError};
use crate::steps::StepValidator;
use crate::submission::{AssignmentReport, CreatedEvent};
use crate::types::{EventDraft, EventId, WizardStep};
use crate::validation::ValidationErrors;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the session is in restoring its persisted draft
///
/// While `Restoring`, edits reach the draft but are not treated as user
/// changes; the UI echoing back restored values must not mark the draft dirty
/// or schedule a save over the record being loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftMode {
    /// No load requested yet
    #[default]
    Idle,
    /// Load in flight
    Restoring,
    /// Load finished (or failed); edits are user changes
    Editing,
}

/// Outcome of the most recent checkpoint
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveStatus {
    /// Nothing saved this session
    #[default]
    Idle,
    /// Checkpoint in flight
    Saving,
    /// Last checkpoint succeeded
    Saved,
    /// Last checkpoint failed; the stored draft may be stale
    Failed(DraftStoreError),
}

/// Progress of the create-event request
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    /// Not submitted
    #[default]
    Idle,
    /// Create-event request in flight
    Submitting,
    /// Event created server-side
    Created(EventId),
    /// Create-event request failed; the draft is kept
    Failed(ServiceError),
}

impl SubmissionStatus {
    /// True while a request is pending or once the event exists
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::Submitting | Self::Created(_))
    }
}

/// State of one authoring session
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    /// Event under construction
    pub draft: EventDraft,
    /// Active step
    pub current_step: WizardStep,
    /// Errors published for the active step
    pub errors: ValidationErrors,
    /// Restore progress
    pub mode: DraftMode,
    /// Draft has user changes not yet checkpointed
    pub dirty: bool,
    /// Bumped on every user change; checkpoints carry the value they captured
    pub edit_generation: u64,
    /// When the stored draft was last written
    pub last_saved_at: Option<DateTime<Utc>>,
    /// Outcome of the last checkpoint
    pub save_status: SaveStatus,
    /// Create-event progress
    pub submission: SubmissionStatus,
    /// Event returned by the server
    pub created_event: Option<CreatedEvent>,
    /// Outcome of organizer assignment
    pub assignment: Option<AssignmentReport>,
    /// Non-blocking warning about failed organizer assignments
    pub assignment_warning: Option<String>,
    /// Last collaborator error, for display
    pub last_error: Option<WizardError>,
}

impl WizardState {
    /// Fresh session on the first step
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if there are edits the draft store has not seen
    #[must_use]
    pub const fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// True while a persisted draft is being loaded
    #[must_use]
    pub fn is_restoring(&self) -> bool {
        self.mode == DraftMode::Restoring
    }

    /// Live check behind the UI's Next button
    #[must_use]
    pub fn is_next_disabled(&self, validator: &StepValidator) -> bool {
        validator.is_next_disabled(self.current_step, &self.draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_clean() {
        let state = WizardState::new();
        assert_eq!(state.current_step, WizardStep::EventDetails);
        assert_eq!(state.mode, DraftMode::Idle);
        assert!(!state.has_unsaved_changes());
        assert!(state.is_next_disabled(&StepValidator::default()));
    }

    #[test]
    fn submission_lock() {
        assert!(!SubmissionStatus::Idle.is_locked());
        assert!(SubmissionStatus::Submitting.is_locked());
        assert!(SubmissionStatus::Created(EventId::new("evt-1")).is_locked());
        assert!(!SubmissionStatus::Failed(ServiceError::Rejected("boom".to_string())).is_locked());
    }
}
