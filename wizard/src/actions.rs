//! Actions processed by the wizard reducer.

use crate::edit::DraftEdit;
use crate::error::{DraftStoreError, ServiceError};
use crate::submission::{AssignmentReport, CreatedEvent};
use crate::types::{DraftRecord, WizardStep};
use serde::{Deserialize, Serialize};

/// Everything that can happen to a wizard session
///
/// Commands come from the UI; the rest are results fed back by effects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardAction {
    // Commands
    /// Fetch the persisted draft (once per session)
    LoadDraft,
    /// Change the draft
    Edit(DraftEdit),
    /// Validate the active step and advance
    Next,
    /// Go back one step
    Previous,
    /// Jump to a step
    GoTo(WizardStep),
    /// Checkpoint now
    SaveNow,
    /// Debounce timer for auto-save fired
    AutoSaveTick {
        /// Edit generation that armed the timer
        generation: u64,
    },
    /// Validate everything and create the event
    Submit,

    // Results
    /// Draft store answered the load
    DraftLoaded {
        /// Stored record, if one exists
        record: Option<DraftRecord>,
    },
    /// Draft store load failed
    DraftLoadFailed {
        /// Store failure
        error: DraftStoreError,
    },
    /// Checkpoint written
    DraftSaved {
        /// Record as stored
        record: DraftRecord,
        /// Edit generation the checkpoint captured
        generation: u64,
    },
    /// Checkpoint failed
    DraftSaveFailed {
        /// Store failure
        error: DraftStoreError,
    },
    /// Stored draft removed after creation
    DraftDeleted,
    /// Stored draft could not be removed
    DraftDeleteFailed {
        /// Store failure
        error: DraftStoreError,
    },
    /// Event created server-side
    EventCreated {
        /// Server's answer
        event: CreatedEvent,
    },
    /// Event creation failed
    SubmissionFailed {
        /// Service failure
        error: ServiceError,
    },
    /// Organizer fan-out finished
    OrganizersAssigned {
        /// Per-organizer outcome
        report: AssignmentReport,
    },
}
