//! # Event Wizard
//!
//! Step-gated creation flow for events: a six-step wizard that keeps a
//! partially filled, auto-saved draft consistent under date and capacity
//! rules before letting it become an event.
//!
//! ## Layers
//!
//! - [`validation`]: pure rules over the draft (dates, capacity, meal sessions)
//! - [`steps`]: which rules each step consults; gates the Next button
//! - [`reducer`]: navigation, draft lifecycle and submission as a [`Reducer`]
//! - [`providers`]: draft store, event and organizer services the effects call
//!
//! ## Example
//!
//! ```ignore
//! use event_wizard::{WizardAction, WizardEnvironment, WizardReducer, WizardState};
//! use event_wizard_runtime::Store;
//!
//! let store = Store::new(WizardState::new(), WizardReducer::new(), environment);
//! store.send_cascading(WizardAction::LoadDraft).await?.wait().await;
//! store.send(WizardAction::Next).await?;
//! let errors = store.state(|s| s.errors.messages()).await;
//! ```
//!
//! [`Reducer`]: event_wizard_core::reducer::Reducer

pub mod actions;
pub mod config;
pub mod edit;
pub mod environment;
pub mod error;
pub mod file_store;
pub mod providers;
pub mod reducer;
pub mod state;
pub mod steps;
pub mod submission;
pub mod types;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use actions::WizardAction;
pub use config::{ConfigError, WizardConfig};
pub use edit::{CategoryPatch, DraftEdit, MealSessionPatch};
pub use environment::WizardEnvironment;
pub use error::{DraftStoreError, ServiceError, WizardError};
pub use file_store::FileDraftStore;
pub use providers::{DraftStore, EventService, OrganizerService};
pub use reducer::WizardReducer;
pub use state::{DraftMode, SaveStatus, SubmissionStatus, WizardState};
pub use steps::StepValidator;
pub use submission::{AssignmentReport, CreatedEvent, EventInput};
pub use types::{
    Category, DraftRecord, EventDraft, EventId, MealSession, Money, TempId, UserId, WizardStep,
};
pub use validation::{CalendarZone, Field, ValidationError, ValidationErrors};

/// Store type the wizard runs in
pub type WizardStore =
    event_wizard_runtime::Store<WizardState, WizardAction, WizardEnvironment, WizardReducer>;
