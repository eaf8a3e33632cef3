//! Collaborator traits the wizard depends on.
//!
//! The wizard never talks to the network itself; the reducer returns effects
//! that call these traits. Each method returns a boxed future so the traits
//! stay object-safe and the environment can hold them as `Arc<dyn _>`.
//!
//! # Implementations
//!
//! - [`crate::file_store::FileDraftStore`]: draft kept in a local JSON file
//! - [`crate::mocks`]: in-memory versions for tests (feature `test-utils`)

use crate::error::{DraftStoreError, ServiceError};
use crate::submission::{CreatedEvent, EventInput};
use crate::types::{DraftRecord, EventDraft, EventId, UserId, WizardStep};
use std::future::Future;
use std::pin::Pin;

/// Boxed, sendable future returned by collaborator calls
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Persistence for the single in-progress draft of a session
pub trait DraftStore: Send + Sync {
    /// Fetches the stored draft, if there is one
    ///
    /// # Errors
    ///
    /// Returns [`DraftStoreError`] if the store cannot be read.
    fn load_draft(&self) -> BoxFuture<'_, Result<Option<DraftRecord>, DraftStoreError>>;

    /// Writes the draft and its step, replacing any previous one
    ///
    /// Returns the record as stored, stamped with the save time.
    ///
    /// # Errors
    ///
    /// Returns [`DraftStoreError`] if the write fails.
    fn save_draft(
        &self,
        draft: EventDraft,
        step: WizardStep,
    ) -> BoxFuture<'_, Result<DraftRecord, DraftStoreError>>;

    /// Removes the stored draft; deleting nothing is not an error
    ///
    /// # Errors
    ///
    /// Returns [`DraftStoreError`] if the delete fails.
    fn delete_draft(&self) -> BoxFuture<'_, Result<(), DraftStoreError>>;
}

/// Creates events server-side
pub trait EventService: Send + Sync {
    /// Creates the event described by `input`
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if the server rejects or cannot be reached.
    fn create_event(&self, input: EventInput) -> BoxFuture<'_, Result<CreatedEvent, ServiceError>>;
}

/// Grants users management rights on an event
pub trait OrganizerService: Send + Sync {
    /// Makes `user` a manager of `event`
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if the assignment fails.
    fn assign_manager(&self, event: EventId, user: UserId)
        -> BoxFuture<'_, Result<(), ServiceError>>;
}
