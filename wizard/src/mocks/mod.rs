//! Mock provider implementations for testing.
//!
//! In-memory implementations of the collaborator traits, with switches to
//! make them fail.

pub mod draft_store;
pub mod events;
pub mod organizers;

pub use draft_store::MockDraftStore;
pub use events::MockEventService;
pub use organizers::MockOrganizerService;
