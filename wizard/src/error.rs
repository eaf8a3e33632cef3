//! Error types for the event wizard's collaborators.
//!
//! Validation failures are not errors in this sense: they are data, see
//! [`crate::validation::ValidationErrors`].

use crate::types::UserId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure talking to the draft store.
///
/// Never blocks editing: the reducer logs it and flags the save status.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftStoreError {
    /// Remote store unreachable or returned a transport error.
    #[error("Draft store unavailable: {0}")]
    Network(String),

    /// Stored record could not be encoded or decoded.
    #[error("Draft serialization failed: {0}")]
    Serialization(String),

    /// Local file access failed.
    #[error("Draft I/O failed: {0}")]
    Io(String),

    /// Internal failure (poisoned lock and the like).
    #[error("Draft store internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for DraftStoreError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<std::io::Error> for DraftStoreError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

/// Failure from the event or organizer service.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceError {
    /// Service unreachable.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Service refused the request.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Referenced user does not exist.
    #[error("Unknown user: {0}")]
    UnknownUser(UserId),

    /// Internal failure.
    #[error("Service internal error: {0}")]
    Internal(String),
}

/// Failure modes of a wizard session as seen by the UI.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardError {
    /// Draft checkpoint, load or delete failed; editing continues.
    #[error("Draft could not be persisted: {0}")]
    Persistence(#[from] DraftStoreError),

    /// The event could not be created; the draft is kept.
    #[error("Event creation failed: {0}")]
    Submission(#[from] ServiceError),

    /// The event exists but some organizers were not assigned.
    #[error("Event created, but {failed} of {attempted} organizers could not be assigned")]
    PartialAssignment {
        /// Assignments that failed
        failed: usize,
        /// Assignments attempted
        attempted: usize,
    },
}
