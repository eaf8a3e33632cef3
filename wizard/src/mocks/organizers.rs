//! Mock organizer service for testing.

use crate::error::ServiceError;
use crate::providers::{BoxFuture, OrganizerService};
use crate::types::{EventId, UserId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Mock organizer service.
///
/// Assigns everyone except users marked as unknown.
#[derive(Debug, Clone, Default)]
pub struct MockOrganizerService {
    assignments: Arc<Mutex<Vec<(EventId, UserId)>>>,
    unknown: Arc<Mutex<HashSet<UserId>>>,
}

impl MockOrganizerService {
    /// Create a mock that accepts every assignment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject assignments of `user` with [`ServiceError::UnknownUser`].
    pub fn reject(&self, user: UserId) {
        if let Ok(mut unknown) = self.unknown.lock() {
            unknown.insert(user);
        }
    }

    /// Successful assignments so far (for testing).
    #[must_use]
    pub fn assignments(&self) -> Vec<(EventId, UserId)> {
        self.assignments
            .lock()
            .map(|assignments| assignments.clone())
            .unwrap_or_default()
    }
}

impl OrganizerService for MockOrganizerService {
    fn assign_manager(
        &self,
        event: EventId,
        user: UserId,
    ) -> BoxFuture<'_, Result<(), ServiceError>> {
        Box::pin(async move {
            let lock_failed = || ServiceError::Internal("Mutex lock failed".to_string());
            if self.unknown.lock().map_err(|_| lock_failed())?.contains(&user) {
                return Err(ServiceError::UnknownUser(user));
            }
            self.assignments
                .lock()
                .map_err(|_| lock_failed())?
                .push((event, user));
            Ok(())
        })
    }
}
