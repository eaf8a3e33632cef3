//! Mock event service for testing.

use crate::error::ServiceError;
use crate::providers::{BoxFuture, EventService};
use crate::submission::{CreatedEvent, EventInput};
use crate::types::EventId;
use std::sync::{Arc, Mutex};

/// Mock event service.
///
/// Records every request; answers with sequential ids or a configured error.
#[derive(Debug, Clone, Default)]
pub struct MockEventService {
    requests: Arc<Mutex<Vec<EventInput>>>,
    failure: Arc<Mutex<Option<ServiceError>>>,
}

impl MockEventService {
    /// Create a mock that accepts every request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail subsequent requests with `error` (`None` to accept again).
    pub fn set_failure(&self, error: Option<ServiceError>) {
        if let Ok(mut slot) = self.failure.lock() {
            *slot = error;
        }
    }

    /// Requests received so far (for testing).
    #[must_use]
    pub fn requests(&self) -> Vec<EventInput> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl EventService for MockEventService {
    fn create_event(&self, input: EventInput) -> BoxFuture<'_, Result<CreatedEvent, ServiceError>> {
        Box::pin(async move {
            if let Some(error) = self
                .failure
                .lock()
                .map_err(|_| ServiceError::Internal("Mutex lock failed".to_string()))?
                .clone()
            {
                return Err(error);
            }

            let mut requests = self
                .requests
                .lock()
                .map_err(|_| ServiceError::Internal("Mutex lock failed".to_string()))?;
            let name = input.name.clone();
            requests.push(input);
            Ok(CreatedEvent {
                id: EventId::new(format!("evt-{}", requests.len())),
                name,
            })
        })
    }
}
