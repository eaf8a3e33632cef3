//! Mock draft store for testing.

use crate::error::DraftStoreError;
use crate::providers::{BoxFuture, DraftStore};
use crate::types::{DraftRecord, EventDraft, WizardStep};
use event_wizard_core::environment::Clock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock draft store.
///
/// Keeps the single record in memory and stamps saves with the injected clock.
#[derive(Clone)]
pub struct MockDraftStore {
    record: Arc<Mutex<Option<DraftRecord>>>,
    clock: Arc<dyn Clock>,
    fail_saves: Arc<AtomicBool>,
    fail_loads: Arc<AtomicBool>,
    saves: Arc<AtomicUsize>,
    deletes: Arc<AtomicUsize>,
}

fn lock_failed() -> DraftStoreError {
    DraftStoreError::Internal("Mutex lock failed".to_string())
}

impl MockDraftStore {
    /// Create an empty mock draft store.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            record: Arc::new(Mutex::new(None)),
            clock,
            fail_saves: Arc::new(AtomicBool::new(false)),
            fail_loads: Arc::new(AtomicBool::new(false)),
            saves: Arc::new(AtomicUsize::new(0)),
            deletes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a store already holding `record`.
    #[must_use]
    pub fn with_record(clock: Arc<dyn Clock>, record: DraftRecord) -> Self {
        let store = Self::new(clock);
        if let Ok(mut slot) = store.record.lock() {
            *slot = Some(record);
        }
        store
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent loads fail (or succeed again).
    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Currently stored record (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn stored(&self) -> Result<Option<DraftRecord>, DraftStoreError> {
        Ok(self.record.lock().map_err(|_| lock_failed())?.clone())
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of delete calls.
    #[must_use]
    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

impl DraftStore for MockDraftStore {
    fn load_draft(&self) -> BoxFuture<'_, Result<Option<DraftRecord>, DraftStoreError>> {
        Box::pin(async move {
            if self.fail_loads.load(Ordering::SeqCst) {
                return Err(DraftStoreError::Network("load refused".to_string()));
            }
            Ok(self.record.lock().map_err(|_| lock_failed())?.clone())
        })
    }

    fn save_draft(
        &self,
        draft: EventDraft,
        step: WizardStep,
    ) -> BoxFuture<'_, Result<DraftRecord, DraftStoreError>> {
        Box::pin(async move {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(DraftStoreError::Network("save refused".to_string()));
            }
            let record = DraftRecord {
                draft_data: draft,
                current_step: step,
                last_saved_at: self.clock.now(),
            };
            *self.record.lock().map_err(|_| lock_failed())? = Some(record.clone());
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(record)
        })
    }

    fn delete_draft(&self) -> BoxFuture<'_, Result<(), DraftStoreError>> {
        Box::pin(async move {
            self.record.lock().map_err(|_| lock_failed())?.take();
            self.deletes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }
}
