//! Draft store backed by a local JSON file.

use crate::error::DraftStoreError;
use crate::providers::{BoxFuture, DraftStore};
use crate::types::{DraftRecord, EventDraft, WizardStep};
use event_wizard_core::environment::Clock;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Keeps the single draft record in one JSON file.
///
/// Writes go to a sibling temporary file first and are renamed into place,
/// so a crash mid-write leaves the previous record intact.
#[derive(Clone)]
pub struct FileDraftStore {
    path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl FileDraftStore {
    /// Store writing to `path`, stamping saves with `clock`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    /// File the record lives in
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl std::fmt::Debug for FileDraftStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDraftStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl DraftStore for FileDraftStore {
    fn load_draft(&self) -> BoxFuture<'_, Result<Option<DraftRecord>, DraftStoreError>> {
        Box::pin(async move {
            let bytes = match tokio::fs::read(&self.path).await {
                Ok(bytes) => bytes,
                Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
                Err(error) => return Err(error.into()),
            };
            Ok(Some(serde_json::from_slice(&bytes)?))
        })
    }

    fn save_draft(
        &self,
        draft: EventDraft,
        step: WizardStep,
    ) -> BoxFuture<'_, Result<DraftRecord, DraftStoreError>> {
        Box::pin(async move {
            let record = DraftRecord {
                draft_data: draft,
                current_step: step,
                last_saved_at: self.clock.now(),
            };
            let bytes = serde_json::to_vec_pretty(&record)?;

            let temp = self.temp_path();
            tokio::fs::write(&temp, bytes).await?;
            tokio::fs::rename(&temp, &self.path).await?;

            tracing::debug!(path = %self.path.display(), step = %step, "Draft written");
            Ok(record)
        })
    }

    fn delete_draft(&self) -> BoxFuture<'_, Result<(), DraftStoreError>> {
        Box::pin(async move {
            match tokio::fs::remove_file(&self.path).await {
                Ok(()) => Ok(()),
                Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
                Err(error) => Err(error.into()),
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::types::{Category, Money};
    use event_wizard_testing::test_clock;

    fn store(dir: &tempfile::TempDir) -> FileDraftStore {
        FileDraftStore::new(dir.path().join("draft.json"), Arc::new(test_clock()))
    }

    #[tokio::test]
    async fn missing_file_means_no_draft() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store(&dir).load_draft().await, Ok(None));
        assert_eq!(store(&dir).delete_draft().await, Ok(()));
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let draft = EventDraft {
            name: "Retreat".to_string(),
            payment_required: true,
            categories: vec![Category::new("Single", Money::from_cents(45_000), 20)],
            ..EventDraft::default()
        };

        let saved = store
            .save_draft(draft.clone(), WizardStep::PaymentSettings)
            .await
            .unwrap();
        assert_eq!(saved.last_saved_at, event_wizard_testing::test_epoch());

        let loaded = store.load_draft().await.unwrap().unwrap();
        assert_eq!(loaded.draft_data, draft);
        assert_eq!(loaded.current_step, WizardStep::PaymentSettings);
        assert!(!store.temp_path().exists());

        store.delete_draft().await.unwrap();
        assert_eq!(store.load_draft().await, Ok(None));
    }

    #[tokio::test]
    async fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        tokio::fs::write(store.path(), b"{not json").await.unwrap();
        assert!(matches!(
            store.load_draft().await,
            Err(DraftStoreError::Serialization(_))
        ));
    }
}
