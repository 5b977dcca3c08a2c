//! Durable state store: one JSON document per user id.
//!
//! The durable counterpart of [`MemoryStateStore`](crate::MemoryStateStore):
//! records survive process restarts, so a dialogue can be resumed from any
//! step after a crash or redeploy.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use bot_core::{DraftPayload, Step};

use crate::error::Result;
use crate::store::{StateRecord, StateStore};

#[derive(Clone)]
pub struct FileStateStore {
    base_path: PathBuf,
}

impl FileStateStore {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn record_path(&self, user_id: Uuid) -> PathBuf {
        self.base_path.join(format!("{}.json", user_id))
    }

    fn parse_record(&self, user_id: Uuid, contents: &str) -> Option<StateRecord> {
        match serde_json::from_str(contents) {
            Ok(record) => Some(record),
            Err(error) => {
                // The file stays in place; it is opaque until overwritten.
                tracing::warn!(
                    user_id = %user_id,
                    %error,
                    "persisted dialogue state is unreadable, treating user as idle"
                );
                None
            }
        }
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn get(&self, user_id: Uuid) -> Result<Option<StateRecord>> {
        let path = self.record_path(user_id);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path).await?;
        Ok(self.parse_record(user_id, &contents))
    }

    async fn put(&self, user_id: Uuid, step: Step, payload: DraftPayload) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        let record = StateRecord::new(step, payload);
        let contents = serde_json::to_string_pretty(&record)?;
        fs::write(self.record_path(user_id), contents).await?;
        Ok(())
    }

    async fn delete(&self, user_id: Uuid) -> Result<()> {
        let path = self.record_path(user_id);
        if path.exists() {
            fs::remove_file(&path).await?;
        }
        Ok(())
    }

    async fn sweep_expired(&self, ttl: Duration) -> Result<usize> {
        if !self.base_path.exists() {
            return Ok(0);
        }
        let mut removed = 0;
        let mut entries = fs::read_dir(&self.base_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Ok(contents) = fs::read_to_string(&path).await else {
                continue;
            };
            // Unreadable records have no usable age; leave them alone.
            let Ok(record) = serde_json::from_str::<StateRecord>(&contents) else {
                continue;
            };
            if record.is_older_than(ttl) {
                fs::remove_file(&path).await?;
                removed += 1;
            }
        }
        if removed > 0 {
            tracing::debug!(removed, "swept expired persisted dialogue states");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bot_core::{Flow, GeoPoint};
    use tempfile::tempdir;

    fn full_payload() -> DraftPayload {
        DraftPayload::new(Flow::Lost)
            .with_category("keys")
            .with_details("связка из пяти ключей с брелоком")
            .with_location(Some(GeoPoint::new(55.751, 37.618)), Some("у метро"))
            .with_secrets(vec!["красный брелок".into(), "царапина".into()])
    }

    #[tokio::test]
    async fn test_round_trip_preserves_nested_payload() {
        let dir = tempdir().unwrap();
        let store = FileStateStore::new(dir.path());
        let user_id = Uuid::new_v4();
        let payload = full_payload();

        store
            .put(user_id, Step::LostConfirm, payload.clone())
            .await
            .unwrap();

        let record = store.get(user_id).await.unwrap().unwrap();
        assert_eq!(record.step, Step::LostConfirm);
        assert_eq!(record.payload, payload);
    }

    #[tokio::test]
    async fn test_missing_record_is_none() {
        let dir = tempdir().unwrap();
        let store = FileStateStore::new(dir.path());
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_record_reads_as_idle_and_stays_on_disk() {
        let dir = tempdir().unwrap();
        let store = FileStateStore::new(dir.path());
        let user_id = Uuid::new_v4();

        let path = dir.path().join(format!("{}.json", user_id));
        std::fs::write(&path, "{not json at all").unwrap();

        assert!(store.get(user_id).await.unwrap().is_none());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_delete_removes_the_document() {
        let dir = tempdir().unwrap();
        let store = FileStateStore::new(dir.path());
        let user_id = Uuid::new_v4();

        store
            .put(user_id, Step::FoundCategory, DraftPayload::new(Flow::Found))
            .await
            .unwrap();
        store.delete(user_id).await.unwrap();
        assert!(store.get(user_id).await.unwrap().is_none());

        // Deleting again is a no-op.
        store.delete(user_id).await.unwrap();
    }

    #[tokio::test]
    async fn test_sweep_skips_fresh_and_corrupt_files() {
        let dir = tempdir().unwrap();
        let store = FileStateStore::new(dir.path());
        let fresh = Uuid::new_v4();

        store
            .put(fresh, Step::LostCategory, DraftPayload::new(Flow::Lost))
            .await
            .unwrap();
        let corrupt_path = dir.path().join(format!("{}.json", Uuid::new_v4()));
        std::fs::write(&corrupt_path, "garbage").unwrap();

        let removed = store.sweep_expired(Duration::from_secs(3600)).await.unwrap();
        assert_eq!(removed, 0);
        assert!(corrupt_path.exists());

        // With a zero TTL every parseable record is stale.
        let removed = store.sweep_expired(Duration::ZERO).await.unwrap();
        assert_eq!(removed, 1);
        assert!(store.get(fresh).await.unwrap().is_none());
        assert!(corrupt_path.exists());
    }
}
