//! Ephemeral in-process state store with TTL-based expiry.
//!
//! For single-process deployments and tests; state dies with the process.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use bot_core::{DraftPayload, Step};

use crate::error::Result;
use crate::store::{StateRecord, StateStore};

#[derive(Default)]
pub struct MemoryStateStore {
    records: RwLock<HashMap<Uuid, StateRecord>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get(&self, user_id: Uuid) -> Result<Option<StateRecord>> {
        Ok(self.records.read().await.get(&user_id).cloned())
    }

    async fn put(&self, user_id: Uuid, step: Step, payload: DraftPayload) -> Result<()> {
        self.records
            .write()
            .await
            .insert(user_id, StateRecord::new(step, payload));
        Ok(())
    }

    async fn delete(&self, user_id: Uuid) -> Result<()> {
        self.records.write().await.remove(&user_id);
        Ok(())
    }

    async fn sweep_expired(&self, ttl: Duration) -> Result<usize> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_older_than(ttl));
        let removed = before - records.len();
        if removed > 0 {
            tracing::debug!(removed, "swept expired in-memory dialogue states");
        }
        Ok(removed)
    }
}
