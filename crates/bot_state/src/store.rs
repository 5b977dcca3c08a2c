//! The state store contract: at most one dialogue record per user.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bot_core::{DraftPayload, Step};

use crate::error::Result;

/// What is persisted for a user mid-flow. A record exists iff the user is
/// mid-flow; absence means the user is idle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateRecord {
    pub step: Step,
    pub payload: DraftPayload,
    pub updated_at: DateTime<Utc>,
}

impl StateRecord {
    pub fn new(step: Step, payload: DraftPayload) -> Self {
        Self {
            step,
            payload,
            updated_at: Utc::now(),
        }
    }

    /// Whether the record has not been touched for longer than `ttl`.
    pub fn is_older_than(&self, ttl: Duration) -> bool {
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => Utc::now() - self.updated_at > ttl,
            Err(_) => false,
        }
    }
}

/// Durable key-value mapping from user id to dialogue state.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the record for a user. A record that cannot be deserialized is
    /// reported as absent, never as an error.
    async fn get(&self, user_id: Uuid) -> Result<Option<StateRecord>>;

    /// Upsert the record for a user, stamping `updated_at`.
    async fn put(&self, user_id: Uuid, step: Step, payload: DraftPayload) -> Result<()>;

    /// Remove the record for a user; removing an absent record succeeds.
    async fn delete(&self, user_id: Uuid) -> Result<()>;

    /// Delete records untouched for longer than `ttl`, returning how many
    /// were removed. Optional: stores without expiry keep the default.
    async fn sweep_expired(&self, _ttl: Duration) -> Result<usize> {
        Ok(0)
    }
}
