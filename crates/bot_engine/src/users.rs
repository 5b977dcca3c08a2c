//! App-level user records and identity resolution.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{EngineError, Result};

/// A resolved application user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    /// Stable id the chat platform assigns to this person.
    pub platform_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Maps a platform identity to an application user record.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Get-or-create the user for a platform id.
    async fn resolve(&self, platform_id: &str) -> Result<UserRecord>;
}

/// In-process directory; records die with the process.
#[derive(Default)]
pub struct MemoryUserDirectory {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn resolve(&self, platform_id: &str) -> Result<UserRecord> {
        let platform_id = platform_id.trim();
        if platform_id.is_empty() {
            return Err(EngineError::UserResolution(
                "event carries no platform user id".to_string(),
            ));
        }

        {
            let users = self.users.read().await;
            if let Some(user) = users.get(platform_id) {
                return Ok(user.clone());
            }
        }

        let mut users = self.users.write().await;
        let user = users
            .entry(platform_id.to_string())
            .or_insert_with(|| UserRecord {
                id: Uuid::new_v4(),
                platform_id: platform_id.to_string(),
                phone: None,
                created_at: Utc::now(),
            });
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_is_stable_per_platform_id() {
        let directory = MemoryUserDirectory::new();
        let first = directory.resolve("peer_1").await.unwrap();
        let again = directory.resolve("peer_1").await.unwrap();
        let other = directory.resolve("peer_2").await.unwrap();

        assert_eq!(first.id, again.id);
        assert_ne!(first.id, other.id);
        assert_eq!(first.platform_id, "peer_1");
    }

    #[tokio::test]
    async fn test_blank_platform_id_is_a_resolution_error() {
        let directory = MemoryUserDirectory::new();
        let result = directory.resolve("   ").await;
        assert!(matches!(result, Err(EngineError::UserResolution(_))));
    }
}
