//! Background expiry sweep: crash-recovery GC for abandoned dialogues.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::store::StateStore;

/// Periodically delete records untouched for longer than `ttl`.
///
/// Best-effort and independent of live transitions; the store's own
/// atomicity is the only synchronization.
pub fn spawn_expiry_sweeper<S>(store: Arc<S>, ttl: Duration, interval: Duration) -> JoinHandle<()>
where
    S: StateStore + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match store.sweep_expired(ttl).await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "expired dialogue states removed"),
                Err(error) => tracing::warn!(%error, "state expiry sweep failed"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStateStore;
    use bot_core::{DraftPayload, Flow, Step};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_sweeper_collects_stale_records() {
        let store = Arc::new(MemoryStateStore::new());
        let user_id = Uuid::new_v4();
        store
            .put(user_id, Step::LostCategory, DraftPayload::new(Flow::Lost))
            .await
            .unwrap();

        let handle = spawn_expiry_sweeper(
            store.clone(),
            Duration::ZERO,
            Duration::from_millis(10),
        );
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();

        assert!(store.get(user_id).await.unwrap().is_none());
    }
}
