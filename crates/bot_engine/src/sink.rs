//! Outbound delivery contract: the chat-platform collaborator.

use async_trait::async_trait;
use thiserror::Error;

use bot_core::Response;

use crate::users::UserRecord;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Delivers rendered responses to the user. The engine logs and swallows
/// failures; delivery problems never abort event handling.
#[async_trait]
pub trait ResponseSink: Send + Sync {
    async fn send(&self, user: &UserRecord, response: Response) -> Result<(), SinkError>;
}
