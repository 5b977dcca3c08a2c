//! Engine error types

use thiserror::Error;

use bot_state::StateError;

#[derive(Error, Debug)]
pub enum EngineError {
    /// No stable application identity could be derived from the event.
    /// Fatal for the event, never for the process.
    #[error("user resolution failed: {0}")]
    UserResolution(String),

    #[error("state store error: {0}")]
    Store(#[from] StateError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
