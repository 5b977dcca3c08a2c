//! bot_engine - The conversational FSM for reporting lost and found items
//!
//! Routes inbound messages and button callbacks to per-step handlers and
//! drives persisted transitions through a [`bot_state::StateStore`]. Whatever
//! step a user lands on, entering it renders the right prompt and keyboard.

pub mod engine;
pub mod error;
pub mod registry;
pub mod render;
pub mod sink;
pub mod steps;
pub mod users;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use engine::{FlowEngine, TransitionOptions};
pub use error::{EngineError, Result};
pub use registry::{
    EnterOutcome, HandlerOutcome, MessageInput, StepAdvance, StepHandler, StepRegistry, StepRuntime,
};
pub use sink::{ResponseSink, SinkError};
pub use users::{MemoryUserDirectory, UserDirectory, UserRecord};
