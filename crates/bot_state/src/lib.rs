//! bot_state - Per-user dialogue state persistence
//!
//! One contract ([`StateStore`]), two interchangeable implementations:
//! an ephemeral in-process map for single-process deployments and tests,
//! and a durable JSON-document store for deployments that must survive
//! restarts. Their semantics are deliberately kept apart.

pub mod error;
pub mod file;
pub mod memory;
pub mod store;
pub mod sweeper;

// Re-export commonly used types
pub use error::StateError;
pub use file::FileStateStore;
pub use memory::MemoryStateStore;
pub use store::{StateRecord, StateStore};
pub use sweeper::spawn_expiry_sweeper;
