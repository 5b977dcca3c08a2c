//! bot_core - Domain types and wire codec for the lost & found dialogue bot
//!
//! This crate holds everything the dialogue engine and the state store agree
//! on: flows and steps, the listing draft, the callback wire codec, global
//! command keywords, the abstract event shapes and runtime configuration.

pub mod callback;
pub mod category;
pub mod command;
pub mod config;
pub mod event;
pub mod flow;
pub mod listing;
pub mod payload;

// Re-export commonly used types
pub use callback::{encode_action, CallbackAction, CallbackVerb};
pub use config::BotConfig;
pub use event::{Button, ButtonAction, InboundCallback, InboundMessage, Keyboard, Response};
pub use flow::{Flow, Stage, Step};
pub use listing::{GeoPoint, ListingDraft, ListingType, MAX_SECRETS};
pub use payload::{DraftMeta, DraftPayload};
