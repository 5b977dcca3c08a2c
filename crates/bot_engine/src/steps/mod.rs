//! The six stage handlers, each parameterized by flow.
//!
//! Per flow the chain is strictly linear
//! (category → attributes → photo → location → secrets → confirm) with one
//! backward edge: confirm's "edit" returns to attributes.

mod attributes;
mod category;
mod confirm;
mod location;
mod photo;
mod secrets;

use std::sync::Arc;

use bot_core::{Flow, Stage};

use crate::registry::StepHandler;

pub use attributes::AttributesStep;
pub use category::CategoryStep;
pub use confirm::ConfirmStep;
pub use location::LocationStep;
pub use photo::PhotoStep;
pub use secrets::SecretsStep;

/// Instantiate the handler for a (flow, stage) pair.
pub fn handler_for(flow: Flow, stage: Stage) -> Arc<dyn StepHandler> {
    match stage {
        Stage::Category => Arc::new(CategoryStep::new(flow)),
        Stage::Attributes => Arc::new(AttributesStep::new(flow)),
        Stage::Photo => Arc::new(PhotoStep::new(flow)),
        Stage::Location => Arc::new(LocationStep::new(flow)),
        Stage::Secrets => Arc::new(SecretsStep::new(flow)),
        Stage::Confirm => Arc::new(ConfirmStep::new(flow)),
    }
}
