//! Category selection: the only stage driven purely by buttons.

use bot_core::category::category_by_id;
use bot_core::{CallbackAction, CallbackVerb, Flow, Stage, Step};

use crate::registry::{EnterOutcome, HandlerOutcome, StepHandler, StepRuntime};
use crate::render;

pub struct CategoryStep {
    flow: Flow,
}

impl CategoryStep {
    pub fn new(flow: Flow) -> Self {
        Self { flow }
    }
}

impl StepHandler for CategoryStep {
    fn enter(&self, _runtime: &StepRuntime<'_>) -> Option<EnterOutcome> {
        Some(EnterOutcome::respond(render::category_prompt(self.flow)))
    }

    fn on_callback(
        &self,
        runtime: &StepRuntime<'_>,
        action: &CallbackAction,
    ) -> Option<HandlerOutcome> {
        if action.verb != CallbackVerb::Category {
            return Some(HandlerOutcome::stay(render::unknown_action()));
        }
        let outcome = match action.value.as_deref() {
            Some(id) if category_by_id(id).is_some() => HandlerOutcome::transition(
                Step::for_flow(self.flow, Stage::Attributes),
                runtime.payload.with_category(id),
            ),
            _ => HandlerOutcome::stay(render::unknown_category()),
        };
        Some(outcome)
    }
}
