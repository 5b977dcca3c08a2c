//! Free-text description of the item.

use bot_core::{Flow, Stage, Step};

use crate::registry::{EnterOutcome, HandlerOutcome, MessageInput, StepHandler, StepRuntime};
use crate::render;

/// Descriptions shorter than this (in characters, after trimming) are
/// rejected and the step re-prompts.
const MIN_DETAILS_CHARS: usize = 5;

pub struct AttributesStep {
    flow: Flow,
}

impl AttributesStep {
    pub fn new(flow: Flow) -> Self {
        Self { flow }
    }
}

impl StepHandler for AttributesStep {
    fn enter(&self, _runtime: &StepRuntime<'_>) -> Option<EnterOutcome> {
        Some(EnterOutcome::respond(render::attributes_prompt(self.flow)))
    }

    fn on_message(
        &self,
        runtime: &StepRuntime<'_>,
        input: &MessageInput<'_>,
    ) -> Option<HandlerOutcome> {
        let details = input.text.trim();
        let outcome = if details.chars().count() < MIN_DETAILS_CHARS {
            HandlerOutcome::stay(render::attributes_too_short())
        } else {
            HandlerOutcome::transition(
                Step::for_flow(self.flow, Stage::Photo),
                runtime.payload.with_details(details),
            )
        };
        Some(outcome)
    }
}
