//! Where the item was lost or found: a point, a note, or both.

use bot_core::{Flow, Stage, Step};

use crate::registry::{EnterOutcome, HandlerOutcome, MessageInput, StepHandler, StepRuntime};
use crate::render;

pub struct LocationStep {
    flow: Flow,
}

impl LocationStep {
    pub fn new(flow: Flow) -> Self {
        Self { flow }
    }
}

impl StepHandler for LocationStep {
    fn enter(&self, _runtime: &StepRuntime<'_>) -> Option<EnterOutcome> {
        Some(EnterOutcome::respond(render::location_prompt(self.flow)))
    }

    fn on_message(
        &self,
        runtime: &StepRuntime<'_>,
        input: &MessageInput<'_>,
    ) -> Option<HandlerOutcome> {
        let note = input.text.trim();
        let point = input.location.clone();
        let outcome = if point.is_none() && note.is_empty() {
            HandlerOutcome::stay(render::location_missing())
        } else {
            let note = (!note.is_empty()).then_some(note);
            HandlerOutcome::transition(
                Step::for_flow(self.flow, Stage::Secrets),
                runtime.payload.with_location(point, note),
            )
        };
        Some(outcome)
    }
}
