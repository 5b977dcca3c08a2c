//! Photo stage: a non-interactive pass-through until uploads exist.

use bot_core::{Flow, Stage, Step};

use crate::registry::{EnterOutcome, HandlerOutcome, MessageInput, StepHandler, StepRuntime};
use crate::render;

pub struct PhotoStep {
    flow: Flow,
}

impl PhotoStep {
    pub fn new(flow: Flow) -> Self {
        Self { flow }
    }
}

impl StepHandler for PhotoStep {
    /// Renders the stub notice and immediately hands over to the location
    /// step, so the dialogue never stalls here.
    fn enter(&self, _runtime: &StepRuntime<'_>) -> Option<EnterOutcome> {
        Some(EnterOutcome::pass_through(
            render::photo_stub(),
            Step::for_flow(self.flow, Stage::Location),
        ))
    }

    fn on_message(
        &self,
        _runtime: &StepRuntime<'_>,
        _input: &MessageInput<'_>,
    ) -> Option<HandlerOutcome> {
        // Only reachable when a crash parked a user here mid pass-through.
        Some(HandlerOutcome::stay_silent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StepAdvance;
    use crate::test_support::runtime_parts;

    #[test]
    fn test_enter_passes_through_to_location() {
        let handler = PhotoStep::new(Flow::Lost);
        let (user, payload) = runtime_parts(Flow::Lost);
        let runtime = StepRuntime {
            user: &user,
            step: Step::LostPhoto,
            payload: &payload,
        };

        let entered = handler.enter(&runtime).unwrap();
        assert_eq!(entered.advance_to, Some(Step::LostLocation));
        assert_eq!(entered.responses.len(), 1);
    }

    #[test]
    fn test_messages_are_a_no_op() {
        let handler = PhotoStep::new(Flow::Found);
        let (user, payload) = runtime_parts(Flow::Found);
        let runtime = StepRuntime {
            user: &user,
            step: Step::FoundPhoto,
            payload: &payload,
        };
        let input = MessageInput {
            text: "фото",
            normalized: "фото",
            location: None,
        };

        let outcome = handler.on_message(&runtime, &input).unwrap();
        assert_eq!(outcome.advance, StepAdvance::Stay);
        assert!(outcome.responses.is_empty());
    }
}
