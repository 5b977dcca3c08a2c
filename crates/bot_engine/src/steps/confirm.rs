//! Final review: publish, go back and edit, or cancel.

use bot_core::{CallbackAction, CallbackVerb, Flow, Stage, Step};

use crate::registry::{EnterOutcome, HandlerOutcome, StepHandler, StepRuntime};
use crate::render;

pub struct ConfirmStep {
    flow: Flow,
}

impl ConfirmStep {
    pub fn new(flow: Flow) -> Self {
        Self { flow }
    }
}

impl StepHandler for ConfirmStep {
    fn enter(&self, runtime: &StepRuntime<'_>) -> Option<EnterOutcome> {
        Some(EnterOutcome::respond(render::confirm_summary(
            runtime.payload,
        )))
    }

    fn on_callback(
        &self,
        runtime: &StepRuntime<'_>,
        action: &CallbackAction,
    ) -> Option<HandlerOutcome> {
        if action.verb != CallbackVerb::Confirm {
            return Some(HandlerOutcome::stay(render::unknown_action()));
        }
        let outcome = match action.value.as_deref() {
            // Actual publication is still a stub; the draft is dropped.
            Some("publish") => HandlerOutcome::finish(vec![render::publish_stub()]),
            // Back to the description, everything else in the draft kept.
            Some("edit") => HandlerOutcome::transition(
                Step::for_flow(self.flow, Stage::Attributes),
                runtime.payload.clone(),
            ),
            _ => HandlerOutcome::stay(render::unknown_action()),
        };
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StepAdvance;
    use crate::test_support::runtime_parts;

    fn callback_outcome(value: Option<&str>) -> HandlerOutcome {
        let handler = ConfirmStep::new(Flow::Lost);
        let (user, payload) = runtime_parts(Flow::Lost);
        let payload = payload.with_category("keys").with_details("связка ключей");
        let runtime = StepRuntime {
            user: &user,
            step: Step::LostConfirm,
            payload: &payload,
        };
        let action = CallbackAction {
            flow: Some(Flow::Lost),
            verb: CallbackVerb::Confirm,
            value: value.map(str::to_string),
        };
        handler.on_callback(&runtime, &action).unwrap()
    }

    #[test]
    fn test_publish_finishes_the_dialogue() {
        let outcome = callback_outcome(Some("publish"));
        assert_eq!(outcome.advance, StepAdvance::Finish);
        assert!(!outcome.responses.is_empty());
    }

    #[test]
    fn test_edit_returns_to_attributes_with_draft_intact() {
        let outcome = callback_outcome(Some("edit"));
        match outcome.advance {
            StepAdvance::Transition { step, payload } => {
                assert_eq!(step, Step::LostAttributes);
                assert_eq!(payload.listing.category.as_deref(), Some("keys"));
                assert_eq!(payload.listing.details, "связка ключей");
            }
            other => panic!("expected transition, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_value_notifies_without_transition() {
        for value in [Some("teleport"), None] {
            let outcome = callback_outcome(value);
            assert_eq!(outcome.advance, StepAdvance::Stay);
            assert!(!outcome.responses.is_empty());
        }
    }
}
