//! Secret marks only the owner can know, used later for matching.

use bot_core::{Flow, Stage, Step, MAX_SECRETS};

use crate::registry::{EnterOutcome, HandlerOutcome, MessageInput, StepHandler, StepRuntime};
use crate::render;

const SKIP_COMMAND: &str = "/skip";

pub struct SecretsStep {
    flow: Flow,
}

impl SecretsStep {
    pub fn new(flow: Flow) -> Self {
        Self { flow }
    }
}

/// Split free text into secret marks: newline, comma and semicolon all
/// separate, entries are trimmed, empties dropped, and anything past
/// [`MAX_SECRETS`] is silently ignored. The literal `/skip` yields none.
fn parse_secrets(text: &str) -> Vec<String> {
    if text.trim() == SKIP_COMMAND {
        return Vec::new();
    }
    text.split(['\n', ',', ';'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .take(MAX_SECRETS)
        .map(str::to_string)
        .collect()
}

impl StepHandler for SecretsStep {
    fn enter(&self, _runtime: &StepRuntime<'_>) -> Option<EnterOutcome> {
        Some(EnterOutcome::respond(render::secrets_prompt()))
    }

    fn on_message(
        &self,
        runtime: &StepRuntime<'_>,
        input: &MessageInput<'_>,
    ) -> Option<HandlerOutcome> {
        Some(HandlerOutcome::transition(
            Step::for_flow(self.flow, Stage::Confirm),
            runtime.payload.with_secrets(parse_secrets(input.text)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StepAdvance;
    use crate::test_support::runtime_parts;

    #[test]
    fn test_mixed_separators() {
        assert_eq!(parse_secrets("a, b\nc"), vec!["a", "b", "c"]);
        assert_eq!(parse_secrets("x; y ;z"), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_skip_yields_empty_list() {
        assert!(parse_secrets("/skip").is_empty());
        assert!(parse_secrets("  /skip  ").is_empty());
    }

    #[test]
    fn test_cap_keeps_first_three_in_order() {
        assert_eq!(parse_secrets("1,2,3,4,5"), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_empties_are_dropped() {
        assert_eq!(parse_secrets("a,,b, ,c"), vec!["a", "b", "c"]);
        assert!(parse_secrets(",;,\n").is_empty());
    }

    #[test]
    fn test_message_always_advances_to_confirm() {
        let handler = SecretsStep::new(Flow::Found);
        let (user, payload) = runtime_parts(Flow::Found);
        let runtime = StepRuntime {
            user: &user,
            step: Step::FoundSecrets,
            payload: &payload,
        };
        let input = MessageInput {
            text: "шрам, ошейник",
            normalized: "шрам, ошейник",
            location: None,
        };

        let outcome = handler.on_message(&runtime, &input).unwrap();
        match outcome.advance {
            StepAdvance::Transition { step, payload } => {
                assert_eq!(step, Step::FoundConfirm);
                assert_eq!(payload.listing.secrets, vec!["шрам", "ошейник"]);
            }
            other => panic!("expected transition, got {:?}", other),
        }
    }
}
