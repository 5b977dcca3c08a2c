//! The step handler table: one polymorphic handler per dialogue step,
//! built once at startup and read-only afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use bot_core::{CallbackAction, DraftPayload, Flow, GeoPoint, Response, Stage, Step};

use crate::steps;
use crate::users::UserRecord;

/// Read-only view of a user's dialogue state for one event's processing.
pub struct StepRuntime<'a> {
    pub user: &'a UserRecord,
    pub step: Step,
    pub payload: &'a DraftPayload,
}

/// A free-text message as seen by a step handler.
pub struct MessageInput<'a> {
    pub text: &'a str,
    pub normalized: &'a str,
    pub location: Option<GeoPoint>,
}

/// Where the dialogue goes after a handler ran.
#[derive(Debug, Clone, PartialEq)]
pub enum StepAdvance {
    /// Remain on the current step; the record is untouched.
    Stay,
    /// Persist the new payload under the given step and enter it.
    Transition { step: Step, payload: DraftPayload },
    /// Dialogue complete: delete the record and show the main menu.
    Finish,
}

/// Responses to deliver plus the advance decision.
pub struct HandlerOutcome {
    pub responses: Vec<Response>,
    pub advance: StepAdvance,
}

impl HandlerOutcome {
    pub fn stay(response: Response) -> Self {
        Self {
            responses: vec![response],
            advance: StepAdvance::Stay,
        }
    }

    pub fn stay_silent() -> Self {
        Self {
            responses: Vec::new(),
            advance: StepAdvance::Stay,
        }
    }

    pub fn transition(step: Step, payload: DraftPayload) -> Self {
        Self {
            responses: Vec::new(),
            advance: StepAdvance::Transition { step, payload },
        }
    }

    pub fn finish(responses: Vec<Response>) -> Self {
        Self {
            responses,
            advance: StepAdvance::Finish,
        }
    }
}

/// What entering a step renders.
pub struct EnterOutcome {
    pub responses: Vec<Response>,
    /// Set by pass-through steps that immediately hand over to the next
    /// step after their informational message (the photo stage).
    pub advance_to: Option<Step>,
}

impl EnterOutcome {
    pub fn respond(response: Response) -> Self {
        Self {
            responses: vec![response],
            advance_to: None,
        }
    }

    pub fn pass_through(response: Response, next: Step) -> Self {
        Self {
            responses: vec![response],
            advance_to: Some(next),
        }
    }
}

/// A dialogue step's logic. All three operations are optional; the engine
/// renders a fallback when an event reaches a step that does not take it.
/// Handlers are pure: they read the runtime and return an outcome, and the
/// engine alone talks to the store and the sink.
pub trait StepHandler: Send + Sync {
    fn enter(&self, _runtime: &StepRuntime<'_>) -> Option<EnterOutcome> {
        None
    }

    fn on_message(
        &self,
        _runtime: &StepRuntime<'_>,
        _input: &MessageInput<'_>,
    ) -> Option<HandlerOutcome> {
        None
    }

    fn on_callback(
        &self,
        _runtime: &StepRuntime<'_>,
        _action: &CallbackAction,
    ) -> Option<HandlerOutcome> {
        None
    }
}

/// Step → handler mapping, one instance per (flow, stage) pair.
pub struct StepRegistry {
    handlers: HashMap<Step, Arc<dyn StepHandler>>,
}

impl StepRegistry {
    /// Build the standard registry covering both flows.
    pub fn standard() -> Self {
        let mut handlers: HashMap<Step, Arc<dyn StepHandler>> = HashMap::new();
        for flow in Flow::ALL {
            for stage in Stage::ALL {
                handlers.insert(Step::for_flow(flow, stage), steps::handler_for(flow, stage));
            }
        }
        Self { handlers }
    }

    pub fn get(&self, step: Step) -> Option<Arc<dyn StepHandler>> {
        self.handlers.get(&step).cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
