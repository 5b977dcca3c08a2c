//! The event dispatcher: resolves the user, routes inbound events to step
//! handlers and drives persisted transitions.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use bot_core::{
    command, BotConfig, CallbackAction, CallbackVerb, DraftPayload, Flow, InboundCallback,
    InboundMessage, Response, Stage, Step,
};
use bot_state::StateStore;

use crate::error::Result;
use crate::registry::{HandlerOutcome, MessageInput, StepAdvance, StepRegistry, StepRuntime};
use crate::render;
use crate::sink::ResponseSink;
use crate::users::{UserDirectory, UserRecord};

/// How a transition enters its target step.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionOptions {
    /// Render the one-line flow-start banner before the step's own prompt.
    pub with_intro: bool,
    /// Persist only; do not invoke the target step's `enter`.
    pub skip_enter: bool,
}

impl TransitionOptions {
    pub fn with_intro() -> Self {
        Self {
            with_intro: true,
            skip_enter: false,
        }
    }
}

/// Per-user FSM dispatcher.
///
/// Events for the same user are serialized on a per-user async mutex, so a
/// second event cannot overwrite the first one's transition. Events for
/// different users do not contend.
pub struct FlowEngine<S: StateStore> {
    store: Arc<S>,
    users: Arc<dyn UserDirectory>,
    sink: Arc<dyn ResponseSink>,
    registry: StepRegistry,
    config: BotConfig,
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl<S: StateStore> FlowEngine<S> {
    pub fn new(
        store: Arc<S>,
        users: Arc<dyn UserDirectory>,
        sink: Arc<dyn ResponseSink>,
        config: BotConfig,
    ) -> Self {
        Self {
            store,
            users,
            sink,
            registry: StepRegistry::standard(),
            config,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Handle a free-text (or location) message.
    pub async fn handle_message(&self, message: InboundMessage) -> Result<()> {
        let user = self.users.resolve(&message.platform_user_id).await?;
        let lock = self.user_lock(user.id).await;
        let _guard = lock.lock().await;

        let normalized = command::normalize(&message.text);

        if command::is_cancel(&normalized) {
            self.store.delete(user.id).await?;
            tracing::info!(user_id = %user.id, "dialogue cancelled by keyword");
            self.deliver(&user, render::main_menu(self.app_url())).await;
            return Ok(());
        }

        let Some(record) = self.store.get(user.id).await? else {
            if normalized.is_empty() {
                self.deliver(&user, render::main_menu(self.app_url())).await;
            } else if let Some(flow) = command::match_flow_start(&normalized) {
                self.start_flow(&user, flow).await?;
            } else {
                self.deliver(&user, render::menu_hint(self.app_url())).await;
            }
            return Ok(());
        };

        let Some(handler) = self.registry.get(record.step) else {
            self.deliver(&user, render::no_handler()).await;
            return Ok(());
        };
        let runtime = StepRuntime {
            user: &user,
            step: record.step,
            payload: &record.payload,
        };
        let input = MessageInput {
            text: &message.text,
            normalized: &normalized,
            location: message.location.clone(),
        };
        match handler.on_message(&runtime, &input) {
            None => {
                self.deliver(&user, render::step_not_implemented()).await;
            }
            Some(outcome) => self.apply_outcome(&user, outcome).await?,
        }
        Ok(())
    }

    /// Handle a button-click callback.
    pub async fn handle_callback(&self, callback: InboundCallback) -> Result<()> {
        let user = self.users.resolve(&callback.platform_user_id).await?;
        let lock = self.user_lock(user.id).await;
        let _guard = lock.lock().await;

        let Some(action) = CallbackAction::decode(&callback.payload) else {
            tracing::debug!(
                user_id = %user.id,
                payload = %callback.payload,
                "undecodable callback payload"
            );
            self.deliver(&user, render::unknown_action()).await;
            return Ok(());
        };

        match action.verb {
            CallbackVerb::Start => {
                // Starting a flow always wins: any in-progress draft for
                // this user is silently replaced.
                return match action.flow {
                    Some(flow) => self.start_flow(&user, flow).await,
                    None => {
                        self.deliver(&user, render::unknown_action()).await;
                        Ok(())
                    }
                };
            }
            CallbackVerb::Menu => {
                self.store.delete(user.id).await?;
                self.deliver(&user, render::main_menu(self.app_url())).await;
                return Ok(());
            }
            CallbackVerb::Cancel => {
                self.store.delete(user.id).await?;
                tracing::info!(user_id = %user.id, "dialogue cancelled by button");
                self.deliver_all(&user, vec![render::cancelled(), render::main_menu(self.app_url())])
                    .await;
                return Ok(());
            }
            CallbackVerb::Category | CallbackVerb::Confirm => {}
        }

        let Some(record) = self.store.get(user.id).await? else {
            self.deliver_all(
                &user,
                vec![render::choose_flow_first(), render::main_menu(self.app_url())],
            )
            .await;
            return Ok(());
        };

        // Guards against stale buttons from a previous, abandoned flow.
        if action.flow != Some(record.payload.flow) {
            tracing::debug!(
                user_id = %user.id,
                callback_flow = ?action.flow,
                current_flow = %record.payload.flow,
                "callback for another flow"
            );
            self.deliver(&user, render::stale_flow()).await;
            return Ok(());
        }

        let Some(handler) = self.registry.get(record.step) else {
            self.deliver(&user, render::no_handler()).await;
            return Ok(());
        };
        let runtime = StepRuntime {
            user: &user,
            step: record.step,
            payload: &record.payload,
        };
        match handler.on_callback(&runtime, &action) {
            None => {
                self.deliver(&user, render::no_handler()).await;
            }
            Some(outcome) => self.apply_outcome(&user, outcome).await?,
        }
        Ok(())
    }

    async fn start_flow(&self, user: &UserRecord, flow: Flow) -> Result<()> {
        tracing::info!(user_id = %user.id, %flow, "starting flow");
        self.transition_to(
            user,
            Step::for_flow(flow, Stage::Category),
            DraftPayload::new(flow),
            TransitionOptions::with_intro(),
        )
        .await
    }

    async fn apply_outcome(&self, user: &UserRecord, outcome: HandlerOutcome) -> Result<()> {
        self.deliver_all(user, outcome.responses).await;
        match outcome.advance {
            StepAdvance::Stay => Ok(()),
            StepAdvance::Transition { step, payload } => {
                self.transition_to(user, step, payload, TransitionOptions::default())
                    .await
            }
            StepAdvance::Finish => {
                self.store.delete(user.id).await?;
                tracing::info!(user_id = %user.id, "dialogue finished");
                self.deliver(user, render::main_menu(self.app_url())).await;
                Ok(())
            }
        }
    }

    /// Persist `(step, payload)` and enter the target step.
    ///
    /// Pass-through steps (the photo stage) advance further from their
    /// `enter`; each hop is persisted before the next `enter` runs, so a
    /// crash mid-chain resumes at the step the user actually reached.
    async fn transition_to(
        &self,
        user: &UserRecord,
        step: Step,
        payload: DraftPayload,
        options: TransitionOptions,
    ) -> Result<()> {
        self.store.put(user.id, step, payload.clone()).await?;
        tracing::info!(user_id = %user.id, step = ?step, "state transition");

        if options.with_intro {
            if let Some(flow) = step.flow() {
                self.deliver(user, render::flow_intro(flow)).await;
            }
        }
        if options.skip_enter {
            return Ok(());
        }

        let mut current = step;
        loop {
            let Some(handler) = self.registry.get(current) else {
                break;
            };
            let runtime = StepRuntime {
                user,
                step: current,
                payload: &payload,
            };
            let Some(entered) = handler.enter(&runtime) else {
                break;
            };
            self.deliver_all(user, entered.responses).await;
            let Some(next) = entered.advance_to else {
                break;
            };
            self.store.put(user.id, next, payload.clone()).await?;
            tracing::info!(user_id = %user.id, step = ?next, "state transition (pass-through)");
            current = next;
        }
        Ok(())
    }

    async fn deliver(&self, user: &UserRecord, response: Response) {
        self.deliver_all(user, vec![response]).await;
    }

    /// Send failures never abort event handling for the user.
    async fn deliver_all(&self, user: &UserRecord, responses: Vec<Response>) {
        for response in responses {
            if let Err(error) = self.sink.send(user, response).await {
                tracing::warn!(user_id = %user.id, %error, "failed to deliver response");
            }
        }
    }

    async fn user_lock(&self, user_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn app_url(&self) -> Option<&str> {
        self.config.app_base_url.as_deref()
    }
}
