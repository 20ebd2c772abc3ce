//! Widget runtime executor

use super::traits::{LlmClient, Presentation};
use super::WidgetEvent;
use crate::conversation::ConversationStore;
use crate::llm::LlmRequest;
use crate::panel::{PanelEvent, PanelState};
use crate::state_machine::{
    transition, Effect, Event, RequestId, TransitionError, WidgetContext, WidgetState,
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Generic widget runtime that can work with any presentation and completion client
pub struct WidgetRuntime<P, L>
where
    P: Presentation + 'static,
    L: LlmClient + 'static,
{
    context: WidgetContext,
    state: WidgetState,
    panel: PanelState,
    store: ConversationStore,
    presentation: P,
    llm_client: Arc<L>,
    event_rx: mpsc::Receiver<WidgetEvent>,
    /// Weak so the loop ends once every handle and request task is gone
    event_tx: mpsc::WeakSender<WidgetEvent>,
}

impl<P, L> WidgetRuntime<P, L>
where
    P: Presentation + 'static,
    L: LlmClient + 'static,
{
    pub fn new(
        context: WidgetContext,
        store: ConversationStore,
        presentation: P,
        llm_client: L,
        event_rx: mpsc::Receiver<WidgetEvent>,
        event_tx: mpsc::WeakSender<WidgetEvent>,
    ) -> Self {
        Self {
            context,
            state: WidgetState::Idle,
            panel: PanelState::default(),
            store,
            presentation,
            llm_client: Arc::new(llm_client),
            event_rx,
            event_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(
            history_mode = %self.context.history_mode,
            model = %self.llm_client.model_id(),
            seeded = !self.store.is_empty(),
            "Starting widget runtime"
        );

        while let Some(event) = self.event_rx.recv().await {
            if matches!(event, WidgetEvent::Shutdown) {
                break;
            }
            self.process_event(event);
        }

        tracing::info!(turns = self.store.len(), "Widget runtime stopped");
    }

    /// Handle one event to completion. Never blocks on the network.
    pub fn process_event(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::SendRequested => {
                let text = self.presentation.read_input();
                self.apply(Event::user_submit(text));
            }
            WidgetEvent::Submit { text } => self.apply(Event::user_submit(text)),
            WidgetEvent::Panel(panel_event) => self.apply_panel(panel_event),
            WidgetEvent::Machine(event) => self.apply(event),
            WidgetEvent::Transcript { reply } => {
                let _ = reply.send(self.store.snapshot());
            }
            WidgetEvent::Shutdown => {}
        }
    }

    fn apply(&mut self, event: Event) {
        let request_id = event.request_id();
        match transition(&self.state, &self.context, event) {
            Ok(result) => {
                self.state = result.new_state;
                for effect in result.effects {
                    self.execute_effect(effect);
                }
            }
            Err(TransitionError::EmptyInput) => {
                tracing::debug!("Ignoring empty input");
            }
            Err(e @ TransitionError::StaleOutcome { .. }) => {
                tracing::debug!(
                    request_id = %request_id,
                    pending = ?self.state.pending_request(),
                    "{e}"
                );
            }
        }
    }

    fn apply_panel(&mut self, event: PanelEvent) {
        if let Some(effect) = self.panel.apply(event) {
            tracing::debug!(?event, open = self.panel.is_open(), "Panel visibility changed");
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::RenderMessage { text, from_user } => {
                self.presentation.render_message(&text, from_user);
            }
            Effect::ClearInput => self.presentation.clear_input(),
            Effect::ShowPlaceholder { request_id, text } => {
                self.presentation.render_placeholder(request_id, &text);
            }
            Effect::RemovePlaceholder { request_id } => {
                self.presentation.remove_placeholder(request_id);
            }
            Effect::AppendTurn { turn } => {
                let role = turn.role;
                if let Err(e) = self.store.append_turn(role, turn.content) {
                    tracing::warn!(role = %role, error = %e, "Turn rejected by store");
                }
            }
            Effect::RequestCompletion { request_id, latest } => {
                let request = self.store.payload_for(self.context.history_mode, &latest);
                self.spawn_completion(request_id, request);
            }
            Effect::ShowPanel => self.presentation.show_panel(),
            Effect::HidePanel => self.presentation.hide_panel(),
        }
    }

    fn spawn_completion(&mut self, request_id: RequestId, request: LlmRequest) {
        let Some(event_tx) = self.event_tx.upgrade() else {
            // Nothing could deliver the outcome; resolve the request here
            tracing::warn!(request_id = %request_id, "No event sender left, failing request");
            self.apply(Event::CompletionFailed { request_id });
            return;
        };
        let llm_client = Arc::clone(&self.llm_client);

        tracing::debug!(
            request_id = %request_id,
            turns = request.messages.len(),
            "Requesting completion"
        );

        tokio::spawn(async move {
            let event = match llm_client.complete(&request).await {
                Ok(reply) => Event::CompletionSucceeded { request_id, reply },
                Err(e) => {
                    tracing::warn!(
                        request_id = %request_id,
                        kind = e.kind.as_str(),
                        status = ?e.status,
                        error = %e,
                        "Completion failed"
                    );
                    Event::CompletionFailed { request_id }
                }
            };
            // The loop may already be gone after a shutdown
            let _ = event_tx.send(WidgetEvent::Machine(event)).await;
        });
    }
}

#[cfg(test)]
impl<P, L> WidgetRuntime<P, L>
where
    P: Presentation + 'static,
    L: LlmClient + 'static,
{
    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    /// Wait for the next event without processing it
    pub async fn next_event(&mut self) -> Option<WidgetEvent> {
        self.event_rx.recv().await
    }
}
