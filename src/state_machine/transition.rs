//! Pure state transition function
//!
//! Given the same state, context and event this always yields the same new
//! state and effect list. All I/O happens in the runtime that executes the
//! effects.

use super::{Effect, Event, RequestId, WidgetContext, WidgetState};
use crate::llm::Turn;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: WidgetState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: WidgetState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Events the workflow declines. Both leave state and store untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Input is empty")]
    EmptyInput,
    #[error("Outcome for request {request_id} is not the pending request")]
    StaleOutcome { request_id: RequestId },
}

/// Pure transition function
pub fn transition(
    state: &WidgetState,
    context: &WidgetContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    let records = context.history_mode.records_turns();

    match (state, event) {
        // Any state + UserSubmit -> Pending. A send accepted while another is
        // pending supersedes it: the old placeholder goes away and the old
        // request's outcome will be stale.
        (_, Event::UserSubmit { text, request_id }) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(TransitionError::EmptyInput);
            }

            let user_turn = Turn::user(text);
            let superseded = state
                .pending_request()
                .map(|old| Effect::RemovePlaceholder { request_id: old });

            Ok(TransitionResult::new(WidgetState::Pending { request_id })
                .with_effects(superseded)
                .with_effect(Effect::render_user(text))
                .with_effect(Effect::ClearInput)
                .with_effects(records.then(|| Effect::append(user_turn.clone())))
                .with_effect(Effect::ShowPlaceholder {
                    request_id,
                    text: context.placeholder_text.clone(),
                })
                .with_effect(Effect::RequestCompletion {
                    request_id,
                    latest: user_turn,
                }))
        }

        // Pending + matching success -> Idle
        (
            WidgetState::Pending { request_id: current },
            Event::CompletionSucceeded { request_id, reply },
        ) if *current == request_id => {
            let assistant_turn = records.then(|| Effect::append(Turn::assistant(reply.clone())));

            Ok(TransitionResult::new(WidgetState::Idle)
                .with_effect(Effect::RemovePlaceholder { request_id })
                .with_effect(Effect::render_assistant(reply))
                .with_effects(assistant_turn))
        }

        // Pending + matching failure -> Idle
        (
            WidgetState::Pending { request_id: current },
            Event::CompletionFailed { request_id },
        ) if *current == request_id => {
            Ok(TransitionResult::new(WidgetState::Idle)
                .with_effect(Effect::RemovePlaceholder { request_id })
                .with_effect(Effect::render_assistant(context.error_text.clone())))
        }

        // Outcome for a superseded request, or one arriving while idle
        (
            _,
            Event::CompletionSucceeded { request_id, .. } | Event::CompletionFailed { request_id },
        ) => Err(TransitionError::StaleOutcome { request_id }),
    }
}
