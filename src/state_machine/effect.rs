//! Effects produced by state transitions

use super::state::RequestId;
use crate::llm::Turn;

/// Effects to be executed, in order, after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a message to the visible message list
    RenderMessage { text: String, from_user: bool },

    /// Empty the input field
    ClearInput,

    /// Show the pending placeholder for `request_id`
    ShowPlaceholder { request_id: RequestId, text: String },

    /// Remove the placeholder belonging to `request_id`
    RemovePlaceholder { request_id: RequestId },

    /// Append a turn to the conversation store
    AppendTurn { turn: Turn },

    /// Issue the completion request for `latest`
    RequestCompletion { request_id: RequestId, latest: Turn },

    ShowPanel,
    HidePanel,
}

impl Effect {
    pub fn render_user(text: impl Into<String>) -> Self {
        Effect::RenderMessage {
            text: text.into(),
            from_user: true,
        }
    }

    pub fn render_assistant(text: impl Into<String>) -> Self {
        Effect::RenderMessage {
            text: text.into(),
            from_user: false,
        }
    }

    pub fn append(turn: Turn) -> Self {
        Effect::AppendTurn { turn }
    }
}
