//! Events that drive the send-turn workflow

use super::state::RequestId;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Raw input captured from the presentation layer. The id is minted by
    /// the caller so the transition itself stays deterministic.
    UserSubmit { text: String, request_id: RequestId },

    /// The completion for `request_id` produced a reply
    CompletionSucceeded { request_id: RequestId, reply: String },

    /// The completion for `request_id` failed; detail was already logged
    CompletionFailed { request_id: RequestId },
}

impl Event {
    /// Wrap user input with a fresh request id
    pub fn user_submit(text: impl Into<String>) -> Self {
        Event::UserSubmit {
            text: text.into(),
            request_id: RequestId::new(),
        }
    }

    pub fn request_id(&self) -> RequestId {
        match self {
            Event::UserSubmit { request_id, .. }
            | Event::CompletionSucceeded { request_id, .. }
            | Event::CompletionFailed { request_id } => *request_id,
        }
    }
}
