//! Widget state types

use crate::conversation::HistoryMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Transient placeholder shown while a reply is awaited
pub const PENDING_PLACEHOLDER: &str = "Thinking...";

/// The only failure text the user ever sees
pub const COMPLETION_ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

/// Correlation token for one in-flight completion request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Send-turn lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetState {
    /// Ready to accept input
    #[default]
    Idle,

    /// Waiting on the completion for `request_id`; only that request may
    /// resolve the placeholder
    Pending { request_id: RequestId },
}

impl WidgetState {
    /// The request currently allowed to resolve, if any
    pub fn pending_request(&self) -> Option<RequestId> {
        match self {
            WidgetState::Idle => None,
            WidgetState::Pending { request_id } => Some(*request_id),
        }
    }
}

/// Fixed per-widget settings consulted by transitions
#[derive(Debug, Clone)]
pub struct WidgetContext {
    pub history_mode: HistoryMode,
    pub placeholder_text: String,
    pub error_text: String,
}

impl WidgetContext {
    pub fn new(history_mode: HistoryMode) -> Self {
        Self {
            history_mode,
            placeholder_text: PENDING_PLACEHOLDER.to_string(),
            error_text: COMPLETION_ERROR_MESSAGE.to_string(),
        }
    }
}

impl Default for WidgetContext {
    fn default() -> Self {
        Self::new(HistoryMode::default())
    }
}
